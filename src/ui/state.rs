use crate::model::Track;

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub data: AppData,
    pub ui: UiState,
}

#[derive(Debug, Clone, Default)]
pub struct AppData {
    /// Track whose preview was last loaded into the controller.
    pub now_playing: Option<Track>,
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub current_route: Route,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Search,
    TrackDetail(u64),
}

impl Route {
    pub fn title_key(&self) -> &'static str {
        match self {
            Route::Search => "search",
            Route::TrackDetail(_) => "track_details",
        }
    }
}
