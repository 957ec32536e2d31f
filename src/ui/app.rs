use std::sync::Arc;

use flume::{Receiver, Sender};
use ratatui::Frame;
use tracing::{info, warn};

use crate::{
    audio::{
        AudioController, PlaybackResource, playback::PlaybackEngine, traits::DetachedResource,
    },
    config::Config,
    event::events::Event,
    http::{ApiService, CatalogApi},
    util::task::TaskManager,
};

use super::{
    context::AppContext,
    layout::AppLayout,
    router::Router,
    state::AppState,
    tui::{self, TerminalEvent},
    util::handler::EventHandler,
    views::{Search, TrackDetail},
};

/// Where the app starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Launch {
    /// Pre-filled search text, searched once on mount.
    pub query: Option<String>,
    /// Open the detail route for this id on top of search.
    pub track_id: Option<u64>,
}

pub struct App {
    pub event_rx: Receiver<Event>,
    pub ctx: AppContext,
    pub router: Router,
    pub state: AppState,
    pub task_manager: TaskManager,
    pub has_focus: bool,
    pub should_quit: bool,
}

impl App {
    pub async fn new(config: Config, launch: Launch) -> color_eyre::Result<Self> {
        let (event_tx, event_rx) = flume::unbounded();
        let api = Arc::new(ApiService::new(config.api.clone())?);

        let resource: Box<dyn PlaybackResource> =
            match PlaybackEngine::new(&config.audio, event_tx.clone()) {
                Ok(engine) => Box::new(engine),
                Err(e) => {
                    warn!(error = %e, "audio_output_unavailable");
                    Box::new(DetachedResource)
                }
            };

        Ok(Self::with_parts(
            config, launch, api, resource, event_tx, event_rx,
        ))
    }

    /// Assembles the app around an explicit catalog and playback resource.
    pub fn with_parts(
        config: Config,
        launch: Launch,
        api: Arc<dyn CatalogApi>,
        resource: Box<dyn PlaybackResource>,
        event_tx: Sender<Event>,
        event_rx: Receiver<Event>,
    ) -> Self {
        let ctx = AppContext {
            api,
            audio: AudioController::new(resource),
            event_tx,
            config,
        };

        let search = Search::new(launch.query, ctx.config.search.debounce());
        let mut router = Router::new(Box::new(search), &ctx);
        if let Some(track_id) = launch.track_id {
            router.push(Box::new(TrackDetail::new(track_id, None)), &ctx);
        }

        let mut state = AppState::default();
        state.ui.current_route = router.active_route();
        info!(route = ?state.ui.current_route, "app_started");

        Self {
            event_rx,
            ctx,
            router,
            state,
            task_manager: TaskManager::new(),
            has_focus: true,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = tui::Tui::new()?;
        tui.enter()?;

        EventHandler::handle_event(self, TerminalEvent::Init, &mut tui).await?;
        while !self.should_quit {
            tui.draw(|f| {
                self.ui(f);
            })?;

            EventHandler::handle_events(self, &mut tui).await?;
        }

        self.task_manager.abort_all();
        tui.exit()?;
        Ok(())
    }

    fn ui(&mut self, frame: &mut Frame) {
        if self.has_focus {
            let area = frame.area();
            AppLayout::new(self).render(frame, area);
        }
    }
}
