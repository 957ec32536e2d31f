use async_trait::async_trait;
use ratatui::crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

use crate::{
    event::events::Event,
    model::Track,
    ui::{context::AppContext, state::AppState, state::Route},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    Back,
    /// Navigate to the detail route, handing over the already-known track.
    OpenTrack(Track),
    TogglePlay(Track),
    /// Input consumed, nothing to dispatch.
    None,
}

#[async_trait]
pub trait View: Send {
    fn route(&self) -> Route;

    /// Called once, right after the view is pushed.
    fn on_mount(&mut self, _ctx: &AppContext) {}

    /// Called once, right before the view is dropped.
    fn on_unmount(&mut self) {}

    fn render(&mut self, f: &mut Frame, area: Rect, state: &AppState, ctx: &AppContext);

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        state: &AppState,
        ctx: &AppContext,
    ) -> Option<Action>;

    async fn on_event(&mut self, _event: &Event, _ctx: &AppContext) {}
}
