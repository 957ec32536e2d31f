use ratatui::Frame;
use ratatui::crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use tracing::debug;

use crate::event::events::Event;
use crate::ui::context::AppContext;
use crate::ui::state::{AppState, Route};
use crate::ui::traits::{Action, View};

/// Stack of mounted views; the top one is active. The root is never popped.
pub struct Router {
    pub stack: Vec<Box<dyn View>>,
}

impl Router {
    pub fn new(mut initial_view: Box<dyn View>, ctx: &AppContext) -> Self {
        initial_view.on_mount(ctx);
        Self {
            stack: vec![initial_view],
        }
    }

    pub fn push(&mut self, mut view: Box<dyn View>, ctx: &AppContext) {
        debug!(route = ?view.route(), "route_push");
        view.on_mount(ctx);
        self.stack.push(view);
    }

    /// Returns `false` when only the root is left.
    pub fn pop(&mut self) -> bool {
        if self.stack.len() <= 1 {
            return false;
        }

        if let Some(mut view) = self.stack.pop() {
            debug!(route = ?view.route(), "route_pop");
            view.on_unmount();
        }
        true
    }

    /// Swaps the active view for `view`, unmounting the old one first.
    pub fn replace(&mut self, view: Box<dyn View>, ctx: &AppContext) {
        if let Some(mut old) = self.stack.pop() {
            old.on_unmount();
        }
        self.push(view, ctx);
    }

    pub fn active_route(&self) -> Route {
        self.stack.last().map(|v| v.route()).unwrap_or_default()
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, state: &AppState, ctx: &AppContext) {
        if let Some(view) = self.stack.last_mut() {
            view.render(f, area, state, ctx);
        }
    }

    pub async fn handle_input(
        &mut self,
        key: KeyEvent,
        state: &AppState,
        ctx: &AppContext,
    ) -> Option<Action> {
        match self.stack.last_mut() {
            Some(view) => view.handle_input(key, state, ctx).await,
            None => None,
        }
    }

    pub async fn on_event(&mut self, event: &Event, ctx: &AppContext) {
        for view in &mut self.stack {
            view.on_event(event, ctx).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;
    use crate::ui::context::testing;

    struct Stub {
        route: Route,
        log: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl View for Stub {
        fn route(&self) -> Route {
            self.route
        }

        fn on_mount(&mut self, _ctx: &AppContext) {
            self.log.lock().unwrap().push(format!("mount {:?}", self.route));
        }

        fn on_unmount(&mut self) {
            self.log.lock().unwrap().push(format!("unmount {:?}", self.route));
        }

        fn render(&mut self, _f: &mut Frame, _area: Rect, _state: &AppState, _ctx: &AppContext) {}

        async fn handle_input(
            &mut self,
            _key: KeyEvent,
            _state: &AppState,
            _ctx: &AppContext,
        ) -> Option<Action> {
            None
        }
    }

    #[test]
    fn mount_and_unmount_follow_the_stack() {
        let (ctx, _rx) = testing::context();
        let log = Arc::new(Mutex::new(Vec::new()));
        let stub = |route| {
            Box::new(Stub {
                route,
                log: log.clone(),
            })
        };

        let mut router = Router::new(stub(Route::Search), &ctx);
        router.push(stub(Route::TrackDetail(1)), &ctx);
        router.replace(stub(Route::TrackDetail(2)), &ctx);
        assert_eq!(router.active_route(), Route::TrackDetail(2));

        assert!(router.pop());
        assert!(!router.pop());
        assert_eq!(router.active_route(), Route::Search);

        assert_eq!(
            *log.lock().unwrap(),
            vec![
                "mount Search",
                "mount TrackDetail(1)",
                "unmount TrackDetail(1)",
                "mount TrackDetail(2)",
                "unmount TrackDetail(2)",
            ]
        );
    }
}
