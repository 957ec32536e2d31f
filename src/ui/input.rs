use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ui::traits::Action;

/// Global bindings, consulted only when the active view ignored the key.
pub struct InputHandler;

impl InputHandler {
    pub fn handle_key(key: KeyEvent) -> Option<Action> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Action::Quit),
            (KeyCode::Char('q'), _) => Some(Action::Quit),
            (KeyCode::Esc, _) => Some(Action::Back),
            _ => None,
        }
    }
}
