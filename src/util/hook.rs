use tracing::error;

use crate::ui::tui;

/// Restores the terminal before the default hook prints, so the report is
/// readable, and records the panic in the log file.
pub fn set_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::Tui::restore();
        error!("{panic_info}");
        hook(panic_info);
    }));
}
