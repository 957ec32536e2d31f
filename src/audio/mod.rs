pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod playback;
pub mod state;
pub mod traits;
pub mod util;

pub use commands::AudioCommand;
pub use controller::AudioController;
pub use state::{PlaybackState, PlaybackStatus};
pub use traits::PlaybackResource;
