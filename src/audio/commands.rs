/// The only ways to change [`PlaybackState`](crate::audio::state::PlaybackState).
/// Entering `Ended` is reserved for the resource's own finished notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioCommand {
    Play,
    Pause,
    LoadAndPlay(String),
    Reset,
}
