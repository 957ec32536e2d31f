use tracing::debug;

/// The single output element playback is delegated to.
///
/// Implementations must accept `play` before a freshly attached source has
/// finished loading, and start it as soon as it is ready.
pub trait PlaybackResource: Send + Sync {
    /// Points the element at `source`, discarding any previous position.
    /// `None` unloads and silences it.
    fn attach(&mut self, source: Option<&str>);
    fn play(&mut self);
    fn pause(&mut self);
}

/// Stand-in used when no output device could be opened. State transitions
/// still happen; nothing is heard.
#[derive(Debug, Default)]
pub struct DetachedResource;

impl PlaybackResource for DetachedResource {
    fn attach(&mut self, source: Option<&str>) {
        debug!(?source, "detached_attach");
    }

    fn play(&mut self) {}

    fn pause(&mut self) {}
}
