use crate::audio::commands::AudioCommand;

/// Process-wide playback state. The loaded source travels inside the
/// variant, so "no track" and "no source" can never disagree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    NoTrack,
    Playing(String),
    Paused(String),
    Ended(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    NoTrack,
    Playing,
    Paused,
    Ended,
}

impl PlaybackState {
    pub fn status(&self) -> PlaybackStatus {
        match self {
            PlaybackState::NoTrack => PlaybackStatus::NoTrack,
            PlaybackState::Playing(_) => PlaybackStatus::Playing,
            PlaybackState::Paused(_) => PlaybackStatus::Paused,
            PlaybackState::Ended(_) => PlaybackStatus::Ended,
        }
    }

    pub fn source(&self) -> Option<&str> {
        match self {
            PlaybackState::NoTrack => None,
            PlaybackState::Playing(s) | PlaybackState::Paused(s) | PlaybackState::Ended(s) => {
                Some(s)
            }
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self, PlaybackState::Playing(_))
    }

    /// Whether `source` is the loaded clip and it is currently audible.
    pub fn is_playing_source(&self, source: &str) -> bool {
        matches!(self, PlaybackState::Playing(s) if s == source)
    }

    /// The command a play/pause control bound to `source` should issue.
    pub fn toggle(&self, source: &str) -> AudioCommand {
        match self.source() {
            Some(loaded) if loaded == source => {
                if self.is_playing() {
                    AudioCommand::Pause
                } else {
                    AudioCommand::Play
                }
            }
            _ => AudioCommand::LoadAndPlay(source.to_string()),
        }
    }
}
