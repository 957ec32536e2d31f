use tracing::{debug, info};

use crate::audio::{commands::AudioCommand, state::PlaybackState, traits::PlaybackResource};

/// Owns the playback resource and the state machine over it. Every
/// mutation goes through `&mut self`, so the UI task is the only writer.
pub struct AudioController {
    state: PlaybackState,
    resource: Box<dyn PlaybackResource>,
}

impl AudioController {
    pub fn new(resource: Box<dyn PlaybackResource>) -> Self {
        Self {
            state: PlaybackState::NoTrack,
            resource,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn handle_command(&mut self, cmd: AudioCommand) {
        match cmd {
            AudioCommand::Play => self.play(),
            AudioCommand::Pause => self.pause(),
            AudioCommand::LoadAndPlay(source) => self.load_and_play(source),
            AudioCommand::Reset => self.reset(),
        }
    }

    fn play(&mut self) {
        let Some(source) = self.state.source() else {
            debug!("play_without_source");
            return;
        };

        self.state = PlaybackState::Playing(source.to_string());
        self.resource.play();
    }

    fn pause(&mut self) {
        if let PlaybackState::Playing(source) = &self.state {
            self.state = PlaybackState::Paused(source.clone());
            self.resource.pause();
        }
    }

    fn load_and_play(&mut self, source: String) {
        if self.state.source() != Some(source.as_str()) {
            info!(source = source.as_str(), "playback_source_changed");
            self.resource.attach(Some(&source));
        }

        self.state = PlaybackState::Playing(source);
        self.resource.play();
    }

    fn reset(&mut self) {
        if self.state.source().is_some() {
            self.resource.attach(None);
        }
        self.state = PlaybackState::NoTrack;
    }

    /// The resource reached the end of `source`. Ignored unless that exact
    /// source is the one playing; returns whether the state changed.
    pub fn on_finished(&mut self, source: &str) -> bool {
        match &self.state {
            PlaybackState::Playing(current) if current == source => {
                self.state = PlaybackState::Ended(current.clone());
                true
            }
            _ => {
                debug!(source, state = ?self.state, "stale_finished_ignored");
                false
            }
        }
    }
}
