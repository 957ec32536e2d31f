use std::sync::Arc;

use flume::Sender;

use crate::{audio::AudioController, config::Config, event::events::Event, http::CatalogApi};

pub struct AppContext {
    pub api: Arc<dyn CatalogApi>,
    pub audio: AudioController,
    pub event_tx: Sender<Event>,
    pub config: Config,
}
