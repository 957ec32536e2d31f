use tracing::info;
use uuid::Uuid;

use crate::{
    http::ApiError,
    lifecycle::{RequestLifecycle, RequestStatus, Ticket},
    model::Track,
};

/// Track lookup state for one mounted detail view.
#[derive(Debug, Clone)]
pub struct DetailLifecycle {
    track_id: u64,
    request: RequestLifecycle<Track>,
    preloaded: bool,
}

impl DetailLifecycle {
    /// With `preloaded` the view starts settled and never fetches.
    pub fn new(track_id: u64, preloaded: Option<Track>) -> Self {
        let mut request = RequestLifecycle::new();
        let preloaded = match preloaded {
            Some(track) => {
                request.complete(track);
                true
            }
            None => false,
        };

        Self {
            track_id,
            request,
            preloaded,
        }
    }

    pub fn owner(&self) -> Uuid {
        self.request.owner()
    }

    pub fn track_id(&self) -> u64 {
        self.track_id
    }

    pub fn status(&self) -> RequestStatus {
        self.request.status()
    }

    pub fn is_loading(&self) -> bool {
        !self.preloaded && self.request.is_loading()
    }

    pub fn track(&self) -> Option<&Track> {
        self.request.data()
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.request.error()
    }

    /// Starts the lookup unless the track came with the navigation or a
    /// request has already been made.
    pub fn mount(&mut self) -> Option<Ticket> {
        if self.preloaded || self.request.status() != RequestStatus::Idle {
            return None;
        }

        let ticket = self.request.begin();
        info!(track_id = self.track_id, "track_lookup_started");
        Some(ticket)
    }

    pub fn resolve(&mut self, ticket: Ticket, result: Result<Track, ApiError>) -> bool {
        self.request.resolve(ticket, result)
    }

    pub fn dispose(&mut self) {
        self.request.dispose();
    }
}
