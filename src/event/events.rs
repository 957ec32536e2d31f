use uuid::Uuid;

use crate::{
    http::ApiError,
    lifecycle::Ticket,
    model::{CatalogResponse, Track},
};

#[derive(Debug, Clone)]
pub enum Event {
    // Requests
    SearchRequested {
        ticket: Ticket,
        query: String,
    },
    TrackRequested {
        ticket: Ticket,
        track_id: u64,
    },

    // Responses
    SearchResolved {
        ticket: Ticket,
        result: Result<CatalogResponse, ApiError>,
    },
    TrackResolved {
        ticket: Ticket,
        result: Result<Track, ApiError>,
    },

    // Timers
    SearchInputSettled {
        owner: Uuid,
        query: String,
    },

    // Playback resource
    PlaybackFinished(String),
}
