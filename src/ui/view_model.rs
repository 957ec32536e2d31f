//! Pure projections from lifecycle and playback state to what the views draw.
//!
//! Message precedence for the results area is loading, then error, then
//! the empty-query prompt, then "not found", then cards.

use crate::{
    audio::{AudioCommand, PlaybackState},
    http::error::NOT_FOUND_KEY,
    lifecycle::{DetailLifecycle, RequestStatus, SearchLifecycle},
    model::Track,
};

pub const SKELETON_ROWS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Error,
    Prompt,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub title_key: &'static str,
    /// A translation key or raw catalog error text.
    pub text: String,
}

impl Message {
    fn error(title_key: &'static str, text: String) -> Self {
        Self {
            kind: MessageKind::Error,
            title_key,
            text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: u64,
    pub track_name: String,
    pub artist_name: String,
    pub collection_name: String,
    pub country: String,
    pub genre: String,
    pub thumbnail: String,
    pub is_playing: bool,
    /// Carried as navigation context when the card is opened.
    pub track: Track,
}

impl Card {
    /// `None` unless every required display field is present.
    pub fn from_track(track: &Track, playback: &PlaybackState) -> Option<Self> {
        if !track.is_card_complete() {
            return None;
        }

        Some(Self {
            id: track.id?,
            track_name: track.track_name.clone()?,
            artist_name: track.artist_name.clone()?,
            collection_name: track.collection_name.clone()?,
            country: track.country.clone()?,
            genre: track.primary_genre_name.clone()?,
            thumbnail: track.artwork_url.clone()?,
            is_playing: is_track_playing(playback, track),
            track: track.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResults {
    Loading { rows: usize },
    Message(Message),
    Cards(Vec<Card>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailField {
    pub label_key: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackDetails {
    pub title: Option<String>,
    pub fields: Vec<DetailField>,
    pub thumbnail: Option<String>,
    pub has_preview: bool,
    pub is_playing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detail {
    Loading { rows: usize },
    Message(Message),
    Track(TrackDetails),
    Empty,
}

/// A track is shown as playing only when its preview is the loaded source
/// and playback is running. No view keeps its own flag.
pub fn is_track_playing(playback: &PlaybackState, track: &Track) -> bool {
    track
        .preview_url
        .as_deref()
        .is_some_and(|url| playback.is_playing_source(url))
}

/// What a play/pause control bound to `track` should do; `None` when the
/// track has no preview.
pub fn toggle_command(playback: &PlaybackState, track: &Track) -> Option<AudioCommand> {
    track.preview_url.as_deref().map(|url| playback.toggle(url))
}

pub fn search_results(lifecycle: &SearchLifecycle, playback: &PlaybackState) -> SearchResults {
    if lifecycle.is_loading() {
        return SearchResults::Loading {
            rows: SKELETON_ROWS,
        };
    }

    if let Some(error) = lifecycle.error() {
        return SearchResults::Message(Message::error("media_list", error.user_message()));
    }

    if lifecycle.query().trim().is_empty() || lifecycle.status() == RequestStatus::Idle {
        return SearchResults::Message(Message {
            kind: MessageKind::Prompt,
            title_key: "media_list",
            text: "songs_search_default".to_string(),
        });
    }

    let cards: Vec<Card> = lifecycle
        .results()
        .iter()
        .filter_map(|track| Card::from_track(track, playback))
        .collect();

    if cards.is_empty() {
        return SearchResults::Message(Message {
            kind: MessageKind::NotFound,
            title_key: "oops",
            text: NOT_FOUND_KEY.to_string(),
        });
    }

    SearchResults::Cards(cards)
}

pub fn detail(lifecycle: &DetailLifecycle, playback: &PlaybackState) -> Detail {
    if lifecycle.is_loading() {
        return Detail::Loading {
            rows: SKELETON_ROWS,
        };
    }

    if let Some(error) = lifecycle.error() {
        return Detail::Message(Message::error("oops", error.user_message()));
    }

    let Some(track) = lifecycle.track() else {
        return Detail::Empty;
    };

    let fields = [
        ("collection_name", track.collection_name.as_deref()),
        ("artist_name", track.artist_name.as_deref()),
        ("country", track.country.as_deref()),
        ("primary_genre_name", track.primary_genre_name.as_deref()),
        ("release_date", track.release_day()),
    ]
    .into_iter()
    .filter_map(|(label_key, value)| {
        value.filter(|v| !v.is_empty()).map(|v| DetailField {
            label_key,
            value: v.to_string(),
        })
    })
    .collect();

    Detail::Track(TrackDetails {
        title: track.track_name.clone(),
        fields,
        thumbnail: track.artwork_url.clone(),
        has_preview: track.preview_url.is_some(),
        is_playing: is_track_playing(playback, track),
    })
}
