use tracing::info;
use uuid::Uuid;

use crate::{
    http::ApiError,
    lifecycle::{RequestLifecycle, RequestStatus, Ticket},
    model::{CatalogResponse, Track},
};

/// Search-as-you-type state for one mounted search view.
#[derive(Debug, Clone)]
pub struct SearchLifecycle {
    query: String,
    request: RequestLifecycle<Vec<Track>>,
    auto_submitted: bool,
}

impl Default for SearchLifecycle {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl SearchLifecycle {
    /// `query` is the text restored from an earlier visit, if any.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            request: RequestLifecycle::new(),
            auto_submitted: false,
        }
    }

    pub fn owner(&self) -> Uuid {
        self.request.owner()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn status(&self) -> RequestStatus {
        self.request.status()
    }

    pub fn is_loading(&self) -> bool {
        self.request.is_loading()
    }

    pub fn results(&self) -> &[Track] {
        self.request.data().map_or(&[], Vec::as_slice)
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.request.error()
    }

    /// Records `query` and starts a request for it. A blank query clears the
    /// results instead and returns `None`: nothing should be fetched.
    pub fn submit(&mut self, query: &str) -> Option<Ticket> {
        if query.trim().is_empty() {
            self.query.clear();
            self.request.clear();
            return None;
        }

        self.query = query.to_string();
        let ticket = self.request.begin();
        info!(query, generation = ticket.generation, "search_submitted");
        Some(ticket)
    }

    /// First-mount hook: re-runs a restored query that has no results yet.
    /// Fires at most once per lifecycle.
    pub fn mount(&mut self) -> Option<Ticket> {
        if self.auto_submitted
            || self.query.trim().is_empty()
            || !self.results().is_empty()
            || self.request.status() != RequestStatus::Idle
        {
            return None;
        }

        self.auto_submitted = true;
        let query = self.query.clone();
        self.submit(&query)
    }

    pub fn resolve(&mut self, ticket: Ticket, result: Result<CatalogResponse, ApiError>) -> bool {
        self.request
            .resolve(ticket, result.map(|response| response.results))
    }

    pub fn dispose(&mut self) {
        self.request.dispose();
    }
}
