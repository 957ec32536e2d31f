//! Request/response state for one asynchronous data dependency of a view.
//!
//! Every request is stamped with a [`Ticket`]. A response is applied only if
//! its ticket is the most recently issued one for the same lifecycle, which
//! makes the outcome last-issued-wins regardless of arrival order.

pub mod detail;
pub mod search;

use tracing::debug;
use uuid::Uuid;

use crate::http::ApiError;

pub use detail::DetailLifecycle;
pub use search::SearchLifecycle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub owner: Uuid,
    pub generation: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct RequestLifecycle<T> {
    owner: Uuid,
    generation: u64,
    status: RequestStatus,
    data: Option<T>,
    error: Option<ApiError>,
    disposed: bool,
}

impl<T> Default for RequestLifecycle<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RequestLifecycle<T> {
    pub fn new() -> Self {
        Self {
            owner: Uuid::new_v4(),
            generation: 0,
            status: RequestStatus::Idle,
            data: None,
            error: None,
            disposed: false,
        }
    }

    pub fn owner(&self) -> Uuid {
        self.owner
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == RequestStatus::Loading
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    /// Starts a new request, superseding any still in flight.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.status = RequestStatus::Loading;
        self.error = None;
        self.ticket()
    }

    /// Settles directly with `data`, no request involved.
    pub fn complete(&mut self, data: T) {
        self.generation += 1;
        self.status = RequestStatus::Success;
        self.data = Some(data);
        self.error = None;
    }

    /// Back to idle with nothing loaded; in-flight responses become stale.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.status = RequestStatus::Idle;
        self.data = None;
        self.error = None;
    }

    /// Stops accepting responses for good. Called when the owning view goes away.
    pub fn dispose(&mut self) {
        self.disposed = true;
    }

    pub fn accepts(&self, ticket: Ticket) -> bool {
        !self.disposed
            && ticket.owner == self.owner
            && ticket.generation == self.generation
            && self.status == RequestStatus::Loading
    }

    /// Applies a response. Returns `false` (and changes nothing) when the
    /// ticket has been superseded or the lifecycle disposed.
    pub fn resolve(&mut self, ticket: Ticket, result: Result<T, ApiError>) -> bool {
        if !self.accepts(ticket) {
            debug!(
                generation = ticket.generation,
                current = self.generation,
                disposed = self.disposed,
                "stale_response_discarded"
            );
            return false;
        }

        match result {
            Ok(data) => {
                self.status = RequestStatus::Success;
                self.data = Some(data);
                self.error = None;
            }
            Err(error) => {
                self.status = RequestStatus::Error;
                self.data = None;
                self.error = Some(error);
            }
        }
        true
    }

    fn ticket(&self) -> Ticket {
        Ticket {
            owner: self.owner,
            generation: self.generation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_enters_loading() {
        let mut lifecycle = RequestLifecycle::<u32>::new();
        assert_eq!(lifecycle.status(), RequestStatus::Idle);

        let ticket = lifecycle.begin();
        assert!(lifecycle.is_loading());
        assert_eq!(ticket.owner, lifecycle.owner());
    }

    #[test]
    fn only_the_latest_ticket_resolves() {
        let mut lifecycle = RequestLifecycle::<&str>::new();
        let first = lifecycle.begin();
        let second = lifecycle.begin();

        assert!(!lifecycle.resolve(first, Ok("first")));
        assert!(lifecycle.is_loading());

        assert!(lifecycle.resolve(second, Ok("second")));
        assert_eq!(lifecycle.data(), Some(&"second"));

        assert!(!lifecycle.resolve(first, Ok("first")));
        assert!(!lifecycle.resolve(second, Ok("again")));
        assert_eq!(lifecycle.data(), Some(&"second"));
    }

    #[test]
    fn error_replaces_data() {
        let mut lifecycle = RequestLifecycle::<u32>::new();
        let ticket = lifecycle.begin();
        lifecycle.resolve(ticket, Ok(1));

        let ticket = lifecycle.begin();
        assert!(lifecycle.resolve(ticket, Err(ApiError::Transport("offline".into()))));
        assert_eq!(lifecycle.status(), RequestStatus::Error);
        assert_eq!(lifecycle.data(), None);
        assert_eq!(lifecycle.error().map(ApiError::user_message), Some("offline".into()));
    }

    #[test]
    fn foreign_tickets_are_rejected() {
        let mut mine = RequestLifecycle::<u32>::new();
        let mut other = RequestLifecycle::<u32>::new();
        mine.begin();
        let foreign = other.begin();

        assert!(!mine.resolve(foreign, Ok(7)));
        assert!(mine.is_loading());
    }

    #[test]
    fn clear_and_complete_invalidate_in_flight_requests() {
        let mut lifecycle = RequestLifecycle::<u32>::new();
        let ticket = lifecycle.begin();
        lifecycle.clear();
        assert!(!lifecycle.resolve(ticket, Ok(1)));
        assert_eq!(lifecycle.status(), RequestStatus::Idle);

        let ticket = lifecycle.begin();
        lifecycle.complete(5);
        assert!(!lifecycle.resolve(ticket, Ok(1)));
        assert_eq!(lifecycle.data(), Some(&5));
    }

    #[test]
    fn disposed_lifecycle_ignores_responses() {
        let mut lifecycle = RequestLifecycle::<u32>::new();
        let ticket = lifecycle.begin();
        lifecycle.dispose();

        assert!(!lifecycle.resolve(ticket, Ok(1)));
        assert!(lifecycle.is_loading());
        assert_eq!(lifecycle.data(), None);
    }
}
