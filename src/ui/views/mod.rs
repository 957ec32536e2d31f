pub mod search;
pub mod track_detail;

pub use search::Search;
pub use track_detail::TrackDetail;
