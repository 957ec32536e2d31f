pub mod track;

pub use track::{CatalogResponse, Track};
