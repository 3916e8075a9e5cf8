//! Domain types shared across Tempo crates

mod artwork;
mod catalog;
mod ids;
mod track;

pub use artwork::Artwork;
pub use catalog::Catalog;
pub use ids::TrackId;
pub use track::Track;
