//! Core error types for Tempo

use crate::types::TrackId;
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Tempo
#[derive(Error, Debug)]
pub enum CoreError {
    /// The same track id appeared twice in a catalog
    #[error("Duplicate track id: {0}")]
    DuplicateTrack(TrackId),

    /// Track not found
    #[error("Track not found: {0}")]
    TrackNotFound(TrackId),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

