//! Error types for playback management

use tempo_core::TrackId;
use thiserror::Error;

/// Playback errors
///
/// Queue operations themselves never fail; these cover lookups by the
/// controller and failures reported by its collaborators.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Track id is not in the catalog
    #[error("Track not found: {0}")]
    TrackNotFound(TrackId),

    /// Index out of bounds
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    /// Audio backend error
    #[error("Audio backend error: {0}")]
    Backend(String),

    /// Media session error
    #[error("Media session error: {0}")]
    MediaSession(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
