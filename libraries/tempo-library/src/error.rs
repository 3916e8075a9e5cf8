/// Library scanning errors
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `LibraryError`
pub type Result<T> = std::result::Result<T, LibraryError>;

/// Library error types
#[derive(Error, Debug)]
pub enum LibraryError {
    /// Scan root does not exist or is not a directory
    #[error("Music directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    /// Embedded picture exceeds the configured limit
    #[error("Artwork too large: {0} bytes (max: {1} bytes)")]
    ArtworkTooLarge(usize, usize),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Lofty error
    #[error(transparent)]
    Lofty(#[from] lofty::error::LoftyError),

    /// Core error
    #[error(transparent)]
    Core(#[from] tempo_core::CoreError),
}
