//! Tempo Library
//!
//! Builds the track catalog from a music folder.
//!
//! This crate provides:
//! - Recursive folder scanning (MP3, FLAC, OGG, OPUS, WAV, M4A, AAC)
//! - Tag reading with fallbacks for untagged files
//! - Artwork resolution: embedded pictures, then folder art
//!   (`folder.jpg`, `cover.jpg`, ...) with a per-directory cache
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use tempo_library::LibraryScanner;
//!
//! # fn example() -> tempo_library::Result<()> {
//! let mut scanner = LibraryScanner::new();
//! let (catalog, stats) = scanner.scan(Path::new("/music"))?;
//!
//! println!("{} tracks, {} errors", catalog.len(), stats.errors.len());
//! # Ok(())
//! # }
//! ```

mod artwork;
mod error;
mod scanner;

pub use artwork::{ArtworkConfig, ArtworkResolver, MAX_ARTWORK_SIZE};
pub use error::{LibraryError, Result};
pub use scanner::{
    relative_locator, LibraryScanner, ScanConfig, ScanStats, UNKNOWN_ALBUM, UNKNOWN_ARTIST,
};
