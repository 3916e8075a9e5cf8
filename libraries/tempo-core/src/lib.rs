//! Tempo Core
//!
//! Platform-agnostic core types and error handling for Tempo.
//!
//! This crate provides the foundational building blocks shared by the
//! playback engine, the library scanner and the command-line player.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Artwork`, `Catalog`
//! - **Identifiers**: `TrackId`
//! - **Error Handling**: Unified `CoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use tempo_core::{Catalog, Track, TrackId};
//!
//! let catalog = Catalog::new(vec![
//!     Track::new(TrackId::from(0), "Intro", "Artist", "Album", "album/01.mp3"),
//!     Track::new(TrackId::from(1), "Outro", "Artist", "Album", "album/02.mp3"),
//! ])
//! .unwrap();
//!
//! assert_eq!(catalog.len(), 2);
//! assert_eq!(catalog.get(&TrackId::from(1)).unwrap().title, "Outro");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use types::{Artwork, Catalog, Track, TrackId};
