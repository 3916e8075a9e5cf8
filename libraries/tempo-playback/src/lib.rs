//! Tempo - Playback Management
//!
//! Platform-agnostic playback queue and transport control for Tempo.
//!
//! This crate provides:
//! - A play queue with a cursor that wraps in both directions
//! - "Play next" insertion that never duplicates a track
//! - Reversible shuffle anchored on the playing track
//! - Drag-and-drop reordering that keeps the cursor on the playing track
//! - Repeat of the current track
//! - A controller that drives an audio backend and an OS media session
//!
//! # Architecture
//!
//! `tempo-playback` is completely platform-agnostic. Audio output and the
//! OS media session are provided via the [`AudioBackend`] and
//! [`MediaSessionBridge`] traits; randomness via [`Shuffler`].
//!
//! # Example: Queue Store
//!
//! ```rust
//! use tempo_core::TrackId;
//! use tempo_playback::QueueStore;
//!
//! let ids: Vec<TrackId> = ["A", "B", "C"].into_iter().map(TrackId::from).collect();
//!
//! let mut store = QueueStore::new();
//! store.seed(&ids[0], &ids);
//! store.enqueue(ids[2].clone());
//!
//! assert_eq!(store.queue(), &[ids[0].clone(), ids[2].clone(), ids[1].clone()]);
//! assert_eq!(store.advance(), Some(&ids[2]));
//! ```
//!
//! # Example: Platform Integration
//!
//! ```rust,no_run
//! use tempo_core::{Catalog, TrackId};
//! use tempo_playback::{AudioBackend, PlayerConfig, PlayerController, Result};
//!
//! struct MyAudioElement {
//!     // ... platform-specific player
//! }
//!
//! impl AudioBackend for MyAudioElement {
//!     fn set_source(&mut self, file: &str) -> Result<()> {
//!         Ok(())
//!     }
//!     fn play(&mut self) -> Result<()> {
//!         Ok(())
//!     }
//!     fn pause(&mut self) -> Result<()> {
//!         Ok(())
//!     }
//!     fn seek_to(&mut self, fraction: f64) -> Result<()> {
//!         Ok(())
//!     }
//!     fn current_time(&self) -> f64 {
//!         0.0
//!     }
//!     fn duration(&self) -> Option<f64> {
//!         None
//!     }
//! }
//!
//! let catalog = Catalog::from_json(r#"[]"#).unwrap();
//! let mut player = PlayerController::new(catalog, MyAudioElement {}, PlayerConfig::default());
//! player.select_track(&TrackId::from(0)).ok();
//! player.next().ok();
//! ```

mod backend;
mod controller;
mod error;
pub mod events;
mod queue;
mod reorder;
mod session;
mod shuffle;
pub mod types;

// Public exports
pub use backend::AudioBackend;
pub use controller::PlayerController;
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use queue::QueueStore;
pub use session::{MediaAction, MediaMetadata, MediaSessionBridge};
pub use shuffle::{RandomShuffler, Shuffler};
pub use types::{format_time, PlayerConfig, QueueEntry, QueueSnapshot};
