//! Core types for playback management

use serde::{Deserialize, Serialize};
use tempo_core::{Track, TrackId};

/// One row of the rendered queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueEntry<'a> {
    /// Position in the queue
    pub position: usize,

    /// Resolved catalog track
    pub track: &'a Track,

    /// Whether the cursor points at this row
    pub is_current: bool,
}

/// Owned copy of the queue state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueSnapshot {
    /// Play order
    pub queue: Vec<TrackId>,

    /// Last non-shuffled order
    pub canonical: Vec<TrackId>,

    /// Cursor (None = nothing loaded)
    pub current_index: Option<usize>,

    /// Shuffle flag
    pub shuffled: bool,

    /// Repeat flag
    pub repeat: bool,
}

/// Configuration for the player controller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Fixed seed for shuffle (default: None, seeded from entropy)
    pub shuffle_seed: Option<u64>,

    /// Initial repeat flag (default: false)
    pub repeat: bool,
}

/// Format a position in seconds as `m:ss`
///
/// Negative and non-finite inputs render as `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }

    let minutes = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    format!("{}:{:02}", minutes, secs)
}
