//! Playback Events
//!
//! Event-based communication for UI synchronization. The controller queues
//! an event after each state change; renderers drain them and redraw.

use serde::{Deserialize, Serialize};
use tempo_core::TrackId;

/// Events emitted by the player controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Playing/paused state changed
    StateChanged {
        /// Whether audio is now playing
        playing: bool,
    },

    /// A different track was loaded
    TrackChanged {
        /// ID of the new (current) track
        track_id: TrackId,
        /// ID of the previously loaded track (if any)
        previous_track_id: Option<TrackId>,
    },

    /// Queue changed (seeded, enqueued, shuffled, reordered)
    QueueChanged {
        /// New queue length
        length: usize,
        /// New cursor position
        current_index: Option<usize>,
    },

    /// Shuffle toggled
    ShuffleChanged {
        /// New shuffle flag
        shuffled: bool,
    },

    /// Repeat toggled
    RepeatChanged {
        /// New repeat flag
        repeat: bool,
    },

    /// A collaborator reported an error
    Error {
        /// Error message
        message: String,
    },
}
