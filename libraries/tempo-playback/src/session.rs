//! OS media session integration
//!
//! Publishes now-playing metadata and maps hardware/OS transport keys back
//! onto controller operations.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use tempo_core::{Artwork, Track};

/// Now-playing metadata shown by the OS
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaMetadata {
    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name
    pub album: String,

    /// Cover image
    pub artwork: Option<Artwork>,
}

impl From<&Track> for MediaMetadata {
    fn from(track: &Track) -> Self {
        Self {
            title: track.title.clone(),
            artist: track.artist.clone(),
            album: track.album.clone(),
            artwork: track.artwork.clone(),
        }
    }
}

/// Transport controls raised by the OS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaAction {
    /// Resume playback
    Play,

    /// Pause playback
    Pause,

    /// Skip back one track
    PreviousTrack,

    /// Skip forward one track
    NextTrack,
}

/// Bridge to the platform media session
pub trait MediaSessionBridge: Send {
    /// Publish metadata for a newly loaded track
    fn set_metadata(&mut self, metadata: &MediaMetadata) -> Result<()>;

    /// Publish playing/paused state
    fn set_playback_state(&mut self, playing: bool) -> Result<()>;
}
