/// Track domain type
use crate::types::{Artwork, TrackId};
use serde::{Deserialize, Serialize};

/// Audio track
///
/// Immutable once it is part of a catalog. The playback engine only ever
/// refers to tracks by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name
    pub album: String,

    /// Playable resource locator, relative to the library root
    pub file: String,

    /// Cover image, if any
    #[serde(default)]
    pub artwork: Option<Artwork>,
}

impl Track {
    /// Create a new track without artwork
    pub fn new(
        id: TrackId,
        title: impl Into<String>,
        artist: impl Into<String>,
        album: impl Into<String>,
        file: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            artist: artist.into(),
            album: album.into(),
            file: file.into(),
            artwork: None,
        }
    }

    /// Attach artwork
    #[must_use]
    pub fn with_artwork(mut self, artwork: Artwork) -> Self {
        self.artwork = Some(artwork);
        self
    }

    /// Check whether the track carries artwork
    pub fn has_artwork(&self) -> bool {
        self.artwork.is_some()
    }
}
