/// Read-only track catalog
use crate::error::{CoreError, Result};
use crate::types::{Track, TrackId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Ordered, read-only collection of tracks indexed by id
///
/// Built once at startup by a loader and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Track>", into = "Vec<Track>")]
pub struct Catalog {
    tracks: Vec<Track>,
    index: HashMap<TrackId, usize>,
}

impl Catalog {
    /// Build a catalog, preserving the given order
    ///
    /// Fails if two tracks share an id.
    pub fn new(tracks: Vec<Track>) -> Result<Self> {
        let mut index = HashMap::with_capacity(tracks.len());
        for (position, track) in tracks.iter().enumerate() {
            if index.insert(track.id.clone(), position).is_some() {
                return Err(CoreError::DuplicateTrack(track.id.clone()));
            }
        }

        Ok(Self { tracks, index })
    }

    /// Parse a catalog from its JSON array form
    pub fn from_json(json: &str) -> Result<Self> {
        let tracks: Vec<Track> = serde_json::from_str(json)?;
        Self::new(tracks)
    }

    /// Serialize the catalog as a JSON array
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.tracks)?)
    }

    /// Read a catalog JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Write the catalog as a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Look up a track by id
    pub fn get(&self, id: &TrackId) -> Option<&Track> {
        self.index.get(id).map(|&position| &self.tracks[position])
    }

    /// Look up a track by id, failing if it is absent
    pub fn require(&self, id: &TrackId) -> Result<&Track> {
        self.get(id)
            .ok_or_else(|| CoreError::TrackNotFound(id.clone()))
    }

    /// Check if a track id exists
    pub fn contains(&self, id: &TrackId) -> bool {
        self.index.contains_key(id)
    }

    /// Track ids in catalog order
    pub fn ids(&self) -> Vec<TrackId> {
        self.tracks.iter().map(|t| t.id.clone()).collect()
    }

    /// All tracks in catalog order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

impl TryFrom<Vec<Track>> for Catalog {
    type Error = CoreError;

    fn try_from(tracks: Vec<Track>) -> Result<Self> {
        Self::new(tracks)
    }
}

impl From<Catalog> for Vec<Track> {
    fn from(catalog: Catalog) -> Self {
        catalog.tracks
    }
}
