/// Music folder scanner
use crate::artwork::{ArtworkConfig, ArtworkResolver};
use crate::error::{LibraryError, Result};
use lofty::{Tag, TaggedFileExt};
use std::path::{Component, Path, PathBuf};
use tempo_core::{Catalog, Track, TrackId};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Fallback artist when a file has no artist tag
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Fallback album when a file has no album tag
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

/// Scan configuration
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Supported audio file extensions (lowercase, without dot)
    pub extensions: Vec<String>,

    /// Follow symbolic links while walking (default: true)
    pub follow_links: bool,

    /// Artwork lookup settings
    pub artwork: ArtworkConfig,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec![
                "mp3".to_string(),
                "flac".to_string(),
                "ogg".to_string(),
                "opus".to_string(),
                "wav".to_string(),
                "m4a".to_string(),
                "aac".to_string(),
            ],
            follow_links: true,
            artwork: ArtworkConfig::default(),
        }
    }
}

/// Scan statistics
#[derive(Debug, Clone, Default)]
pub struct ScanStats {
    /// Number of audio files discovered
    pub files_discovered: usize,

    /// Number of tracks added to the catalog
    pub tracks_added: usize,

    /// Number of tracks with artwork
    pub tracks_with_artwork: usize,

    /// Files that could not be read
    pub errors: Vec<(PathBuf, String)>,
}

/// Builds a catalog from a music folder
///
/// Files are visited in file-name order so ids are stable between scans
/// of an unchanged folder.
pub struct LibraryScanner {
    config: ScanConfig,
    artwork: ArtworkResolver,
}

impl LibraryScanner {
    /// Create a scanner with the default configuration
    pub fn new() -> Self {
        Self::with_config(ScanConfig::default())
    }

    /// Create a scanner with custom configuration
    pub fn with_config(config: ScanConfig) -> Self {
        let artwork = ArtworkResolver::new(config.artwork.clone());
        Self { config, artwork }
    }

    /// Scan a directory recursively for audio files
    ///
    /// Unreadable files are recorded in [`ScanStats::errors`] and skipped.
    ///
    /// # Arguments
    /// * `root` - Music directory; `file` locators are relative to it
    pub fn scan(&mut self, root: &Path) -> Result<(Catalog, ScanStats)> {
        if !root.is_dir() {
            return Err(LibraryError::DirectoryNotFound(root.to_path_buf()));
        }

        info!("Scanning {}", root.display());

        let mut stats = ScanStats::default();
        let mut tracks = Vec::new();
        let mut next_id: u32 = 0;

        for path in self.discover_files(root) {
            stats.files_discovered += 1;

            match self.process_file(root, &path, TrackId::from(next_id)) {
                Ok(track) => {
                    if track.has_artwork() {
                        stats.tracks_with_artwork += 1;
                    }
                    tracks.push(track);
                    next_id += 1;
                }
                Err(e) => {
                    warn!("Error processing file {}: {}", path.display(), e);
                    stats.errors.push((path, e.to_string()));
                }
            }
        }

        stats.tracks_added = tracks.len();
        info!(
            "Scan complete: {} tracks, {} errors",
            stats.tracks_added,
            stats.errors.len()
        );

        Ok((Catalog::new(tracks)?, stats))
    }

    /// Discover audio files below `root` in file-name order
    fn discover_files(&self, root: &Path) -> Vec<PathBuf> {
        WalkDir::new(root)
            .follow_links(self.config.follow_links)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() && self.is_supported_file(entry.path()))
            .map(walkdir::DirEntry::into_path)
            .collect()
    }

    /// Check if file is a supported audio format
    fn is_supported_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| self.config.extensions.contains(&e.to_lowercase()))
    }

    /// Read one file into a track
    fn process_file(&mut self, root: &Path, path: &Path, id: TrackId) -> Result<Track> {
        let tagged_file = lofty::read_from_path(path)?;
        let tag = tagged_file
            .primary_tag()
            .or_else(|| tagged_file.first_tag());

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let tags = tag.map(TagText::from_tag).unwrap_or_default();

        let mut track = Track::new(
            id,
            tags.title.unwrap_or(file_name),
            tags.artist.unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
            tags.album.unwrap_or_else(|| UNKNOWN_ALBUM.to_string()),
            relative_locator(root, path),
        );

        if let Some(artwork) = self.artwork.resolve(path, tag) {
            track = track.with_artwork(artwork);
        }

        debug!("Scanned {} as {}", track.file, track.id);
        Ok(track)
    }

    /// The artwork resolver used by this scanner
    pub fn artwork(&self) -> &ArtworkResolver {
        &self.artwork
    }
}

impl Default for LibraryScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Text fields read from a tag
#[derive(Debug, Default)]
struct TagText {
    title: Option<String>,
    artist: Option<String>,
    album: Option<String>,
}

impl TagText {
    fn from_tag(tag: &Tag) -> Self {
        let mut text = Self::default();

        // lofty 0.18 API - iterate through items
        for item in tag.items() {
            let value = item
                .value()
                .text()
                .filter(|s| !s.trim().is_empty())
                .map(ToString::to_string);
            match item.key() {
                lofty::ItemKey::TrackTitle => text.title = text.title.or(value),
                lofty::ItemKey::TrackArtist => text.artist = text.artist.or(value),
                lofty::ItemKey::AlbumTitle => text.album = text.album.or(value),
                _ => {}
            }
        }

        text
    }
}

/// Path of `path` relative to `root`, joined with forward slashes
pub fn relative_locator(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
