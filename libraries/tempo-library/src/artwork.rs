use crate::error::{LibraryError, Result};
use lofty::{PictureType, Tag};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tempo_core::Artwork;
use tracing::{debug, warn};

/// Maximum embedded artwork size (5MB)
pub const MAX_ARTWORK_SIZE: usize = 5 * 1024 * 1024;

/// Folder art is stored without a MIME type; these names are all JPEG
const FOLDER_ART_MIME: &str = "image/jpeg";

/// Artwork lookup configuration
#[derive(Debug, Clone)]
pub struct ArtworkConfig {
    /// Number of directories whose folder-art lookup is remembered
    pub cache_size: usize,

    /// Largest embedded picture accepted, in bytes
    pub max_bytes: usize,

    /// File names checked, in order, when a track has no embedded picture
    pub folder_art_names: Vec<String>,
}

impl Default for ArtworkConfig {
    fn default() -> Self {
        Self {
            cache_size: 256,
            max_bytes: MAX_ARTWORK_SIZE,
            folder_art_names: vec![
                "folder.jpg".to_string(),
                "cover.jpg".to_string(),
                "albumart.jpg".to_string(),
                "front.jpg".to_string(),
            ],
        }
    }
}

/// Finds cover art for audio files
///
/// Embedded pictures win; otherwise the first folder-art file in the
/// track's directory is used. Folder lookups are cached per directory,
/// including directories that have none.
pub struct ArtworkResolver {
    config: ArtworkConfig,
    folder_cache: LruCache<PathBuf, Option<PathBuf>>,
}

impl ArtworkResolver {
    /// Create a resolver with the given configuration
    pub fn new(config: ArtworkConfig) -> Self {
        let capacity = NonZeroUsize::new(config.cache_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            config,
            folder_cache: LruCache::new(capacity),
        }
    }

    /// Resolve artwork for an audio file whose tag has already been read
    ///
    /// Errors are logged and treated as "no artwork" so one bad picture
    /// never drops a track from the catalog.
    pub fn resolve(&mut self, audio_path: &Path, tag: Option<&Tag>) -> Option<Artwork> {
        if let Some(tag) = tag {
            match self.embedded(tag) {
                Ok(Some(artwork)) => return Some(artwork),
                Ok(None) => {}
                Err(e) => warn!("Skipping embedded art in {}: {}", audio_path.display(), e),
            }
        }

        let directory = audio_path.parent()?;
        match self.folder_art(directory) {
            Ok(artwork) => artwork,
            Err(e) => {
                warn!("Failed to read folder art in {}: {}", directory.display(), e);
                None
            }
        }
    }

    /// Extract the embedded picture from a tag
    ///
    /// Prefers the front cover, otherwise the first picture.
    pub fn embedded(&self, tag: &Tag) -> Result<Option<Artwork>> {
        let pictures = tag.pictures();

        let Some(picture) = pictures
            .iter()
            .find(|p| matches!(p.pic_type(), PictureType::CoverFront))
            .or_else(|| pictures.first())
        else {
            return Ok(None);
        };

        let data = picture.data();
        if data.len() > self.config.max_bytes {
            return Err(LibraryError::ArtworkTooLarge(
                data.len(),
                self.config.max_bytes,
            ));
        }

        let mime = picture
            .mime_type()
            .map_or_else(|| FOLDER_ART_MIME.to_string(), |m| m.as_str().to_string());

        Ok(Some(Artwork::new(mime, data.to_vec())))
    }

    /// Load folder art for a directory
    pub fn folder_art(&mut self, directory: &Path) -> Result<Option<Artwork>> {
        let Some(path) = self.find_folder_art(directory) else {
            return Ok(None);
        };

        let data = std::fs::read(&path)?;
        Ok(Some(Artwork::new(FOLDER_ART_MIME, data)))
    }

    /// Locate the folder-art file for a directory, consulting the cache
    pub fn find_folder_art(&mut self, directory: &Path) -> Option<PathBuf> {
        if let Some(cached) = self.folder_cache.get(directory) {
            return cached.clone();
        }

        let found = self
            .config
            .folder_art_names
            .iter()
            .map(|name| directory.join(name))
            .find(|candidate| candidate.is_file());

        debug!(
            "Folder art for {}: {:?}",
            directory.display(),
            found.as_ref().map(|p| p.display().to_string())
        );

        self.folder_cache
            .put(directory.to_path_buf(), found.clone());
        found
    }

    /// Number of directories currently cached
    pub fn cached_directories(&self) -> usize {
        self.folder_cache.len()
    }

    /// Forget all cached folder lookups
    pub fn clear_cache(&mut self) {
        self.folder_cache.clear();
    }
}

impl Default for ArtworkResolver {
    fn default() -> Self {
        Self::new(ArtworkConfig::default())
    }
}
