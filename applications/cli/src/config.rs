/// Player configuration
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tempo_library::{ArtworkConfig, ScanConfig, MAX_ARTWORK_SIZE};
use tempo_playback::PlayerConfig;

/// Config file read when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "tempo.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TempoConfig {
    #[serde(default = "default_library")]
    pub library: LibrarySettings,

    #[serde(default = "default_artwork")]
    pub artwork: ArtworkSettings,

    #[serde(default = "default_playback")]
    pub playback: PlaybackSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibrarySettings {
    /// Folder scanned for audio; `file` locators are relative to it
    pub music_dir: Option<PathBuf>,

    /// Pre-built catalog JSON, used instead of scanning
    pub catalog_file: Option<PathBuf>,

    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtworkSettings {
    #[serde(default = "default_cache_size")]
    pub cache_size: usize,

    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    #[serde(default = "default_folder_art_names")]
    pub folder_art_names: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlaybackSettings {
    /// Fixed shuffle seed for reproducible sessions
    pub shuffle_seed: Option<u64>,

    #[serde(default)]
    pub repeat: bool,
}

impl TempoConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `tempo.toml` in the working
    /// directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) if !path.exists() => {
                return Err(CliError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Some(path) => {
                settings = settings.add_source(config::File::from(path));
            }
            None => {
                let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        // Override with environment variables (e.g. TEMPO_LIBRARY__MUSIC_DIR)
        settings = settings.add_source(
            config::Environment::with_prefix("TEMPO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        Ok(settings.build()?.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        match (&self.library.catalog_file, &self.library.music_dir) {
            (Some(catalog), _) if !catalog.is_file() => {
                return Err(CliError::Config(format!(
                    "Catalog file not found at {:?}",
                    catalog
                )));
            }
            (None, Some(dir)) if !dir.is_dir() => {
                return Err(CliError::Config(format!(
                    "Music directory not found at {:?}",
                    dir
                )));
            }
            (None, None) => {
                return Err(CliError::Config(
                    "A music directory or catalog file is required (set TEMPO_LIBRARY__MUSIC_DIR)"
                        .to_string(),
                ));
            }
            _ => {}
        }

        if self.library.extensions.is_empty() {
            return Err(CliError::Config(
                "At least one audio extension is required".to_string(),
            ));
        }

        Ok(())
    }

    /// Scanner settings derived from this configuration
    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            extensions: self
                .library
                .extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
            artwork: ArtworkConfig {
                cache_size: self.artwork.cache_size,
                max_bytes: self.artwork.max_bytes,
                folder_art_names: self.artwork.folder_art_names.clone(),
            },
            ..ScanConfig::default()
        }
    }

    /// Controller settings derived from this configuration
    pub fn player_config(&self) -> PlayerConfig {
        PlayerConfig {
            shuffle_seed: self.playback.shuffle_seed,
            repeat: self.playback.repeat,
        }
    }
}

// Default values
fn default_library() -> LibrarySettings {
    LibrarySettings {
        music_dir: None,
        catalog_file: None,
        extensions: default_extensions(),
    }
}

fn default_extensions() -> Vec<String> {
    ScanConfig::default().extensions
}

fn default_artwork() -> ArtworkSettings {
    ArtworkSettings {
        cache_size: default_cache_size(),
        max_bytes: default_max_bytes(),
        folder_art_names: default_folder_art_names(),
    }
}

fn default_cache_size() -> usize {
    256
}

fn default_max_bytes() -> usize {
    MAX_ARTWORK_SIZE
}

fn default_folder_art_names() -> Vec<String> {
    ArtworkConfig::default().folder_art_names
}

fn default_playback() -> PlaybackSettings {
    PlaybackSettings::default()
}

impl Default for TempoConfig {
    fn default() -> Self {
        Self {
            library: default_library(),
            artwork: default_artwork(),
            playback: default_playback(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_match_library_defaults() {
        let config = TempoConfig::default();

        assert_eq!(config.library.extensions, ScanConfig::default().extensions);
        assert_eq!(config.artwork.max_bytes, MAX_ARTWORK_SIZE);
        assert_eq!(config.artwork.folder_art_names[0], "folder.jpg");
        assert!(config.playback.shuffle_seed.is_none());
        assert!(!config.playback.repeat);
    }

    #[test]
    fn validate_requires_a_catalog_source() {
        let config = TempoConfig::default();
        assert!(matches!(config.validate(), Err(CliError::Config(_))));
    }

    #[test]
    fn validate_accepts_existing_music_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = TempoConfig::default();
        config.library.music_dir = Some(dir.path().to_path_buf());

        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_missing_catalog_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = TempoConfig::default();
        config.library.catalog_file = Some(dir.path().join("missing.json"));

        assert!(config.validate().is_err());
    }

    #[test]
    fn load_reads_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tempo.toml");
        fs::write(
            &path,
            r#"
[library]
music_dir = "/srv/music"
extensions = ["mp3", ".FLAC"]

[playback]
shuffle_seed = 7
repeat = true
"#,
        )
        .unwrap();

        let config = TempoConfig::load(Some(&path)).unwrap();

        assert_eq!(config.library.music_dir, Some(PathBuf::from("/srv/music")));
        assert_eq!(config.playback.shuffle_seed, Some(7));
        assert!(config.playback.repeat);
        assert_eq!(config.artwork.cache_size, 256);
        assert_eq!(config.scan_config().extensions, vec!["mp3", "flac"]);
        assert_eq!(config.player_config().shuffle_seed, Some(7));
    }

    #[test]
    fn load_rejects_missing_explicit_file() {
        let result = TempoConfig::load(Some(Path::new("/nonexistent/tempo.toml")));
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
