//! Terminal collaborators for the player controller
//!
//! There is no audio device here: the backend keeps a transport clock and
//! reads track durations from the files, the media session reports
//! now-playing changes through tracing.

use lofty::AudioFile;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempo_playback::{AudioBackend, MediaMetadata, MediaSessionBridge, PlaybackError, Result};
use tracing::{debug, info};

/// Transport clock standing in for an audio device
pub struct TerminalBackend {
    music_dir: PathBuf,
    source: Option<PathBuf>,
    duration: Option<f64>,
    /// Position accumulated before the current play segment
    offset: f64,
    /// Start of the current play segment
    started: Option<Instant>,
}

impl TerminalBackend {
    /// Create a backend resolving `file` locators against `music_dir`
    pub fn new(music_dir: impl Into<PathBuf>) -> Self {
        Self {
            music_dir: music_dir.into(),
            source: None,
            duration: None,
            offset: 0.0,
            started: None,
        }
    }

    /// Loaded file, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Whether the clock is running
    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    /// Whether the clock has passed the end of the track
    pub fn has_ended(&self) -> bool {
        self.duration
            .is_some_and(|duration| self.current_time() >= duration)
    }

    fn read_duration(path: &Path) -> Option<f64> {
        match lofty::read_from_path(path) {
            Ok(tagged_file) => Some(tagged_file.properties().duration().as_secs_f64()),
            Err(e) => {
                debug!("No duration for {}: {}", path.display(), e);
                None
            }
        }
    }
}

impl AudioBackend for TerminalBackend {
    fn set_source(&mut self, file: &str) -> Result<()> {
        let path = self.music_dir.join(file);
        if !path.is_file() {
            return Err(PlaybackError::Backend(format!(
                "File not found: {}",
                path.display()
            )));
        }

        self.duration = Self::read_duration(&path);
        self.source = Some(path);
        self.offset = 0.0;
        self.started = None;
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        if self.source.is_none() {
            return Err(PlaybackError::Backend("No source loaded".to_string()));
        }
        if self.started.is_none() {
            self.started = Some(Instant::now());
        }
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.offset = self.current_time();
        self.started = None;
        Ok(())
    }

    fn seek_to(&mut self, fraction: f64) -> Result<()> {
        let duration = self.duration.unwrap_or(0.0);
        self.offset = duration * fraction;
        if self.started.is_some() {
            self.started = Some(Instant::now());
        }
        Ok(())
    }

    fn current_time(&self) -> f64 {
        let running = self
            .started
            .map_or(0.0, |started| started.elapsed().as_secs_f64());
        let position = self.offset + running;
        match self.duration {
            Some(duration) => position.min(duration),
            None => position,
        }
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }
}

/// Media session that announces now-playing changes in the log
#[derive(Debug, Default)]
pub struct LogMediaSession;

impl MediaSessionBridge for LogMediaSession {
    fn set_metadata(&mut self, metadata: &MediaMetadata) -> Result<()> {
        info!(
            "Now playing: {} - {} ({}){}",
            metadata.title,
            metadata.artist,
            metadata.album,
            if metadata.artwork.is_some() {
                " [artwork]"
            } else {
                ""
            }
        );
        Ok(())
    }

    fn set_playback_state(&mut self, playing: bool) -> Result<()> {
        debug!("Media session state: {}", if playing { "playing" } else { "paused" });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn set_source_rejects_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = TerminalBackend::new(dir.path());

        assert!(matches!(
            backend.set_source("missing.mp3"),
            Err(PlaybackError::Backend(_))
        ));
    }

    #[test]
    fn unreadable_file_has_no_duration() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("song.mp3"), b"junk").unwrap();
        let mut backend = TerminalBackend::new(dir.path());

        backend.set_source("song.mp3").unwrap();

        assert_eq!(backend.source(), Some(dir.path().join("song.mp3").as_path()));
        assert!(backend.duration().is_none());
        assert!(!backend.has_ended());
    }

    #[test]
    fn play_and_pause_drive_the_clock() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("song.mp3"), b"junk").unwrap();
        let mut backend = TerminalBackend::new(dir.path());

        assert!(backend.play().is_err());

        backend.set_source("song.mp3").unwrap();
        backend.play().unwrap();
        assert!(backend.is_running());

        backend.pause().unwrap();
        assert!(!backend.is_running());
        let paused_at = backend.current_time();
        assert_eq!(backend.current_time(), paused_at);
    }
}
