//! Platform-agnostic audio output trait
//!
//! Abstracts the audio element the controller drives (an HTML audio tag,
//! a native decoder, or a stub in tests).

use crate::error::Result;

/// Transport for a single audio stream
///
/// Implementors load a resource and report position; the controller
/// decides what to load and when. Calls are fire-and-forget: the
/// controller never waits for playback to actually start.
pub trait AudioBackend: Send {
    /// Load a playable resource (a catalog `file` locator)
    fn set_source(&mut self, file: &str) -> Result<()>;

    /// Start or resume playback of the loaded source
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self) -> Result<()>;

    /// Seek to a fraction of the track duration
    ///
    /// # Arguments
    /// * `fraction` - Target position in `0.0..=1.0`
    fn seek_to(&mut self, fraction: f64) -> Result<()>;

    /// Current playback position in seconds
    fn current_time(&self) -> f64;

    /// Track duration in seconds, once known
    fn duration(&self) -> Option<f64>;

    /// Rewind to the beginning of the track
    ///
    /// Equivalent to `seek_to(0.0)`
    fn restart(&mut self) -> Result<()> {
        self.seek_to(0.0)
    }
}
