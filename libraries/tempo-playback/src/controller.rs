//! Player controller - core orchestration
//!
//! Turns discrete user/system events (select, enqueue, next, track ended,
//! drag-and-drop commit, OS transport keys) into exactly one queue
//! mutation each, then drives the audio backend and media session from the
//! resulting state.
//!
//! Collaborator failures are reported after the queue mutation has
//! completed, so a failing backend never leaves the queue half-updated.

use crate::{
    backend::AudioBackend,
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    queue::QueueStore,
    session::{MediaAction, MediaMetadata, MediaSessionBridge},
    shuffle::{RandomShuffler, Shuffler},
    types::{PlayerConfig, QueueEntry, QueueSnapshot},
};
use tempo_core::{Catalog, Track, TrackId};
use tracing::{debug, info, warn};

/// Central playback control
///
/// Owns the catalog and the queue; the backend and media session are
/// driven from the queue state after every operation.
pub struct PlayerController<B: AudioBackend> {
    catalog: Catalog,
    store: QueueStore,
    shuffler: Box<dyn Shuffler + Send>,

    backend: B,
    media_session: Option<Box<dyn MediaSessionBridge>>,

    is_playing: bool,
    loaded_track: Option<TrackId>,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl<B: AudioBackend> PlayerController<B> {
    /// Create a new controller over a loaded catalog
    pub fn new(catalog: Catalog, backend: B, config: PlayerConfig) -> Self {
        let shuffler = match config.shuffle_seed {
            Some(seed) => RandomShuffler::seeded(seed),
            None => RandomShuffler::from_entropy(),
        };

        info!("Player ready with {} tracks", catalog.len());

        Self {
            catalog,
            store: QueueStore::with_repeat(config.repeat),
            shuffler: Box::new(shuffler),
            backend,
            media_session: None,
            is_playing: false,
            loaded_track: None,
            pending_events: Vec::new(),
        }
    }

    /// Replace the shuffle permutation source
    #[must_use]
    pub fn with_shuffler(mut self, shuffler: impl Shuffler + Send + 'static) -> Self {
        self.shuffler = Box::new(shuffler);
        self
    }

    /// Attach an OS media session
    #[must_use]
    pub fn with_media_session(mut self, session: impl MediaSessionBridge + 'static) -> Self {
        self.media_session = Some(Box::new(session));
        self
    }

    // ===== Queue Operations =====

    /// Play a track from the catalog
    ///
    /// Discards the current queue and starts a new one: the selected track
    /// followed by the rest of the catalog in catalog order.
    pub fn select_track(&mut self, id: &TrackId) -> Result<()> {
        self.ensure_in_catalog(id)?;

        let was_shuffled = self.store.is_shuffled();
        self.store.seed(id, &self.catalog.ids());
        if was_shuffled {
            self.emit(PlaybackEvent::ShuffleChanged { shuffled: false });
        }
        self.emit_queue_changed();

        self.load_current()?;
        self.play()
    }

    /// Queue a track to play after the current one
    ///
    /// When nothing is loaded yet the track becomes current and is loaded
    /// without starting playback.
    pub fn enqueue(&mut self, id: &TrackId) -> Result<()> {
        self.ensure_in_catalog(id)?;

        let was_loaded = self.store.current_index().is_some();
        self.store.enqueue(id.clone());
        self.emit_queue_changed();

        if was_loaded {
            Ok(())
        } else {
            self.load_current()
        }
    }

    /// Toggle shuffle, returning the new flag
    pub fn toggle_shuffle(&mut self) -> bool {
        let shuffled = self.store.toggle_shuffle(&mut *self.shuffler);
        self.emit(PlaybackEvent::ShuffleChanged { shuffled });
        self.emit_queue_changed();
        self.release_dropped_track();
        shuffled
    }

    /// Toggle repeat of the current track, returning the new flag
    pub fn toggle_repeat(&mut self) -> bool {
        let repeat = self.store.toggle_repeat();
        self.emit(PlaybackEvent::RepeatChanged { repeat });
        repeat
    }

    /// Apply the order committed by a drag-and-drop gesture
    ///
    /// The caller must pass the final order only once the drag has settled.
    /// Audio is not interrupted; the cursor follows the playing track.
    /// If the new order leaves the playing track out, playback stops.
    pub fn apply_permutation(&mut self, new_order: &[TrackId]) {
        self.store.apply_permutation(new_order, &self.catalog);
        self.emit_queue_changed();
        self.release_dropped_track();
    }

    /// Move one queue row to another position
    ///
    /// Convenience for renderers that report a single drag as (from, to).
    pub fn move_track(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.store.len();
        if from >= len {
            return Err(PlaybackError::IndexOutOfBounds(from));
        }
        if to >= len {
            return Err(PlaybackError::IndexOutOfBounds(to));
        }

        let mut order = self.store.queue().to_vec();
        let moved = order.remove(from);
        order.insert(to, moved);
        self.apply_permutation(&order);
        Ok(())
    }

    // ===== Playback Control =====

    /// Start or resume playback
    ///
    /// Does nothing when no track is loaded.
    pub fn play(&mut self) -> Result<()> {
        if self.store.current_index().is_none() {
            return Ok(());
        }

        self.is_playing = true;
        self.emit(PlaybackEvent::StateChanged { playing: true });

        let result = self.backend.play();
        self.report(result)?;
        self.publish_playback_state(true)
    }

    /// Pause playback
    pub fn pause(&mut self) -> Result<()> {
        self.is_playing = false;
        self.emit(PlaybackEvent::StateChanged { playing: false });

        let result = self.backend.pause();
        self.report(result)?;
        self.publish_playback_state(false)
    }

    /// Play/pause button
    ///
    /// With nothing loaded and a non-empty queue, loads the first track
    /// and starts it.
    pub fn toggle_play_pause(&mut self) -> Result<()> {
        if self.store.current_index().is_none() {
            if self.store.start().is_none() {
                return Ok(());
            }
            self.load_current()?;
            return self.play();
        }

        if self.is_playing {
            self.pause()
        } else {
            self.play()
        }
    }

    /// Skip to the next track, wrapping to the start
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<()> {
        if self.store.advance().is_none() {
            return Ok(());
        }
        self.load_current()?;
        self.play()
    }

    /// Go back one track, wrapping to the end
    pub fn previous(&mut self) -> Result<()> {
        if self.store.retreat().is_none() {
            return Ok(());
        }
        self.load_current()?;
        self.play()
    }

    /// Handle the backend's end-of-track notification
    ///
    /// With repeat on, the same track restarts; otherwise playback moves on.
    pub fn on_track_ended(&mut self) -> Result<()> {
        if self.store.is_repeat() && self.store.current_index().is_some() {
            debug!("Repeating current track");
            let result = self.backend.restart();
            self.report(result)?;
            return self.play();
        }

        self.next()
    }

    /// Seek within the current track
    ///
    /// # Arguments
    /// * `fraction` - Target position, clamped to `0.0..=1.0`
    pub fn seek_to_fraction(&mut self, fraction: f64) -> Result<()> {
        if self.store.current_index().is_none() {
            return Ok(());
        }

        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        let result = self.backend.seek_to(fraction);
        self.report(result)
    }

    /// Handle an OS transport control
    pub fn handle_media_action(&mut self, action: MediaAction) -> Result<()> {
        debug!("Media action {:?}", action);
        match action {
            MediaAction::Play => self.play(),
            MediaAction::Pause => self.pause(),
            MediaAction::PreviousTrack => self.previous(),
            MediaAction::NextTrack => self.next(),
        }
    }

    // ===== State Queries =====

    /// Currently loaded track
    pub fn current_track(&self) -> Option<&Track> {
        self.store.current_track(&self.catalog)
    }

    /// Queue rows for rendering
    pub fn queue_entries(&self) -> Vec<QueueEntry<'_>> {
        self.store.entries(&self.catalog)
    }

    /// Read-only queue state
    pub fn queue_store(&self) -> &QueueStore {
        &self.store
    }

    /// Owned copy of the queue state for persistence or remote UIs
    pub fn snapshot(&self) -> QueueSnapshot {
        self.store.snapshot()
    }

    /// The catalog this player was built over
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Whether audio is playing
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Playback progress as a fraction of the duration
    ///
    /// None until the backend knows the duration.
    pub fn progress(&self) -> Option<f64> {
        match self.backend.duration() {
            Some(duration) if duration > 0.0 => {
                Some((self.backend.current_time() / duration).clamp(0.0, 1.0))
            }
            _ => None,
        }
    }

    /// The audio backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the audio backend
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// The UI should call this after each operation to redraw.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internals =====

    fn ensure_in_catalog(&self, id: &TrackId) -> Result<()> {
        if self.catalog.contains(id) {
            Ok(())
        } else {
            Err(PlaybackError::TrackNotFound(id.clone()))
        }
    }

    /// Push the current track to the backend and media session
    fn load_current(&mut self) -> Result<()> {
        let Some(track) = self.store.current_track(&self.catalog) else {
            return Ok(());
        };
        let track_id = track.id.clone();
        let file = track.file.clone();
        let metadata = MediaMetadata::from(track);

        debug!("Loading track {} ({})", track_id, file);

        let previous_track_id = self.loaded_track.replace(track_id.clone());
        self.emit(PlaybackEvent::TrackChanged {
            track_id,
            previous_track_id,
        });

        let result = self.backend.set_source(&file);
        self.report(result)?;

        if let Some(session) = self.media_session.as_mut() {
            let result = session.set_metadata(&metadata);
            self.report(result)?;
        }
        Ok(())
    }

    /// Stop the backend once the loaded track has left the queue
    ///
    /// Failures are logged and queued as `Error` events; the queue change
    /// itself has already happened.
    fn release_dropped_track(&mut self) {
        if self.store.current_index().is_some() {
            return;
        }
        let Some(track_id) = self.loaded_track.take() else {
            return;
        };

        info!("Track {} left the queue, stopping playback", track_id);
        self.is_playing = false;
        self.emit(PlaybackEvent::StateChanged { playing: false });

        let result = self.backend.pause();
        if self.report(result).is_ok() {
            let _ = self.publish_playback_state(false);
        }
    }

    fn publish_playback_state(&mut self, playing: bool) -> Result<()> {
        if let Some(session) = self.media_session.as_mut() {
            let result = session.set_playback_state(playing);
            self.report(result)?;
        }
        Ok(())
    }

    /// Log a collaborator failure and surface it as an event
    fn report<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(ref e) = result {
            warn!("Collaborator error: {}", e);
            self.emit(PlaybackEvent::Error {
                message: e.to_string(),
            });
        }
        result
    }

    fn emit(&mut self, event: PlaybackEvent) {
        self.pending_events.push(event);
    }

    fn emit_queue_changed(&mut self) {
        self.emit(PlaybackEvent::QueueChanged {
            length: self.store.len(),
            current_index: self.store.current_index(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct StubBackend {
        source: Option<String>,
        playing: bool,
        position: f64,
        seeks: Vec<f64>,
    }

    impl AudioBackend for StubBackend {
        fn set_source(&mut self, file: &str) -> Result<()> {
            self.source = Some(file.to_string());
            self.position = 0.0;
            Ok(())
        }

        fn play(&mut self) -> Result<()> {
            self.playing = true;
            Ok(())
        }

        fn pause(&mut self) -> Result<()> {
            self.playing = false;
            Ok(())
        }

        fn seek_to(&mut self, fraction: f64) -> Result<()> {
            self.seeks.push(fraction);
            self.position = fraction * 200.0;
            Ok(())
        }

        fn current_time(&self) -> f64 {
            self.position
        }

        fn duration(&self) -> Option<f64> {
            self.source.as_ref().map(|_| 200.0)
        }
    }

    fn create_catalog(count: u32) -> Catalog {
        Catalog::new(
            (0..count)
                .map(|i| {
                    Track::new(
                        TrackId::from(i),
                        format!("Track {}", i),
                        "Test Artist",
                        "Test Album",
                        format!("album/{:02}.mp3", i),
                    )
                })
                .collect(),
        )
        .unwrap()
    }

    fn create_controller(count: u32) -> PlayerController<StubBackend> {
        PlayerController::new(
            create_catalog(count),
            StubBackend::default(),
            PlayerConfig::default(),
        )
    }

    #[test]
    fn create_controller_is_idle() {
        let controller = create_controller(3);
        assert!(controller.queue_store().is_empty());
        assert!(controller.current_track().is_none());
        assert!(!controller.is_playing());
    }

    #[test]
    fn select_track_loads_and_plays() {
        let mut controller = create_controller(3);
        controller.select_track(&TrackId::from(1)).unwrap();

        assert_eq!(controller.current_track().unwrap().title, "Track 1");
        assert_eq!(controller.backend().source.as_deref(), Some("album/01.mp3"));
        assert!(controller.backend().playing);
        assert!(controller.is_playing());
    }

    #[test]
    fn select_unknown_track_fails() {
        let mut controller = create_controller(3);
        let result = controller.select_track(&TrackId::from(99));
        assert!(matches!(result, Err(PlaybackError::TrackNotFound(_))));
        assert!(controller.queue_store().is_empty());
    }

    #[test]
    fn play_without_track_is_noop() {
        let mut controller = create_controller(3);
        controller.play().unwrap();
        assert!(!controller.is_playing());
        assert!(!controller.backend().playing);
    }

    #[test]
    fn enqueue_on_idle_player_loads_without_playing() {
        let mut controller = create_controller(3);
        controller.enqueue(&TrackId::from(2)).unwrap();

        assert_eq!(controller.current_track().unwrap().id, TrackId::from(2));
        assert_eq!(controller.backend().source.as_deref(), Some("album/02.mp3"));
        assert!(!controller.is_playing());
    }

    #[test]
    fn toggle_play_pause_cycles() {
        let mut controller = create_controller(2);
        controller.enqueue(&TrackId::from(0)).unwrap();

        controller.toggle_play_pause().unwrap();
        assert!(controller.is_playing());
        controller.toggle_play_pause().unwrap();
        assert!(!controller.is_playing());
    }

    #[test]
    fn track_ended_with_repeat_restarts() {
        let mut controller = create_controller(3);
        controller.select_track(&TrackId::from(0)).unwrap();
        controller.toggle_repeat();

        controller.on_track_ended().unwrap();

        assert_eq!(controller.current_track().unwrap().id, TrackId::from(0));
        assert_eq!(controller.backend().seeks, vec![0.0]);
    }

    #[test]
    fn track_ended_advances() {
        let mut controller = create_controller(3);
        controller.select_track(&TrackId::from(2)).unwrap();

        controller.on_track_ended().unwrap();

        // Queue is [2, 0, 1]
        assert_eq!(controller.current_track().unwrap().id, TrackId::from(0));
    }

    #[test]
    fn seek_is_clamped() {
        let mut controller = create_controller(1);
        controller.select_track(&TrackId::from(0)).unwrap();

        controller.seek_to_fraction(1.5).unwrap();
        controller.seek_to_fraction(-0.2).unwrap();

        assert_eq!(controller.backend().seeks, vec![1.0, 0.0]);
    }

    #[test]
    fn progress_reports_fraction() {
        let mut controller = create_controller(1);
        assert!(controller.progress().is_none());

        controller.select_track(&TrackId::from(0)).unwrap();
        controller.seek_to_fraction(0.25).unwrap();

        assert_eq!(controller.progress(), Some(0.25));
    }

    #[test]
    fn move_track_out_of_bounds() {
        let mut controller = create_controller(3);
        controller.select_track(&TrackId::from(0)).unwrap();

        assert!(matches!(
            controller.move_track(0, 3),
            Err(PlaybackError::IndexOutOfBounds(3))
        ));
    }

    #[test]
    fn events_are_drained() {
        let mut controller = create_controller(2);
        controller.select_track(&TrackId::from(0)).unwrap();

        assert!(controller.has_pending_events());
        let events = controller.drain_events();
        assert!(events.contains(&PlaybackEvent::TrackChanged {
            track_id: TrackId::from(0),
            previous_track_id: None,
        }));
        assert!(events.contains(&PlaybackEvent::StateChanged { playing: true }));
        assert!(!controller.has_pending_events());
    }
}
