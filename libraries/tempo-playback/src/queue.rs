//! Play queue with a current-track cursor
//!
//! Holds the play order, the canonical (pre-shuffle) order, the cursor
//! and the shuffle/repeat flags in one struct. Shuffle lives in
//! `shuffle.rs` and drag-and-drop reconciliation in `reorder.rs`.
//!
//! ```text
//! queue:     [C] [A] [D] [B]      <- play order
//!             ^ current
//! canonical: [A] [B] [C] [D]      <- restored when shuffle is turned off
//! ```
//!
//! Invariants kept by every operation:
//! - no id appears twice in `queue`
//! - `current` is `None` or a valid index into `queue`
//! - while not shuffled, `canonical == queue`

use crate::types::{QueueEntry, QueueSnapshot};
use tempo_core::{Catalog, Track, TrackId};
use tracing::debug;

/// Queue state owned by a single player
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueStore {
    /// Play order
    pub(crate) queue: Vec<TrackId>,

    /// Order to restore when shuffle is turned off
    pub(crate) canonical: Vec<TrackId>,

    /// Index of the loaded track (None = nothing loaded)
    pub(crate) current: Option<usize>,

    pub(crate) shuffled: bool,
    pub(crate) repeat: bool,
}

impl QueueStore {
    /// Create an empty, unseeded queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty queue with the given repeat flag
    pub fn with_repeat(repeat: bool) -> Self {
        Self {
            repeat,
            ..Self::default()
        }
    }

    /// Replace the queue with `selected` followed by the rest of the catalog
    ///
    /// Discards any prior queue and turns shuffle off. Repeat is left alone.
    pub fn seed(&mut self, selected: &TrackId, catalog_order: &[TrackId]) {
        let mut queue = Vec::with_capacity(catalog_order.len() + 1);
        queue.push(selected.clone());
        queue.extend(catalog_order.iter().filter(|id| *id != selected).cloned());

        self.canonical.clone_from(&queue);
        self.queue = queue;
        self.current = Some(0);
        self.shuffled = false;

        debug!("Seeded queue from {} ({} tracks)", selected, self.queue.len());
    }

    // ===== Cursor =====

    /// Move the cursor forward one position, wrapping to the start
    ///
    /// From "nothing loaded" the cursor lands on the first track.
    /// Returns the new current id, or None if the queue is empty.
    pub fn advance(&mut self) -> Option<&TrackId> {
        let len = self.queue.len();
        if len == 0 {
            return None;
        }

        let next = match self.current {
            Some(index) => (index + 1) % len,
            None => 0,
        };
        self.current = Some(next);
        self.queue.get(next)
    }

    /// Move the cursor back one position, wrapping to the end
    ///
    /// From "nothing loaded" the cursor lands on the last track.
    pub fn retreat(&mut self) -> Option<&TrackId> {
        let len = self.queue.len();
        if len == 0 {
            return None;
        }

        let previous = match self.current {
            Some(index) => (index + len - 1) % len,
            None => len - 1,
        };
        self.current = Some(previous);
        self.queue.get(previous)
    }

    /// Point the cursor at the first track if nothing is loaded yet
    ///
    /// Returns the current id afterwards.
    pub fn start(&mut self) -> Option<&TrackId> {
        if self.current.is_none() && !self.queue.is_empty() {
            self.current = Some(0);
        }
        self.current_track_id()
    }

    // ===== Insertion =====

    /// Queue a track to play right after the current one
    ///
    /// - Nothing loaded: the track is appended and the cursor is set to 0.
    /// - Something loaded: an existing copy is removed first (shifting the
    ///   cursor left if it sat before it), then the track is inserted at
    ///   `current + 1`.
    ///
    /// Enqueuing the track that is currently loaded leaves the order as is.
    /// While not shuffled the canonical order mirrors the result.
    pub fn enqueue(&mut self, id: TrackId) {
        match self.current {
            None => {
                self.queue.retain(|existing| *existing != id);
                self.queue.push(id);
                self.current = Some(0);
            }
            Some(current) if self.queue.get(current) == Some(&id) => {}
            Some(mut current) => {
                if let Some(existing) = self.position_of(&id) {
                    self.queue.remove(existing);
                    if existing < current {
                        current -= 1;
                    }
                }
                let at = (current + 1).min(self.queue.len());
                self.queue.insert(at, id);
                self.current = Some(current);
            }
        }

        if !self.shuffled {
            self.canonical.clone_from(&self.queue);
        }

        debug!(
            "Enqueued track, queue length {} (cursor {:?})",
            self.queue.len(),
            self.current
        );
    }

    // ===== Flags =====

    /// Flip the repeat flag, returning the new value
    pub fn toggle_repeat(&mut self) -> bool {
        self.repeat = !self.repeat;
        self.repeat
    }

    // ===== Observers =====

    /// Id of the loaded track
    pub fn current_track_id(&self) -> Option<&TrackId> {
        self.current.and_then(|index| self.queue.get(index))
    }

    /// Loaded track resolved against the catalog
    pub fn current_track<'a>(&self, catalog: &'a Catalog) -> Option<&'a Track> {
        self.current_track_id().and_then(|id| catalog.get(id))
    }

    /// Play order
    pub fn queue(&self) -> &[TrackId] {
        &self.queue
    }

    /// Canonical (pre-shuffle) order
    pub fn canonical(&self) -> &[TrackId] {
        &self.canonical
    }

    /// Cursor position (None = nothing loaded)
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Whether the queue is shuffled
    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    /// Whether the current track repeats when it ends
    pub fn is_repeat(&self) -> bool {
        self.repeat
    }

    /// Number of tracks in the queue
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Position of a track in the play order
    pub fn position_of(&self, id: &TrackId) -> Option<usize> {
        self.queue.iter().position(|existing| existing == id)
    }

    /// Queue rows for rendering, with the current row marked
    ///
    /// Ids missing from the catalog are skipped.
    pub fn entries<'a>(&self, catalog: &'a Catalog) -> Vec<QueueEntry<'a>> {
        self.queue
            .iter()
            .enumerate()
            .filter_map(|(position, id)| {
                catalog.get(id).map(|track| QueueEntry {
                    position,
                    track,
                    is_current: self.current == Some(position),
                })
            })
            .collect()
    }

    /// Owned copy of the full state
    pub fn snapshot(&self) -> QueueSnapshot {
        QueueSnapshot {
            queue: self.queue.clone(),
            canonical: self.canonical.clone(),
            current_index: self.current,
            shuffled: self.shuffled,
            repeat: self.repeat,
        }
    }
}
