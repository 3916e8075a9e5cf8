//! Reconciling a committed drag-and-drop order into the queue

use crate::queue::QueueStore;
use std::collections::HashSet;
use tempo_core::{Catalog, TrackId};
use tracing::{debug, warn};

impl QueueStore {
    /// Replace the play order with `new_order`
    ///
    /// Each id is resolved against the catalog; unknown ids and repeats of
    /// an id already placed are dropped. While not shuffled the canonical
    /// order follows. The cursor follows the track that was current, not
    /// its numeric position, and is cleared if that track is gone.
    pub fn apply_permutation(&mut self, new_order: &[TrackId], catalog: &Catalog) {
        let current = self.current_track_id().cloned();

        let mut seen = HashSet::with_capacity(new_order.len());
        let mut queue = Vec::with_capacity(new_order.len());
        for id in new_order {
            if !catalog.contains(id) {
                warn!("Dropping unknown track {} from reorder", id);
                continue;
            }
            if !seen.insert(id) {
                warn!("Dropping repeated track {} from reorder", id);
                continue;
            }
            queue.push(id.clone());
        }

        self.queue = queue;
        if !self.shuffled {
            self.canonical.clone_from(&self.queue);
        }
        self.current = current.as_ref().and_then(|id| self.position_of(id));

        debug!(
            "Applied reorder of {} tracks, cursor {:?}",
            self.queue.len(),
            self.current
        );
    }
}
