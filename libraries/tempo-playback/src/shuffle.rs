//! Shuffle for queue randomization
//!
//! The random permutation is injected through [`Shuffler`] so a seeded
//! generator (or a plain closure in tests) makes shuffle deterministic.

use crate::queue::QueueStore;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::iter;
use tempo_core::TrackId;
use tracing::{debug, warn};

/// Source of random permutations
pub trait Shuffler {
    /// Permute `ids` in place
    fn shuffle(&mut self, ids: &mut [TrackId]);
}

impl<F> Shuffler for F
where
    F: FnMut(&mut [TrackId]),
{
    fn shuffle(&mut self, ids: &mut [TrackId]) {
        self(ids);
    }
}

/// Uniform shuffle using Fisher-Yates
///
/// Each track has equal probability of appearing at any position.
#[derive(Debug, Clone)]
pub struct RandomShuffler {
    rng: StdRng,
}

impl RandomShuffler {
    /// Deterministic shuffler for reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Shuffler seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for RandomShuffler {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl Shuffler for RandomShuffler {
    fn shuffle(&mut self, ids: &mut [TrackId]) {
        ids.shuffle(&mut self.rng);
    }
}

impl QueueStore {
    /// Toggle shuffle, returning the new flag
    ///
    /// Turning on snapshots the current play order as the canonical order,
    /// then rebuilds the queue as `[current] + shuffled(rest)` with the
    /// cursor at 0. If nothing is loaded the whole queue is shuffled and
    /// the cursor stays unset.
    ///
    /// Turning off restores the canonical order and relocates the cursor
    /// to the same track. A track that is not in the canonical order
    /// (queued while shuffled) leaves the cursor unset.
    pub fn toggle_shuffle<S>(&mut self, shuffler: &mut S) -> bool
    where
        S: Shuffler + ?Sized,
    {
        self.shuffled = !self.shuffled;
        let current = self.current_track_id().cloned();

        if self.shuffled {
            if self.queue.is_empty() {
                return true;
            }

            self.canonical.clone_from(&self.queue);

            let mut rest: Vec<TrackId> = self
                .queue
                .iter()
                .filter(|id| Some(*id) != current.as_ref())
                .cloned()
                .collect();
            shuffler.shuffle(&mut rest);

            match current {
                Some(current) => {
                    self.queue = iter::once(current).chain(rest).collect();
                    self.current = Some(0);
                }
                None => self.queue = rest,
            }

            debug!("Shuffle on ({} tracks)", self.queue.len());
        } else {
            self.queue.clone_from(&self.canonical);
            self.current = current
                .as_ref()
                .and_then(|current| self.position_of(current));

            if let (Some(id), None) = (&current, self.current) {
                warn!("Track {} is not in the unshuffled order, cursor cleared", id);
            }

            debug!("Shuffle off, cursor {:?}", self.current);
        }

        self.shuffled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn ids(names: &[&str]) -> Vec<TrackId> {
        names.iter().map(|n| TrackId::from(*n)).collect()
    }

    fn seeded_store(names: &[&str], selected: &str) -> QueueStore {
        let mut store = QueueStore::new();
        store.seed(&TrackId::from(selected), &ids(names));
        store
    }

    fn reverse(ids: &mut [TrackId]) {
        ids.reverse();
    }

    #[test]
    fn shuffle_on_anchors_current_track() {
        let mut store = seeded_store(&["A", "B", "C", "D"], "A");
        store.advance();
        store.advance(); // C playing

        store.toggle_shuffle(&mut reverse);

        assert!(store.is_shuffled());
        assert_eq!(store.queue(), ids(&["C", "D", "B", "A"]).as_slice());
        assert_eq!(store.canonical(), ids(&["A", "B", "C", "D"]).as_slice());
        assert_eq!(store.current_index(), Some(0));
    }

    #[test]
    fn shuffle_off_restores_order_and_cursor() {
        let mut store = seeded_store(&["A", "B", "C", "D"], "A");
        store.advance();
        store.advance();

        store.toggle_shuffle(&mut RandomShuffler::seeded(7));
        store.toggle_shuffle(&mut RandomShuffler::seeded(7));

        assert!(!store.is_shuffled());
        assert_eq!(store.queue(), ids(&["A", "B", "C", "D"]).as_slice());
        assert_eq!(store.current_index(), Some(2));
    }

    #[test]
    fn shuffle_on_empty_queue_only_flips_flag() {
        let mut store = QueueStore::new();
        assert!(store.toggle_shuffle(&mut reverse));
        assert!(store.is_empty());
        assert!(!store.toggle_shuffle(&mut reverse));
    }

    #[test]
    fn shuffle_without_loaded_track_shuffles_everything() {
        let mut store = QueueStore::new();
        store.queue = ids(&["A", "B", "C"]);
        store.canonical = store.queue.clone();

        store.toggle_shuffle(&mut reverse);

        assert_eq!(store.queue(), ids(&["C", "B", "A"]).as_slice());
        assert_eq!(store.current_index(), None);
    }

    #[test]
    fn unshuffle_drops_cursor_for_track_queued_while_shuffled() {
        let mut store = seeded_store(&["A", "B"], "A");
        store.toggle_shuffle(&mut reverse);
        store.enqueue(TrackId::from("X"));
        store.advance(); // X playing

        store.toggle_shuffle(&mut reverse);

        assert_eq!(store.queue(), ids(&["A", "B"]).as_slice());
        assert_eq!(store.current_index(), None);
    }

    #[test]
    fn closure_shuffler_is_used() {
        let mut calls = 0;
        let mut counting = |_: &mut [TrackId]| calls += 1;

        let mut store = seeded_store(&["A", "B", "C"], "A");
        store.toggle_shuffle(&mut counting);

        assert_eq!(calls, 1);
    }

    #[test]
    fn random_shuffle_preserves_all_tracks() {
        let mut tracks = ids(&["1", "2", "3", "4", "5"]);
        RandomShuffler::from_entropy().shuffle(&mut tracks);

        let unique: HashSet<_> = tracks.iter().collect();
        assert_eq!(unique.len(), 5);
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let mut first = ids(&["1", "2", "3", "4", "5", "6", "7", "8"]);
        let mut second = first.clone();

        RandomShuffler::seeded(42).shuffle(&mut first);
        RandomShuffler::seeded(42).shuffle(&mut second);

        assert_eq!(first, second);
    }
}
