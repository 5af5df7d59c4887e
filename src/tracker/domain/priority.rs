//! Start-time-ordered index of scheduled items and conflict detection.

use super::{ItemId, Schedule};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};

/// Ordered index of every scheduled task and subtask.
///
/// Entries are keyed by `(start, id)` so iteration yields the "next up"
/// ordering with a stable id tie-break. A side map from id to start makes
/// removal by id O(log n) and rejects duplicate ids. Conflict detection is
/// a linear scan over all entries; an interval tree would cut this to
/// O(log n) but the expected entry count does not warrant one.
#[derive(Debug, Clone, Default)]
pub struct PriorityIndex {
    ordered: BTreeMap<(DateTime<Utc>, ItemId), Schedule>,
    starts: HashMap<ItemId, DateTime<Utc>>,
}

impl PriorityIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a scheduled item.
    ///
    /// Returns `false` and leaves the index unchanged when the id is
    /// already tracked; the caller must remove the stale entry first.
    pub fn insert(&mut self, id: ItemId, window: Schedule) -> bool {
        if self.starts.contains_key(&id) {
            return false;
        }
        self.starts.insert(id, window.start());
        self.ordered.insert((window.start(), id), window);
        true
    }

    /// Removes the entry for `id`; no-op when the id is not tracked.
    pub fn remove(&mut self, id: ItemId) {
        if let Some(start) = self.starts.remove(&id) {
            self.ordered.remove(&(start, id));
        }
    }

    /// Returns the tracked window for `id`, if any.
    #[must_use]
    pub fn window(&self, id: ItemId) -> Option<Schedule> {
        let start = self.starts.get(&id)?;
        self.ordered.get(&(*start, id)).copied()
    }

    /// Returns all tracked ids in ascending `(start, id)` order as a fresh
    /// sequence.
    #[must_use]
    pub fn ids(&self) -> Vec<ItemId> {
        self.ordered.keys().map(|(_, id)| *id).collect()
    }

    /// Reports whether `window` strictly intersects any tracked entry
    /// other than `exclude`.
    ///
    /// The exclusion covers the update path, where the item being
    /// repositioned must not conflict with its own stale entry.
    #[must_use]
    pub fn conflicts_with(&self, window: &Schedule, exclude: Option<ItemId>) -> bool {
        self.ordered
            .iter()
            .any(|((_, id), tracked)| Some(*id) != exclude && tracked.overlaps(window))
    }

    /// Returns the number of tracked entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Reports whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}
