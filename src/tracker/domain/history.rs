//! Recency-ordered, deduplicated log of viewed work items.

use super::{ItemId, WorkItem};
use std::collections::HashMap;

/// Arena slot holding one viewed item and its neighbour links.
#[derive(Debug, Clone)]
struct Node {
    item: WorkItem,
    prev: Option<usize>,
    next: Option<usize>,
}

/// View history with O(1) record and removal regardless of length.
///
/// Backed by an arena of slots addressed by index, a free list of vacated
/// slots, and an id-to-slot map. The doubly linked order runs from the
/// oldest entry (head) to the most recently viewed (tail); links are slot
/// indices rather than references, which keeps the structure plain owned
/// data. The log is unbounded.
#[derive(Debug, Clone, Default)]
pub struct ViewHistory {
    slots: Vec<Option<Node>>,
    free: Vec<usize>,
    index: HashMap<ItemId, usize>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl ViewHistory {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a view of `item`.
    ///
    /// Any earlier entry with the same id is evicted first, so the log
    /// holds each id at most once and the entry moves to the most-recent
    /// position.
    pub fn record(&mut self, item: WorkItem) {
        let id = item.id();
        self.remove(id);

        let node = Node {
            item,
            prev: self.tail,
            next: None,
        };
        let slot = match self.free.pop() {
            Some(slot) => {
                if let Some(entry) = self.slots.get_mut(slot) {
                    *entry = Some(node);
                }
                slot
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };

        match self.tail {
            Some(tail) => {
                if let Some(Some(tail_node)) = self.slots.get_mut(tail) {
                    tail_node.next = Some(slot);
                }
            }
            None => self.head = Some(slot),
        }
        self.tail = Some(slot);
        self.index.insert(id, slot);
    }

    /// Deletes the entry for `id`; no-op when the id is not tracked.
    pub fn remove(&mut self, id: ItemId) {
        let Some(slot) = self.index.remove(&id) else {
            return;
        };
        let node = match self.slots.get_mut(slot) {
            Some(entry) => entry.take(),
            None => None,
        };
        let Some(node) = node else {
            return;
        };

        match node.prev {
            Some(prev) => {
                if let Some(Some(prev_node)) = self.slots.get_mut(prev) {
                    prev_node.next = node.next;
                }
            }
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => {
                if let Some(Some(next_node)) = self.slots.get_mut(next) {
                    next_node.prev = node.prev;
                }
            }
            None => self.tail = node.prev,
        }
        self.free.push(slot);
    }

    /// Returns the viewed items oldest-first, as a fresh sequence with no
    /// aliasing of internal storage.
    #[must_use]
    pub fn snapshot(&self) -> Vec<WorkItem> {
        let mut items = Vec::with_capacity(self.index.len());
        let mut cursor = self.head;
        while let Some(slot) = cursor {
            let Some(Some(node)) = self.slots.get(slot) else {
                break;
            };
            items.push(node.item.clone());
            cursor = node.next;
        }
        items
    }

    /// Returns the number of tracked entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Reports whether the history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
