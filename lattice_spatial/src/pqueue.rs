// Copyright 2025 the Lattice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Min-priority queues keyed by `f32` priorities.
//!
//! Entries with equal priority are removed in insertion order (FIFO). This makes
//! tie-breaking in nearest-neighbor searches deterministic for a given index and
//! query, though callers should not rely on any particular order among ties.

use alloc::collections::BinaryHeap;
use alloc::vec::Vec;
use core::cmp::Reverse;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;
use ordered_float::OrderedFloat;

/// Min-priority queue allowing duplicate items.
pub struct Pqueue<T> {
    // (priority, insertion sequence, slot in `items`); the sequence breaks ties FIFO.
    heap: BinaryHeap<Reverse<(OrderedFloat<f32>, u64, usize)>>,
    items: Vec<Option<T>>,
    free: Vec<usize>,
    seq: u64,
}

impl<T> Default for Pqueue<T> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            items: Vec::new(),
            free: Vec::new(),
            seq: 0,
        }
    }
}

impl<T> Pqueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of queued entries.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// True if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Queue `item` with `priority`. Priorities must not be NaN.
    pub fn enter(&mut self, item: T, priority: f32) {
        debug_assert!(!priority.is_nan(), "NaN priority");
        let slot = match self.free.pop() {
            Some(slot) => {
                self.items[slot] = Some(item);
                slot
            }
            None => {
                self.items.push(Some(item));
                self.items.len() - 1
            }
        };
        self.heap.push(Reverse((OrderedFloat(priority), self.seq, slot)));
        self.seq += 1;
    }

    /// Smallest entry, without removing it.
    pub fn peek(&self) -> Option<(&T, f32)> {
        let Reverse((priority, _, slot)) = self.heap.peek()?;
        self.items[*slot].as_ref().map(|item| (item, priority.0))
    }

    /// Smallest priority, if any.
    pub fn min_priority(&self) -> Option<f32> {
        self.heap.peek().map(|Reverse((priority, _, _))| priority.0)
    }

    /// Remove and return the smallest entry.
    pub fn remove_min(&mut self) -> Option<(T, f32)> {
        let Reverse((priority, _, slot)) = self.heap.pop()?;
        self.free.push(slot);
        self.items[slot].take().map(|item| (item, priority.0))
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.items.clear();
        self.free.clear();
    }
}

impl<T> Debug for Pqueue<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Pqueue")
            .field("len", &self.heap.len())
            .field("min_priority", &self.min_priority())
            .finish_non_exhaustive()
    }
}

/// Min-priority queue holding each item at most once, with decrease-key.
///
/// Superseded heap entries are discarded lazily on removal.
pub struct HPqueue<T> {
    queue: Pqueue<T>,
    live: HashMap<T, f32>,
}

impl<T> Default for HPqueue<T> {
    fn default() -> Self {
        Self {
            queue: Pqueue::new(),
            live: HashMap::new(),
        }
    }
}

impl<T: Copy + Eq + Hash> HPqueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct queued items.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// True if no item is queued.
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Whether `item` is currently queued.
    pub fn contains(&self, item: T) -> bool {
        self.live.contains_key(&item)
    }

    /// Current priority of a queued item.
    pub fn priority(&self, item: T) -> Option<f32> {
        self.live.get(&item).copied()
    }

    /// Queue a new item. Panics if it is already queued.
    pub fn enter(&mut self, item: T, priority: f32) {
        let previous = self.live.insert(item, priority);
        assert!(previous.is_none(), "HPqueue::enter: item already queued");
        self.queue.enter(item, priority);
    }

    /// Queue `item`, or lower its priority if it is queued with a larger one.
    ///
    /// Returns true if the queue changed.
    pub fn enter_update_if_smaller(&mut self, item: T, priority: f32) -> bool {
        match self.live.get_mut(&item) {
            Some(current) if *current <= priority => return false,
            Some(current) => *current = priority,
            None => {
                self.live.insert(item, priority);
            }
        }
        self.queue.enter(item, priority);
        true
    }

    /// Smallest priority among queued items.
    pub fn min_priority(&mut self) -> Option<f32> {
        self.discard_stale();
        self.queue.min_priority()
    }

    /// Remove and return the item with the smallest priority.
    pub fn remove_min(&mut self) -> Option<(T, f32)> {
        self.discard_stale();
        let (item, priority) = self.queue.remove_min()?;
        self.live.remove(&item);
        Some((item, priority))
    }

    fn discard_stale(&mut self) {
        while let Some((item, priority)) = self.queue.peek() {
            let current = self.live.get(item).copied();
            if current.is_some_and(|c| c.to_bits() == priority.to_bits()) {
                break;
            }
            self.queue.remove_min();
        }
    }
}

impl<T> Debug for HPqueue<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HPqueue")
            .field("len", &self.live.len())
            .field("heap_len", &self.queue.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn pops_in_priority_order_with_fifo_ties() {
        let mut pq = Pqueue::new();
        pq.enter('c', 3.0);
        pq.enter('a', 1.0);
        pq.enter('x', 2.0);
        pq.enter('y', 2.0);
        pq.enter('z', 2.0);
        assert_eq!(pq.peek(), Some((&'a', 1.0)));
        let order: Vec<_> = core::iter::from_fn(|| pq.remove_min().map(|(c, _)| c)).collect();
        assert_eq!(order, ['a', 'x', 'y', 'z', 'c']);
        assert!(pq.is_empty());
    }

    #[test]
    fn interleaved_use_reuses_slots_and_clears() {
        let mut pq = Pqueue::new();
        pq.enter(10_u32, 0.5);
        pq.enter(11, 0.25);
        assert_eq!(pq.remove_min(), Some((11, 0.25)));
        pq.enter(12, 0.5);
        pq.enter(13, 0.0);
        assert_eq!(pq.len(), 3);
        assert_eq!(pq.remove_min(), Some((13, 0.0)));
        // Equal priorities: 10 was queued before 12.
        assert_eq!(pq.remove_min(), Some((10, 0.5)));
        pq.enter(14, 0.75);
        pq.clear();
        assert!(pq.is_empty());
        assert_eq!(pq.peek(), None);
        assert_eq!(pq.min_priority(), None);
        pq.enter(15, 1.0);
        assert_eq!(pq.remove_min(), Some((15, 1.0)));
    }

    #[test]
    fn keyed_queue_decreases_and_ignores_larger() {
        let mut pq = HPqueue::new();
        assert!(pq.enter_update_if_smaller(7_u32, 5.0));
        assert!(pq.enter_update_if_smaller(8_u32, 4.0));
        assert!(!pq.enter_update_if_smaller(7_u32, 6.0));
        assert_eq!(pq.priority(7), Some(5.0));
        assert!(pq.enter_update_if_smaller(7_u32, 1.0));
        assert_eq!(pq.priority(7), Some(1.0));
        assert!(pq.contains(8));
        assert_eq!(pq.len(), 2);
        assert_eq!(pq.min_priority(), Some(1.0));
        assert_eq!(pq.remove_min(), Some((7, 1.0)));
        assert_eq!(pq.priority(7), None);
        assert_eq!(pq.remove_min(), Some((8, 4.0)));
        assert_eq!(pq.remove_min(), None);
        assert!(pq.is_empty());
    }

    #[test]
    fn keyed_queue_allows_reentry_after_removal() {
        let mut pq = HPqueue::new();
        pq.enter(1_u8, 2.0);
        assert!(pq.enter_update_if_smaller(1, 1.0));
        assert_eq!(pq.remove_min(), Some((1, 1.0)));
        pq.enter(1, 2.0);
        assert_eq!(pq.remove_min(), Some((1, 2.0)));
        assert_eq!(pq.remove_min(), None);
    }

    #[test]
    #[should_panic(expected = "already queued")]
    fn keyed_enter_rejects_duplicates() {
        let mut pq = HPqueue::new();
        pq.enter(3_i32, 1.0);
        pq.enter(3_i32, 0.5);
    }
}
