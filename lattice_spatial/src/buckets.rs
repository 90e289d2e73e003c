// Copyright 2025 the Lattice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sparse map from cell key to the elements stored in that cell.

use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::grid::CellKey;
use crate::stat::Stat;

/// Buckets keyed by [`CellKey`]. Empty buckets are never stored.
#[derive(Clone, Debug)]
pub(crate) struct Buckets<E> {
    map: HashMap<CellKey, Vec<E>>,
}

impl<E> Default for Buckets<E> {
    fn default() -> Self {
        Self {
            map: HashMap::new(),
        }
    }
}

impl<E> Buckets<E> {
    pub(crate) fn push(&mut self, key: CellKey, e: E) {
        self.map.entry(key).or_default().push(e);
    }

    pub(crate) fn get(&self, key: CellKey) -> Option<&[E]> {
        self.map.get(&key).map(Vec::as_slice)
    }

    /// Remove the single element of bucket `key` matching `pred`, dropping the bucket
    /// once it empties. Returns `None` when no element matches; panics on several.
    pub(crate) fn remove_one(&mut self, key: CellKey, pred: impl Fn(&E) -> bool) -> Option<E> {
        let bucket = self.map.get_mut(&key)?;
        let mut found = None;
        for (i, e) in bucket.iter().enumerate() {
            if pred(e) {
                assert!(found.is_none(), "element stored twice in one cell");
                found = Some(i);
            }
        }
        let e = bucket.remove(found?);
        if bucket.is_empty() {
            self.map.remove(&key);
        }
        Some(e)
    }

    pub(crate) fn num_cells(&self) -> usize {
        self.map.len()
    }

    pub(crate) fn occupancy(&self) -> Stat {
        self.map.values().map(|b| b.len() as f32).collect()
    }

    pub(crate) fn clear_with(&mut self, mut observer: impl FnMut(usize)) {
        for bucket in self.map.values() {
            observer(bucket.len());
        }
        self.map.clear();
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        for bucket in self.map.values_mut() {
            bucket.shrink_to_fit();
        }
        self.map.shrink_to_fit();
    }
}
