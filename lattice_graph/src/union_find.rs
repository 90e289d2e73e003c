// Copyright 2025 the Lattice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Disjoint-set forest over hashable elements.

use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;

/// Union-find with path compression and union by rank.
///
/// Elements need not be registered: an element never passed to
/// [`unify`](Self::unify) is its own singleton set.
#[derive(Clone)]
pub struct UnionFind<T> {
    // Only non-root elements have a parent entry.
    parent: HashMap<T, T>,
    // Only roots with a non-zero rank have a rank entry.
    rank: HashMap<T, u8>,
}

impl<T> Default for UnionFind<T> {
    fn default() -> Self {
        Self {
            parent: HashMap::new(),
            rank: HashMap::new(),
        }
    }
}

impl<T: Copy + Eq + Hash> UnionFind<T> {
    /// Create a forest where every element is a singleton.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge the sets of `a` and `b`. Returns false if they were already the same set.
    pub fn unify(&mut self, a: T, b: T) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        let rank_a = self.rank.get(&ra).copied().unwrap_or(0);
        let rank_b = self.rank.get(&rb).copied().unwrap_or(0);
        let (child, root) = if rank_a < rank_b { (ra, rb) } else { (rb, ra) };
        self.parent.insert(child, root);
        self.rank.remove(&child);
        if rank_a == rank_b {
            self.rank.insert(root, rank_a + 1);
        }
        true
    }

    /// Representative of the set containing `a`.
    pub fn find(&mut self, a: T) -> T {
        let mut root = a;
        while let Some(&p) = self.parent.get(&root) {
            root = p;
        }
        let mut cur = a;
        while let Some(p) = self.parent.get_mut(&cur) {
            cur = core::mem::replace(p, root);
        }
        root
    }

    /// Whether `a` and `b` are in the same set.
    pub fn equal(&mut self, a: T, b: T) -> bool {
        self.find(a) == self.find(b)
    }
}

impl<T> Debug for UnionFind<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("UnionFind")
            .field("non_roots", &self.parent.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unify_is_idempotent() {
        let mut uf = UnionFind::new();
        assert!(uf.unify(1_u32, 2));
        assert!(!uf.unify(1, 2));
        assert!(!uf.unify(2, 1));
        assert!(uf.equal(1, 2));
        assert!(!uf.equal(1, 3));
        assert_eq!(uf.find(7), 7);
    }

    #[test]
    fn chains_share_one_root() {
        let mut uf = UnionFind::new();
        for i in 0..100_u32 {
            uf.unify(i, i + 1);
        }
        let root = uf.find(0);
        assert!((0..=100).all(|i| uf.find(i) == root), "single root");
        // After compression every element points straight at the root.
        assert!(uf.parent.values().all(|&p| p == root), "compressed paths");
        assert!(uf.rank.get(&root).copied().unwrap_or(0) <= 7, "rank stays logarithmic");
    }

    #[test]
    fn separate_sets_stay_separate() {
        let mut uf = UnionFind::new();
        uf.unify('a', 'b');
        uf.unify('c', 'd');
        assert!(!uf.equal('a', 'c'));
        assert!(uf.unify('b', 'd'));
        assert!(uf.equal('a', 'c'));
    }
}
