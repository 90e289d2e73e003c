// Copyright 2025 the Lattice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-source shortest paths, visited lazily.

use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashSet;
use lattice_spatial::HPqueue;

use crate::graph::Graph;

/// Dijkstra's algorithm from one start vertex, yielding `(vertex, distance)` in
/// increasing graph distance.
///
/// Each call to [`next`](Iterator::next) settles one vertex, so the traversal can
/// stop early. Edge weights from `fdist` must be non-negative.
pub struct Dijkstra<'g, T, F> {
    graph: &'g Graph<T>,
    fdist: F,
    pq: HPqueue<T>,
    settled: HashSet<T>,
}

impl<'g, T, F> Dijkstra<'g, T, F>
where
    T: Copy + Eq + Hash,
    F: FnMut(T, T) -> f32,
{
    /// Start a traversal of `graph` at `start`.
    pub fn new(graph: &'g Graph<T>, start: T, fdist: F) -> Self {
        let mut pq = HPqueue::new();
        pq.enter(start, 0.0);
        Self {
            graph,
            fdist,
            pq,
            settled: HashSet::new(),
        }
    }

    /// True when every vertex reachable from the start has been returned.
    pub fn done(&self) -> bool {
        self.pq.is_empty()
    }
}

impl<T, F> Iterator for Dijkstra<'_, T, F>
where
    T: Copy + Eq + Hash,
    F: FnMut(T, T) -> f32,
{
    type Item = (T, f32);

    fn next(&mut self) -> Option<(T, f32)> {
        let (v, dist) = self.pq.remove_min()?;
        self.settled.insert(v);
        for w in self.graph.edges(v) {
            if self.settled.contains(&w) {
                continue;
            }
            let d = dist + (self.fdist)(v, w);
            self.pq.enter_update_if_smaller(w, d);
        }
        Some((v, dist))
    }
}

impl<T, F> Debug for Dijkstra<'_, T, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Dijkstra")
            .field("graph", &self.graph)
            .field("queued", &self.pq)
            .field("settled", &self.settled.len())
            .finish_non_exhaustive()
    }
}
