// Copyright 2025 the Lattice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Connected components.

use alloc::collections::VecDeque;
use alloc::vec::{self, Vec};
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashSet;

use crate::graph::Graph;

/// Iterator over one representative vertex per connected component.
///
/// Components are found by breadth-first search over out-edges, so the graph is
/// expected to be undirected (see [`symmetric_closure`](crate::symmetric_closure)).
/// Representatives come out in vertex insertion order.
pub struct GraphComponents<'g, T> {
    graph: &'g Graph<T>,
    vertices: vec::IntoIter<T>,
    seen: HashSet<T>,
}

impl<'g, T: Copy + Eq + Hash> GraphComponents<'g, T> {
    /// Start enumerating the components of `graph`.
    pub fn new(graph: &'g Graph<T>) -> Self {
        Self {
            graph,
            vertices: graph.vertices().collect::<Vec<_>>().into_iter(),
            seen: HashSet::new(),
        }
    }
}

impl<T: Copy + Eq + Hash> Iterator for GraphComponents<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let rep = self.vertices.by_ref().find(|v| !self.seen.contains(v))?;
        self.seen.insert(rep);
        let mut queue = VecDeque::from([rep]);
        while let Some(v) = queue.pop_front() {
            for w in self.graph.edges(v) {
                if self.seen.insert(w) {
                    queue.push_back(w);
                }
            }
        }
        Some(rep)
    }
}

impl<T> Debug for GraphComponents<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GraphComponents")
            .field("graph", &self.graph)
            .field("seen", &self.seen.len())
            .finish_non_exhaustive()
    }
}

/// Number of connected components of an undirected graph.
pub fn num_components<T: Copy + Eq + Hash>(graph: &Graph<T>) -> usize {
    GraphComponents::new(graph).count()
}
