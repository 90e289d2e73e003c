// Copyright 2025 the Lattice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sparse directed graph over hashable vertex ids.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;

#[derive(Clone)]
struct Vertex<T> {
    id: T,
    out: Vec<T>,
}

/// Directed graph stored as per-vertex out-edge lists.
///
/// Vertices and each vertex's out-edges are iterated in insertion order. An
/// undirected graph is represented by entering both directions of every edge
/// (see [`Graph::enter_undirected`]).
#[derive(Clone)]
pub struct Graph<T> {
    index: HashMap<T, usize>,
    // Removed vertices leave a `None` behind so that slots keep insertion order.
    // Slots are compacted once the holes outnumber the live vertices.
    slots: Vec<Option<Vertex<T>>>,
    num_edges: usize,
}

impl<T> Default for Graph<T> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            slots: Vec::new(),
            num_edges: 0,
        }
    }
}

impl<T: Copy + Eq + Hash> Graph<T> {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an isolated vertex. Panics if `v` is already present.
    pub fn enter(&mut self, v: T) {
        let slot = self.slots.len();
        let previous = self.index.insert(v, slot);
        assert!(previous.is_none(), "Graph::enter: vertex already present");
        self.slots.push(Some(Vertex { id: v, out: Vec::new() }));
    }

    /// Add the directed edge `v1 → v2`, creating `v1` if needed (but not `v2`).
    ///
    /// Panics if the edge already exists.
    pub fn enter_edge(&mut self, v1: T, v2: T) {
        if !self.index.contains_key(&v1) {
            self.enter(v1);
        }
        let out = self.out_mut(v1);
        assert!(!out.contains(&v2), "Graph::enter_edge: edge already present");
        out.push(v2);
        self.num_edges += 1;
    }

    /// Add both `v1 → v2` and `v2 → v1`, creating either vertex if needed.
    pub fn enter_undirected(&mut self, v1: T, v2: T) {
        self.enter_edge(v1, v2);
        self.enter_edge(v2, v1);
    }

    /// Remove the directed edge `v1 → v2`. Panics if it does not exist.
    pub fn remove_edge(&mut self, v1: T, v2: T) {
        let out = self
            .index
            .get(&v1)
            .and_then(|&i| self.slots[i].as_mut())
            .map(|vx| &mut vx.out);
        let Some(out) = out else {
            panic!("Graph::remove_edge: edge not present");
        };
        let Some(pos) = out.iter().position(|&v| v == v2) else {
            panic!("Graph::remove_edge: edge not present");
        };
        out.remove(pos);
        self.num_edges -= 1;
    }

    /// Remove both directions of an undirected edge.
    pub fn remove_undirected(&mut self, v1: T, v2: T) {
        self.remove_edge(v1, v2);
        self.remove_edge(v2, v1);
    }

    /// Remove vertex `v`. Returns false if it was absent.
    ///
    /// Panics if `v` still has out-edges. Edges pointing at `v` are the caller's
    /// responsibility.
    pub fn remove_vertex(&mut self, v: T) -> bool {
        let Some(&slot) = self.index.get(&v) else {
            return false;
        };
        assert!(
            self.slots[slot].as_ref().is_none_or(|vx| vx.out.is_empty()),
            "Graph::remove_vertex: vertex still has out-edges"
        );
        self.index.remove(&v);
        self.slots[slot] = None;
        if self.slots.len() - self.index.len() > self.index.len() {
            self.compact();
        }
        true
    }

    /// Whether the directed edge `v1 → v2` exists.
    pub fn contains(&self, v1: T, v2: T) -> bool {
        self.out(v1).contains(&v2)
    }

    /// Whether `v` is a vertex.
    pub fn contains_vertex(&self, v: T) -> bool {
        self.index.contains_key(&v)
    }

    /// Number of out-edges of `v` (zero if absent).
    pub fn out_degree(&self, v: T) -> usize {
        self.out(v).len()
    }

    /// Vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = T> + Clone + '_ {
        self.slots.iter().flatten().map(|vx| vx.id)
    }

    /// Out-neighbors of `v` in insertion order (empty if `v` is absent).
    pub fn edges(&self, v: T) -> impl Iterator<Item = T> + Clone + '_ {
        self.out(v).iter().copied()
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.index.len()
    }

    /// Number of directed edges.
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// True if the graph has no vertex.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Remove all vertices and edges.
    pub fn clear(&mut self) {
        self.index.clear();
        self.slots.clear();
        self.num_edges = 0;
    }

    fn compact(&mut self) {
        self.slots.retain(Option::is_some);
        for (i, vx) in self.slots.iter().flatten().enumerate() {
            self.index.insert(vx.id, i);
        }
    }

    fn out(&self, v: T) -> &[T] {
        self.index
            .get(&v)
            .and_then(|&i| self.slots[i].as_ref())
            .map(|vx| vx.out.as_slice())
            .unwrap_or_default()
    }

    fn out_mut(&mut self, v: T) -> &mut Vec<T> {
        let slot = self.index[&v];
        &mut self.slots[slot]
            .as_mut()
            .unwrap_or_else(|| unreachable!("indexed vertex has a live slot"))
            .out
    }
}

impl<T> Debug for Graph<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Graph")
            .field("num_vertices", &self.index.len())
            .field("num_edges", &self.num_edges)
            .finish_non_exhaustive()
    }
}

/// Add every missing reverse edge, making `g` undirected.
pub fn symmetric_closure<T: Copy + Eq + Hash>(g: &mut Graph<T>) {
    let view: &Graph<T> = g;
    let missing: Vec<(T, T)> = view
        .vertices()
        .flat_map(|v1| view.edges(v1).map(move |v2| (v2, v1)))
        .filter(|&(v2, v1)| !view.contains(v2, v1))
        .collect();
    for (v2, v1) in missing {
        g.enter_edge(v2, v1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_keep_insertion_order() {
        let mut g = Graph::new();
        g.enter(1_u32);
        g.enter_edge(1, 3);
        g.enter_edge(1, 2);
        g.enter_edge(2, 1);
        assert_eq!(g.vertices().collect::<Vec<_>>(), [1, 2]);
        assert_eq!(g.edges(1).collect::<Vec<_>>(), [3, 2]);
        assert_eq!(g.num_edges(), 3);
        assert!(g.contains(1, 3));
        assert!(!g.contains(3, 1));
        assert!(!g.contains_vertex(3));
        assert_eq!(g.out_degree(3), 0);
        assert_eq!(g.edges(3).count(), 0);

        // Iterators borrow the graph and can be restarted.
        let it = g.edges(1);
        assert_eq!(it.clone().count(), it.count());
    }

    #[test]
    fn remove_edges_and_vertices() {
        let mut g = Graph::new();
        g.enter_undirected('a', 'b');
        g.enter_undirected('b', 'c');
        assert_eq!(g.num_vertices(), 3);
        assert_eq!(g.num_edges(), 4);
        g.remove_undirected('a', 'b');
        assert_eq!(g.num_edges(), 2);
        assert!(g.remove_vertex('a'));
        assert!(!g.remove_vertex('a'));
        assert_eq!(g.vertices().collect::<Vec<_>>(), ['b', 'c']);
        g.enter('a');
        assert_eq!(g.vertices().collect::<Vec<_>>(), ['b', 'c', 'a']);
        g.clear();
        assert!(g.is_empty());
        assert_eq!(g.num_edges(), 0);
    }

    #[test]
    fn churn_keeps_slots_bounded_and_order_intact() {
        let mut g = Graph::new();
        g.enter(1000_u32);
        g.enter_edge(1001, 1000);
        for v in 0..500 {
            g.enter(v);
            assert!(g.remove_vertex(v));
            assert!(g.slots.len() <= 2 * g.num_vertices() + 1, "holes are compacted");
        }
        assert_eq!(g.vertices().collect::<Vec<_>>(), [1000, 1001]);
        assert!(g.contains(1001, 1000));
        assert_eq!(g.num_edges(), 1);
        g.enter(7);
        g.enter_edge(7, 1001);
        assert_eq!(g.vertices().collect::<Vec<_>>(), [1000, 1001, 7]);
        assert_eq!(g.edges(7).collect::<Vec<_>>(), [1001]);
    }

    #[test]
    #[should_panic(expected = "edge already present")]
    fn duplicate_edge_panics() {
        let mut g = Graph::new();
        g.enter_edge(0_u8, 1);
        g.enter_edge(0_u8, 1);
    }

    #[test]
    #[should_panic(expected = "vertex already present")]
    fn duplicate_vertex_panics() {
        let mut g = Graph::new();
        g.enter(0_u8);
        g.enter(0_u8);
    }

    #[test]
    #[should_panic(expected = "edge not present")]
    fn removing_missing_edge_panics() {
        let mut g = Graph::new();
        g.enter_edge(0_u8, 1);
        g.remove_edge(1, 0);
    }

    #[test]
    #[should_panic(expected = "still has out-edges")]
    fn removing_connected_vertex_panics() {
        let mut g = Graph::new();
        g.enter_edge(0_u8, 1);
        g.remove_vertex(0);
    }

    #[test]
    fn closure_adds_reverse_edges_once() {
        let mut g = Graph::new();
        g.enter_edge(0_u32, 1);
        g.enter_edge(1, 0);
        g.enter_edge(1, 2);
        g.enter_edge(3, 2);
        symmetric_closure(&mut g);
        assert_eq!(g.num_edges(), 6);
        for (a, b) in [(0, 1), (1, 2), (3, 2)] {
            assert!(g.contains(a, b) && g.contains(b, a), "{a} <-> {b}");
        }
        assert_eq!(g.out_degree(2), 2);
    }
}
