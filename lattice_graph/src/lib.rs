// Copyright 2025 the Lattice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lattice Graph: sparse graphs and the spanning-tree algorithms built on
//! Lattice Spatial.
//!
//! - [`Graph`] is a directed graph over hashable vertex ids with insertion-ordered
//!   iteration; undirected graphs enter both directions of each edge.
//! - [`graph_mst`] (Kruskal, using [`UnionFind`]) and [`dense_mst`] (Prim over a
//!   distance function) compute minimum spanning trees or forests.
//! - [`quick_emst`] computes the Euclidean MST of a point set quickly by running
//!   Prim restricted to short edges found with [`SpatialSearch`], growing the edge
//!   length threshold until the result spans all points.
//! - [`Dijkstra`], [`GraphComponents`], [`euclidean_k_closest`] and [`edge_stats`]
//!   cover shortest paths, connectivity, neighbor graphs and edge summaries.
//!
//! # Example
//!
//! ```rust
//! use lattice_graph::{EmstConfig, euclidean_mst};
//! use lattice_spatial::Point3;
//!
//! let pts = [
//!     Point3::new(0.1, 0.1, 0.1),
//!     Point3::new(0.2, 0.1, 0.1),
//!     Point3::new(0.9, 0.9, 0.9),
//! ];
//! let mst = euclidean_mst(&pts, 8, &EmstConfig::default()).unwrap();
//! assert!(mst.is_connected);
//! assert!(mst.tree.contains(0, 1));
//! assert_eq!(mst.tree.num_edges(), 4);
//! ```
//!
//! [`SpatialSearch`]: lattice_spatial::SpatialSearch

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod components;
pub mod dijkstra;
pub mod graph;
pub mod mst;
pub mod ops;
pub mod union_find;

pub use components::{GraphComponents, num_components};
pub use dijkstra::Dijkstra;
pub use graph::{Graph, symmetric_closure};
pub use mst::{
    EmstConfig, EmstError, MstResult, dense_mst, euclidean_mst, graph_mst, quick_emst, try_emst,
};
pub use ops::{edge_stats, euclidean_k_closest};
pub use union_find::UnionFind;
