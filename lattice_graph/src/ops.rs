// Copyright 2025 the Lattice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Graph construction and summaries over point sets.

use core::hash::Hash;

use lattice_spatial::{Point3, Spatial, SpatialSearch, Stat};

use crate::graph::Graph;

/// Directed graph linking each point to its `k` nearest other points.
///
/// `index` must hold exactly the ids `0..points.len()` at the corresponding
/// positions. Points with fewer than `k` others get an edge to each of them.
/// Apply [`symmetric_closure`](crate::symmetric_closure) for an undirected graph.
pub fn euclidean_k_closest<S>(points: &[Point3], k: usize, index: &S) -> Graph<usize>
where
    S: Spatial<Id = usize>,
{
    let mut g = Graph::new();
    for i in 0..points.len() {
        g.enter(i);
    }
    for (i, p) in points.iter().enumerate() {
        let neighbors = SpatialSearch::new(index, *p)
            .map(|r| r.id)
            .filter(|&j| j != i)
            .take(k);
        for j in neighbors {
            g.enter_edge(i, j);
        }
    }
    g
}

/// Statistics of `fdist` over every directed edge of `g`.
///
/// Undirected graphs count each edge twice.
pub fn edge_stats<T>(g: &Graph<T>, mut fdist: impl FnMut(T, T) -> f32) -> Stat
where
    T: Copy + Eq + Hash,
{
    g.vertices()
        .flat_map(|v1| g.edges(v1).map(move |v2| (v1, v2)))
        .map(|(v1, v2)| fdist(v1, v2))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::symmetric_closure;
    use lattice_spatial::IndexedPointSpatial;

    fn line(n: usize) -> IndexedPointSpatial {
        IndexedPointSpatial::new(
            4,
            (0..n).map(|i| Point3::new(0.05 + 0.1 * i as f32, 0.5, 0.5)),
        )
    }

    #[test]
    fn each_point_links_to_its_k_nearest() {
        let index = line(8);
        let pts = index.points().to_vec();
        let g = euclidean_k_closest(&pts, 2, &index);
        assert_eq!(g.num_vertices(), 8);
        assert!(g.vertices().all(|v| g.out_degree(v) == 2), "out-degree k");
        assert!(!g.contains(3, 3), "no self loops");
        // Interior points link to both neighbors, end points to the next two.
        assert!(g.contains(3, 2) && g.contains(3, 4), "interior");
        assert!(g.contains(0, 1) && g.contains(0, 2), "end");
    }

    #[test]
    fn k_larger_than_population_links_everything() {
        let index = line(3);
        let pts = index.points().to_vec();
        let g = euclidean_k_closest(&pts, 10, &index);
        assert_eq!(g.num_edges(), 6);
    }

    #[test]
    fn edge_lengths_of_symmetric_graph() {
        let index = line(5);
        let pts = index.points().to_vec();
        let mut g = euclidean_k_closest(&pts, 1, &index);
        symmetric_closure(&mut g);
        let stat = edge_stats(&g, |a, b| pts[a].dist(&pts[b]));
        assert_eq!(stat.num(), g.num_edges() as u64);
        assert!((stat.avg() - 0.1).abs() < 1e-5, "unit spacing");
        assert!(stat.sdv() < 1e-5, "all edges equal");
    }
}
