// Copyright 2025 the Lattice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimum spanning trees: Kruskal over a graph, dense Prim, and spatially
//! accelerated Euclidean MSTs.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

use lattice_spatial::{HPqueue, Point3, PointSpatial, Spatial, SpatialSearch};
use ordered_float::OrderedFloat;

use crate::graph::Graph;
use crate::union_find::UnionFind;

/// A spanning tree (or forest) as an undirected graph.
#[derive(Clone, Debug)]
pub struct MstResult<T> {
    /// Tree edges, both directions entered. Holds every input vertex.
    pub tree: Graph<T>,
    /// False if the input was disconnected and `tree` is a spanning forest.
    pub is_connected: bool,
}

impl<T: Copy + Eq + Hash> MstResult<T> {
    /// Sum of `fdist` over the tree's undirected edges.
    pub fn total_weight(&self, mut fdist: impl FnMut(T, T) -> f32) -> f64 {
        let twice: f64 = self
            .tree
            .vertices()
            .flat_map(|v1| self.tree.edges(v1).map(move |v2| (v1, v2)))
            .map(|(v1, v2)| f64::from(fdist(v1, v2)))
            .sum();
        twice * 0.5
    }
}

/// Kruskal's algorithm over an undirected graph (both directions of each edge entered).
///
/// Edges are accepted in ascending `fdist` order; equal weights keep graph order.
pub fn graph_mst<T>(undirected: &Graph<T>, mut fdist: impl FnMut(T, T) -> f32) -> MstResult<T>
where
    T: Copy + Eq + Hash + Ord,
{
    let mut candidates: Vec<(f32, T, T)> = Vec::new();
    for v1 in undirected.vertices() {
        for v2 in undirected.edges(v1) {
            if v1 < v2 {
                candidates.push((fdist(v1, v2), v1, v2));
            }
        }
    }
    candidates.sort_by_key(|c| OrderedFloat(c.0));

    let mut tree = Graph::new();
    for v in undirected.vertices() {
        tree.enter(v);
    }
    let needed = undirected.num_vertices().saturating_sub(1);
    let mut uf = UnionFind::new();
    let mut accepted = 0;
    for &(_, v1, v2) in &candidates {
        if accepted == needed {
            break;
        }
        if uf.unify(v1, v2) {
            tree.enter_undirected(v1, v2);
            accepted += 1;
        }
    }
    tracing::debug!(
        vertices = undirected.num_vertices(),
        candidates = candidates.len(),
        accepted,
        "kruskal mst"
    );
    MstResult {
        tree,
        is_connected: accepted == needed,
    }
}

/// Prim's algorithm on the complete graph over `0..num`, in `O(num²)` calls to `fdist`.
///
/// Infinite distances mean "no edge". When the cheapest remaining vertex is only
/// reachable at infinite cost, a new tree is started from it and the result is a
/// spanning forest with `is_connected == false`.
pub fn dense_mst(num: usize, mut fdist: impl FnMut(usize, usize) -> f32) -> MstResult<usize> {
    let mut tree = Graph::new();
    for i in 0..num {
        tree.enter(i);
    }
    if num == 0 {
        return MstResult {
            tree,
            is_connected: true,
        };
    }
    let mut in_tree = vec![false; num];
    let mut lowcost = vec![f32::INFINITY; num];
    let mut closest = vec![0_usize; num];
    in_tree[0] = true;
    for (i, cost) in lowcost.iter_mut().enumerate().skip(1) {
        *cost = fdist(0, i);
    }
    let mut is_connected = true;
    for _ in 1..num {
        let Some(j) = (0..num)
            .filter(|&k| !in_tree[k])
            .min_by_key(|&k| OrderedFloat(lowcost[k]))
        else {
            break;
        };
        in_tree[j] = true;
        if lowcost[j].is_finite() {
            tree.enter_undirected(closest[j], j);
        } else {
            is_connected = false;
        }
        for (k, (cost, near)) in lowcost.iter_mut().zip(closest.iter_mut()).enumerate() {
            if in_tree[k] {
                continue;
            }
            let d = fdist(j, k);
            if d < *cost {
                *cost = d;
                *near = j;
            }
        }
    }
    MstResult { tree, is_connected }
}

/// Try to build the Euclidean MST of `points` from edges shorter than `thresh` only.
///
/// `index` must hold exactly the ids `0..points.len()` at the corresponding
/// positions. Returns `None` if those short edges do not connect all points.
pub fn try_emst<S>(thresh: f32, points: &[Point3], index: &S) -> Option<Graph<usize>>
where
    S: Spatial<Id = usize>,
{
    let n = points.len();
    let mut tree = Graph::new();
    for i in 0..n {
        tree.enter(i);
    }
    if n == 0 {
        return Some(tree);
    }
    let thresh2 = thresh * thresh;
    let mut in_tree = vec![false; n];
    let mut closest = vec![0_usize; n];
    let mut reached = 0;
    let mut pq = HPqueue::new();
    pq.enter(0_usize, 0.0);
    while let Some((i, _)) = pq.remove_min() {
        if i != 0 {
            tree.enter_undirected(closest[i], i);
        }
        in_tree[i] = true;
        reached += 1;
        let mut ss = SpatialSearch::with_max_distance(index, points[i], thresh);
        while !ss.done() {
            let r = ss.next_nearest();
            if r.d2 > thresh2 {
                break;
            }
            let j = r.id;
            assert!(j < n, "spatial index holds id {j} but only {n} points were given");
            if in_tree[j] {
                continue;
            }
            if pq.enter_update_if_smaller(j, r.d2) {
                closest[j] = i;
            }
        }
    }
    (reached == n).then_some(tree)
}

/// Parameters of the threshold-growing Euclidean MST search.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EmstConfig {
    /// Edge-length threshold of the first attempt.
    pub initial_threshold: f32,
    /// Factor applied to the threshold after each failed attempt. Must exceed 1.
    pub growth: f32,
    /// A failed attempt at or above this threshold is an error.
    ///
    /// The default (2.0) exceeds the unit-cube diagonal, so it is only reached when
    /// the index does not hold the given points.
    pub max_threshold: f32,
}

impl Default for EmstConfig {
    fn default() -> Self {
        Self {
            initial_threshold: 0.02,
            growth: 1.6,
            max_threshold: 2.0,
        }
    }
}

impl EmstConfig {
    /// Check that the thresholds are positive and the growth factor exceeds 1.
    pub fn validate(&self) -> Result<(), EmstError> {
        if !(self.initial_threshold.is_finite() && self.initial_threshold > 0.0) {
            return Err(EmstError::InvalidConfig(
                "initial_threshold must be positive and finite",
            ));
        }
        if !(self.growth.is_finite() && self.growth > 1.0) {
            return Err(EmstError::InvalidConfig("growth must be finite and exceed 1"));
        }
        if self.max_threshold.is_nan() || self.max_threshold <= 0.0 {
            return Err(EmstError::InvalidConfig("max_threshold must be positive"));
        }
        Ok(())
    }
}

/// Failure of [`quick_emst`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EmstError {
    /// No attempt up to the configured maximum threshold spanned all points.
    ThresholdExceeded {
        /// Threshold of the last failed attempt.
        threshold: f32,
        /// Number of attempts made.
        attempts: u32,
    },
    /// The configuration was rejected by [`EmstConfig::validate`].
    InvalidConfig(&'static str),
}

impl fmt::Display for EmstError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThresholdExceeded {
                threshold,
                attempts,
            } => write!(
                f,
                "no spanning tree after {attempts} attempts (threshold reached {threshold})"
            ),
            Self::InvalidConfig(reason) => write!(f, "invalid EMST configuration: {reason}"),
        }
    }
}

impl core::error::Error for EmstError {}

/// Euclidean MST of `points` by repeated [`try_emst`] with a growing threshold.
///
/// `index` must hold exactly the ids `0..points.len()` at the corresponding
/// positions. The result is always connected.
pub fn quick_emst<S>(
    points: &[Point3],
    index: &S,
    config: &EmstConfig,
) -> Result<MstResult<usize>, EmstError>
where
    S: Spatial<Id = usize>,
{
    config.validate()?;
    let mut threshold = config.initial_threshold;
    let mut attempts = 0;
    loop {
        attempts += 1;
        if let Some(tree) = try_emst(threshold, points, index) {
            tracing::debug!(attempts, threshold, points = points.len(), "quick emst");
            return Ok(MstResult {
                tree,
                is_connected: true,
            });
        }
        if threshold >= config.max_threshold {
            tracing::debug!(attempts, threshold, "quick emst gave up");
            return Err(EmstError::ThresholdExceeded {
                threshold,
                attempts,
            });
        }
        threshold *= config.growth;
    }
}

/// Index `points` on a `gn³` grid without copying them, then run [`quick_emst`].
pub fn euclidean_mst(
    points: &[Point3],
    gn: u32,
    config: &EmstConfig,
) -> Result<MstResult<usize>, EmstError> {
    let mut index: PointSpatial<usize, &Point3> = PointSpatial::new(gn);
    for (i, p) in points.iter().enumerate() {
        index.insert(i, p);
    }
    quick_emst(points, &index, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_spatial::IndexedPointSpatial;

    struct Rng(u64);

    impl Rng {
        fn next_f32(&mut self) -> f32 {
            let mut x = self.0;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            self.0 = x;
            (x >> 40) as f32 / (1_u64 << 24) as f32
        }
        fn points(&mut self, n: usize) -> Vec<Point3> {
            (0..n)
                .map(|_| Point3::new(self.next_f32(), self.next_f32(), self.next_f32()))
                .collect()
        }
    }

    fn square_and_center() -> Vec<Point3> {
        Vec::from([
            Point3::new(0.25, 0.25, 0.5),
            Point3::new(0.75, 0.25, 0.5),
            Point3::new(0.75, 0.75, 0.5),
            Point3::new(0.25, 0.75, 0.5),
            Point3::new(0.5, 0.5, 0.5),
        ])
    }

    fn complete_graph(n: usize) -> Graph<usize> {
        let mut g = Graph::new();
        for i in 0..n {
            g.enter(i);
        }
        for i in 0..n {
            for j in i + 1..n {
                g.enter_undirected(i, j);
            }
        }
        g
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn square_with_center_connects_through_center() {
        let pts = square_and_center();
        let dist = |a: usize, b: usize| pts[a].dist(&pts[b]);
        // Four spokes of length sqrt(0.125).
        let expected = 4.0 * 0.125_f64.sqrt();

        let prim = dense_mst(pts.len(), dist);
        assert!(prim.is_connected);
        assert!(close(prim.total_weight(dist), expected), "dense prim");
        assert_eq!(prim.tree.out_degree(4), 4);

        let kruskal = graph_mst(&complete_graph(pts.len()), dist);
        assert!(kruskal.is_connected);
        assert!(close(kruskal.total_weight(dist), expected), "kruskal");

        let index = IndexedPointSpatial::new(4, pts.iter().copied());
        let quick = quick_emst(&pts, &index, &EmstConfig::default()).unwrap();
        assert!(close(quick.total_weight(dist), expected), "quick emst");
        assert_eq!(quick.tree.num_edges(), 2 * (pts.len() - 1));
    }

    #[test]
    fn kruskal_prim_and_quick_agree_on_random_points() {
        let pts = Rng(0x2545_F491).points(20);
        let dist = |a: usize, b: usize| pts[a].dist(&pts[b]);
        let prim = dense_mst(pts.len(), dist).total_weight(dist);
        let kruskal = graph_mst(&complete_graph(pts.len()), dist).total_weight(dist);
        let quick = euclidean_mst(&pts, 5, &EmstConfig::default())
            .unwrap()
            .total_weight(dist);
        assert!(close(prim, kruskal), "prim {prim} vs kruskal {kruskal}");
        assert!(close(prim, quick), "prim {prim} vs quick {quick}");
    }

    #[test]
    fn quick_emst_on_many_points_spans_everything() {
        let pts = Rng(99).points(500);
        let index = IndexedPointSpatial::new(8, pts.iter().copied());
        let mst = quick_emst(&pts, &index, &EmstConfig::default()).unwrap();
        assert!(mst.is_connected);
        assert_eq!(mst.tree.num_vertices(), 500);
        assert_eq!(mst.tree.num_edges(), 2 * 499);
        let dist = |a: usize, b: usize| pts[a].dist(&pts[b]);
        let prim = dense_mst(pts.len(), dist).total_weight(dist);
        assert!(close(prim, mst.total_weight(dist)), "same weight as dense prim");
    }

    #[test]
    fn identical_points_span_on_first_attempt() {
        let pts = Vec::from([Point3::splat(0.3); 6]);
        let mst = euclidean_mst(&pts, 4, &EmstConfig::default()).unwrap();
        assert_eq!(mst.tree.num_edges(), 10);
        assert_eq!(mst.total_weight(|a, b| pts[a].dist(&pts[b])), 0.0);
    }

    #[test]
    fn empty_and_single_point() {
        let none: [Point3; 0] = [];
        let mst = euclidean_mst(&none, 2, &EmstConfig::default()).unwrap();
        assert!(mst.tree.is_empty());
        let one = [Point3::splat(0.5)];
        let mst = euclidean_mst(&one, 2, &EmstConfig::default()).unwrap();
        assert_eq!(mst.tree.num_vertices(), 1);
        assert_eq!(mst.tree.num_edges(), 0);
        assert!(dense_mst(0, |_, _| 0.0).is_connected);
    }

    #[test]
    fn dense_prim_reports_forest_for_disconnected_input() {
        // Two clusters with no edge between them.
        let cluster = |i: usize| i / 3;
        let fdist = |a: usize, b: usize| {
            if cluster(a) == cluster(b) {
                (a as f32 - b as f32).abs()
            } else {
                f32::INFINITY
            }
        };
        let forest = dense_mst(6, fdist);
        assert!(!forest.is_connected);
        assert_eq!(forest.tree.num_edges(), 2 * 4);
        assert_eq!(forest.total_weight(fdist), 4.0);
    }

    #[test]
    fn kruskal_on_disconnected_graph_is_a_forest() {
        let mut g = Graph::new();
        g.enter_undirected(0_u32, 1);
        g.enter_undirected(1, 2);
        g.enter_undirected(0, 2);
        g.enter_undirected(5, 6);
        let mst = graph_mst(&g, |a, b| (a + b) as f32);
        assert!(!mst.is_connected);
        assert_eq!(mst.tree.num_edges(), 2 * 3);
        assert!(!mst.tree.contains(1, 2), "heaviest triangle edge dropped");
    }

    #[test]
    fn points_missing_from_index_exceed_threshold() {
        let pts = Rng(7).points(10);
        // The index only knows the first five points.
        let index = IndexedPointSpatial::new(4, pts[..5].iter().copied());
        assert!(try_emst(10.0, &pts, &index).is_none());
        let err = quick_emst(&pts, &index, &EmstConfig::default()).unwrap_err();
        let EmstError::ThresholdExceeded {
            threshold,
            attempts,
        } = err
        else {
            panic!("unexpected error {err}");
        };
        assert!(threshold >= 2.0, "stopped at the cap");
        // 0.02 * 1.6^10 ≈ 2.2
        assert_eq!(attempts, 11);
    }

    #[test]
    fn invalid_configs_are_rejected() {
        let pts = [Point3::splat(0.5)];
        for config in [
            EmstConfig {
                growth: 1.0,
                ..EmstConfig::default()
            },
            EmstConfig {
                initial_threshold: 0.0,
                ..EmstConfig::default()
            },
            EmstConfig {
                max_threshold: -1.0,
                ..EmstConfig::default()
            },
        ] {
            let err = euclidean_mst(&pts, 2, &config).unwrap_err();
            assert!(
                matches!(err, EmstError::InvalidConfig(_)),
                "rejected: {config:?}"
            );
        }
    }
}
