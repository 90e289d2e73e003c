// Copyright 2025 the Lattice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid index over extended objects that may cover many cells.

use alloc::collections::VecDeque;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashSet;

use crate::buckets::Buckets;
use crate::grid::{CellIndex, CellRange, Grid};
use crate::pqueue::Pqueue;
use crate::spatial::Spatial;
use crate::stat::Stat;
use crate::types::{Aabb3D, Point3};

/// Squared distance from a query point to an object.
///
/// `approx2` is used when the object is first queued and must never exceed the
/// exact value; `exact2` is evaluated before the object is reported.
pub trait ObjectDistance<T> {
    /// Cheap lower bound on the squared distance from `p` to object `id`.
    fn approx2(&self, p: &Point3, id: T) -> f32;

    /// Exact squared distance from `p` to object `id`.
    fn exact2(&self, p: &Point3, id: T) -> f32 {
        self.approx2(p, id)
    }
}

/// [`ObjectDistance`] built from two closures.
#[derive(Clone)]
pub struct FnDistance<A, E> {
    approx: A,
    exact: E,
}

impl<A, E> FnDistance<A, E> {
    /// Use `approx` for queueing and `exact` for reporting.
    pub fn new(approx: A, exact: E) -> Self {
        Self { approx, exact }
    }
}

impl<T, A, E> ObjectDistance<T> for FnDistance<A, E>
where
    A: Fn(&Point3, T) -> f32,
    E: Fn(&Point3, T) -> f32,
{
    fn approx2(&self, p: &Point3, id: T) -> f32 {
        (self.approx)(p, id)
    }

    fn exact2(&self, p: &Point3, id: T) -> f32 {
        (self.exact)(p, id)
    }
}

impl<A, E> Debug for FnDistance<A, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FnDistance").finish_non_exhaustive()
    }
}

/// Index of objects registered in every cell they overlap.
///
/// The index stores ids only; geometry stays with the caller and is reached through
/// the [`ObjectDistance`] and the predicates passed to [`ObjectSpatial::insert`].
pub struct ObjectSpatial<T, D> {
    grid: Grid,
    cells: Buckets<T>,
    distance: D,
}

impl<T, D> ObjectSpatial<T, D>
where
    T: Copy + Eq + Hash,
    D: ObjectDistance<T>,
{
    /// Create an empty index over a `gn × gn × gn` grid.
    pub fn new(gn: u32, distance: D) -> Self {
        Self {
            grid: Grid::new(gn),
            cells: Buckets::default(),
            distance,
        }
    }

    /// Grid partitioning the unit cube.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Distance functions used by nearest searches.
    pub fn distance(&self) -> &D {
        &self.distance
    }

    /// Register `id` in the connected set of cells reachable from the cell of `seed`
    /// whose (slightly padded) bounds satisfy `contains`.
    ///
    /// Neighbors are the 26 cells around a cell. Returns the number of cells covered.
    /// Panics if the cell of `seed` does not satisfy `contains`.
    pub fn insert(
        &mut self,
        id: T,
        seed: &Point3,
        mut contains: impl FnMut(&Aabb3D) -> bool,
    ) -> usize {
        let start = self.grid.cell_of(seed);
        assert!(
            contains(&self.grid.cell_bounds(start)),
            "ObjectSpatial::insert: seed cell does not meet the object"
        );
        let mut visited = HashSet::new();
        visited.insert(self.grid.encode(start));
        let mut queue = VecDeque::from([start]);
        let mut covered = 0;
        while let Some(ci) = queue.pop_front() {
            self.cells.push(self.grid.encode(ci), id);
            covered += 1;
            for n in self.grid.neighborhood(ci) {
                if visited.insert(self.grid.encode(n)) && contains(&self.grid.cell_bounds(n)) {
                    queue.push_back(n);
                }
            }
        }
        tracing::trace!(covered, "object inserted");
        covered
    }

    /// Walk the cells crossed by the segment from `p1` to `p2`, calling `test` once for each
    /// object found there, in rough order along the segment.
    ///
    /// When `test` returns true, the cells of the current step are finished and the
    /// walk stops. Panics if either endpoint is outside `[0, 1]^3`.
    pub fn search_segment(&self, p1: &Point3, p2: &Point3, mut test: impl FnMut(T) -> bool) {
        for c in 0..3 {
            assert!(
                (0.0..=1.0).contains(&p1[c]) && (0.0..=1.0).contains(&p2[c]),
                "segment endpoint outside the unit cube"
            );
        }
        let delta = *p2 - *p1;
        let steps = self.grid.index_from_float(delta.max_abs_component()) + 2;
        let step = delta * ((1.0 + 1e-7) / steps as f32);
        let mut seen = HashSet::new();
        let mut p = *p1;
        let mut prev = self.grid.cell_of(&p);
        let mut prev_key = None;
        for i in 0..=steps {
            let cur = self.grid.cell_of(&p);
            let lo = [0, 1, 2].map(|c| cur[c].min(prev[c]));
            let hi = [0, 1, 2].map(|c| cur[c].max(prev[c]));
            let mut stop = false;
            for ci in CellRange::new(lo, hi) {
                let key = self.grid.encode(ci);
                if prev_key == Some(key) {
                    continue;
                }
                let Some(bucket) = self.cells.get(key) else {
                    continue;
                };
                for &id in bucket {
                    if seen.insert(id) && test(id) {
                        stop = true;
                    }
                }
            }
            if stop {
                return;
            }
            if i == steps {
                break;
            }
            prev = cur;
            prev_key = Some(self.grid.encode(cur));
            p = p + step;
        }
    }

    /// Number of non-empty cells.
    pub fn num_cells(&self) -> usize {
        self.cells.num_cells()
    }

    /// Distribution of object entries per non-empty cell.
    pub fn occupancy(&self) -> Stat {
        self.cells.occupancy()
    }

    /// Remove all objects.
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Remove all objects, first reporting each non-empty cell's entry count to `observer`.
    pub fn clear_with(&mut self, observer: impl FnMut(usize)) {
        self.cells.clear_with(observer);
    }
}

impl<T, D> Spatial for ObjectSpatial<T, D>
where
    T: Copy + Eq + Hash,
    D: ObjectDistance<T>,
{
    type Id = T;

    fn grid(&self) -> &Grid {
        &self.grid
    }

    fn add_cell(&self, ci: CellIndex, center: &Point3, pq: &mut Pqueue<T>, seen: &mut HashSet<T>) {
        let Some(bucket) = self.cells.get(self.grid.encode(ci)) else {
            return;
        };
        for &id in bucket {
            if seen.insert(id) {
                pq.enter(id, self.distance.approx2(center, id));
            }
        }
    }

    fn refine(&self, id: T, center: &Point3, approx2: f32) -> f32 {
        let exact2 = self.distance.exact2(center, id);
        if exact2 < approx2 - 1e-12 {
            tracing::warn!(approx2, exact2, "object distance estimate exceeds the exact value");
        }
        exact2
    }
}

impl<T, D> Debug for ObjectSpatial<T, D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ObjectSpatial")
            .field("grid", &self.grid)
            .field("cells", &self.cells.num_cells())
            .finish_non_exhaustive()
    }
}
