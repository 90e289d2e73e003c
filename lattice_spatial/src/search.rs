// Copyright 2025 the Lattice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Incremental nearest-element search over any [`Spatial`] index.
//!
//! The search keeps a box of grid cells (the frontier) whose elements have all been
//! queued. An element is reported only once its squared distance is no larger than
//! the squared distance from the query point to the nearest unexpanded face of the
//! frontier, so no unseen element can be closer. Otherwise the frontier grows by one
//! layer of cells across that nearest face. Faces are therefore expanded in order of
//! non-decreasing distance, and results come out in non-decreasing distance order.

use core::fmt::Debug;

use hashbrown::HashSet;

use crate::grid::{CellIndex, CellRange};
use crate::pqueue::Pqueue;
use crate::spatial::Spatial;
use crate::types::Point3;

/// Soft search radius used by [`SpatialSearch::new`]. Larger than the unit cube.
pub const DEFAULT_MAX_DISTANCE: f32 = 10.0;

// Rounding slack when the query point sits on a cell face.
const FACE_EPS: f32 = 1e-6;

/// One search result.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SearchResult<Id> {
    /// Element id.
    pub id: Id,
    /// Squared distance from the query point.
    pub d2: f32,
}

#[derive(Copy, Clone, Debug)]
struct Face {
    axis: usize,
    upper: bool,
}

/// Nearest-first traversal of the elements of a [`Spatial`] index.
///
/// `max_distance` is a hint: once the queue is empty and the frontier extends
/// beyond it, the search reports itself [`done`](Self::done). Elements farther than
/// the hint may still be returned if they were already queued. When the whole grid
/// has been scanned the search always finishes.
///
/// The search borrows the index, so the index cannot change while a search is
/// alive; any number of searches may share one index.
pub struct SpatialSearch<'a, S: Spatial> {
    spatial: &'a S,
    center: Point3,
    max_dis2: f32,
    pq: Pqueue<S::Id>,
    seen: HashSet<S::Id>,
    lo: CellIndex,
    hi: CellIndex,
    // Squared distance from `center` to the nearest unexpanded face.
    boundary_d2: f32,
    next_face: Option<Face>,
    cells_visited: usize,
    elements_visited: usize,
}

impl<'a, S: Spatial> SpatialSearch<'a, S> {
    /// Start a search around `center` with [`DEFAULT_MAX_DISTANCE`].
    pub fn new(spatial: &'a S, center: Point3) -> Self {
        Self::with_max_distance(spatial, center, DEFAULT_MAX_DISTANCE)
    }

    /// Start a search around `center` that may stop beyond `max_distance`.
    ///
    /// Panics if `center` lies outside the unit cube (beyond a small slack).
    pub fn with_max_distance(spatial: &'a S, center: Point3, max_distance: f32) -> Self {
        let ci = spatial.grid().cell_of(&center);
        let mut search = Self {
            spatial,
            center,
            max_dis2: max_distance * max_distance,
            pq: Pqueue::new(),
            seen: HashSet::new(),
            lo: ci,
            hi: ci,
            boundary_d2: 0.0,
            next_face: None,
            cells_visited: 0,
            elements_visited: 0,
        };
        search.consider(ci);
        search.find_next_face();
        search
    }

    /// Query point.
    pub fn center(&self) -> Point3 {
        self.center
    }

    /// Number of cells whose contents have been queued so far.
    pub fn cells_visited(&self) -> usize {
        self.cells_visited
    }

    /// Number of elements queued so far.
    pub fn elements_visited(&self) -> usize {
        self.elements_visited
    }

    /// True when no further element can be produced within the search radius.
    ///
    /// May expand the frontier to find out.
    pub fn done(&mut self) -> bool {
        loop {
            if !self.pq.is_empty() {
                return false;
            }
            if self.next_face.is_none() || self.boundary_d2 >= self.max_dis2 {
                return true;
            }
            self.expand();
        }
    }

    /// Next closest element.
    ///
    /// Panics if the search is [`done`](Self::done).
    pub fn next_nearest(&mut self) -> SearchResult<S::Id> {
        loop {
            let Some((&id, d2)) = self.pq.peek() else {
                assert!(!self.done(), "SpatialSearch: no element left to return");
                continue;
            };
            if d2 > self.boundary_d2 {
                self.expand();
                continue;
            }
            let exact = self.spatial.refine(id, &self.center, d2);
            self.pq.remove_min();
            if exact.to_bits() != d2.to_bits() {
                self.pq.enter(id, exact);
                continue;
            }
            return SearchResult { id, d2 };
        }
    }

    fn consider(&mut self, ci: CellIndex) {
        self.cells_visited += 1;
        let before = self.pq.len();
        self.spatial
            .add_cell(ci, &self.center, &mut self.pq, &mut self.seen);
        self.elements_visited += self.pq.len() - before;
    }

    fn find_next_face(&mut self) {
        let grid = self.spatial.grid();
        let last = grid.max_index();
        let mut best: Option<(f32, Face)> = None;
        for axis in 0..3 {
            let c = self.center[axis];
            if self.lo[axis] > 0 {
                let d = face_distance(c - grid.float_from_index(self.lo[axis]));
                if best.is_none_or(|(b, _)| d < b) {
                    best = Some((d, Face { axis, upper: false }));
                }
            }
            if self.hi[axis] < last {
                let d = face_distance(grid.float_from_index(self.hi[axis] + 1) - c);
                if best.is_none_or(|(b, _)| d < b) {
                    best = Some((d, Face { axis, upper: true }));
                }
            }
        }
        match best {
            Some((d, face)) => {
                self.boundary_d2 = d * d;
                self.next_face = Some(face);
            }
            None => {
                self.boundary_d2 = f32::INFINITY;
                self.next_face = None;
            }
        }
    }

    fn expand(&mut self) {
        let Some(Face { axis, upper }) = self.next_face else {
            return;
        };
        let layer = if upper {
            self.hi[axis] += 1;
            self.hi[axis]
        } else {
            self.lo[axis] -= 1;
            self.lo[axis]
        };
        let mut lo = self.lo;
        let mut hi = self.hi;
        lo[axis] = layer;
        hi[axis] = layer;
        for ci in CellRange::new(lo, hi) {
            self.consider(ci);
        }
        self.find_next_face();
    }
}

fn face_distance(d: f32) -> f32 {
    if d < 0.0 {
        assert!(d > -FACE_EPS, "query point lies outside its frontier ({d})");
        0.0
    } else {
        d
    }
}

impl<S: Spatial> Iterator for SpatialSearch<'_, S> {
    type Item = SearchResult<S::Id>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done() {
            None
        } else {
            Some(self.next_nearest())
        }
    }
}

impl<S: Spatial> Drop for SpatialSearch<'_, S> {
    fn drop(&mut self) {
        tracing::trace!(
            cells_visited = self.cells_visited,
            elements_visited = self.elements_visited,
            "spatial search finished"
        );
    }
}

impl<S: Spatial> Debug for SpatialSearch<'_, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SpatialSearch")
            .field("center", &self.center)
            .field("frontier", &(self.lo, self.hi))
            .field("boundary_d2", &self.boundary_d2)
            .field("queued", &self.pq.len())
            .field("cells_visited", &self.cells_visited)
            .field("elements_visited", &self.elements_visited)
            .finish_non_exhaustive()
    }
}
