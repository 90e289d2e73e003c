// Copyright 2025 the Lattice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid indexes over point elements.

use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashSet;

use crate::buckets::Buckets;
use crate::grid::{CellIndex, Grid};
use crate::pqueue::Pqueue;
use crate::spatial::Spatial;
use crate::stat::Stat;
use crate::types::Point3;

/// Point index keyed by caller-chosen ids.
///
/// The coordinate storage `P` defaults to an owned copy (`Point3`). Use
/// `PointSpatial<T, &'a Point3>` to index coordinates that live elsewhere without
/// copying them; the borrow keeps those coordinates immutable and alive for as long
/// as the index exists.
///
/// ```
/// use lattice_spatial::{Point3, PointSpatial, SpatialSearch};
///
/// let pts = [Point3::new(0.1, 0.1, 0.1), Point3::new(0.8, 0.2, 0.5)];
/// let mut sp: PointSpatial<usize, &Point3> = PointSpatial::new(10);
/// for (i, p) in pts.iter().enumerate() {
///     sp.insert(i, p);
/// }
/// let mut ss = SpatialSearch::new(&sp, Point3::new(0.7, 0.2, 0.5));
/// assert_eq!(ss.next_nearest().id, 1);
/// ```
pub struct PointSpatial<T, P = Point3> {
    grid: Grid,
    cells: Buckets<(T, P)>,
    len: usize,
}

impl<T, P> PointSpatial<T, P>
where
    T: Copy + Eq + Hash,
    P: Borrow<Point3>,
{
    /// Create an empty index over a `gn × gn × gn` grid.
    pub fn new(gn: u32) -> Self {
        Self {
            grid: Grid::new(gn),
            cells: Buckets::default(),
            len: 0,
        }
    }

    /// Add a point. Panics if it lies outside the unit cube (beyond a small slack).
    ///
    /// Ids are not checked for uniqueness; a duplicated id cannot be removed.
    pub fn insert(&mut self, id: T, point: P) {
        let key = self.grid.encode(self.grid.cell_of(point.borrow()));
        self.cells.push(key, (id, point));
        self.len += 1;
    }

    /// Remove the point entered as `id` at `point` and return its stored coordinates.
    ///
    /// Panics if no such entry exists in the cell of `point`.
    pub fn remove(&mut self, id: T, point: &Point3) -> P {
        let key = self.grid.encode(self.grid.cell_of(point));
        let (_, p) = self
            .cells
            .remove_one(key, |(e, _)| *e == id)
            .unwrap_or_else(|| panic!("PointSpatial::remove: id not present in its cell"));
        self.len -= 1;
        p
    }

    /// Grid partitioning the unit cube.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Number of stored points.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if no point is stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of non-empty cells.
    pub fn num_cells(&self) -> usize {
        self.cells.num_cells()
    }

    /// Distribution of points per non-empty cell.
    pub fn occupancy(&self) -> Stat {
        self.cells.occupancy()
    }

    /// Remove all points.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.len = 0;
    }

    /// Remove all points, first reporting each non-empty cell's size to `observer`.
    pub fn clear_with(&mut self, observer: impl FnMut(usize)) {
        self.cells.clear_with(observer);
        self.len = 0;
    }

    /// Release spare bucket capacity.
    pub fn shrink_to_fit(&mut self) {
        self.cells.shrink_to_fit();
    }
}

impl<T, P> Spatial for PointSpatial<T, P>
where
    T: Copy + Eq + Hash,
    P: Borrow<Point3>,
{
    type Id = T;

    fn grid(&self) -> &Grid {
        &self.grid
    }

    fn add_cell(&self, ci: CellIndex, center: &Point3, pq: &mut Pqueue<T>, _: &mut HashSet<T>) {
        let Some(bucket) = self.cells.get(self.grid.encode(ci)) else {
            return;
        };
        for (id, p) in bucket {
            pq.enter(*id, center.dist2(p.borrow()));
        }
    }
}

impl<T, P> Debug for PointSpatial<T, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PointSpatial")
            .field("grid", &self.grid)
            .field("len", &self.len)
            .field("cells", &self.cells.num_cells())
            .finish_non_exhaustive()
    }
}

/// Point index that owns a contiguous array of points and uses their positions as ids.
pub struct IndexedPointSpatial {
    grid: Grid,
    points: Vec<Point3>,
    cells: Buckets<usize>,
}

impl IndexedPointSpatial {
    /// Build an index over `points`; point `i` gets id `i`.
    ///
    /// Panics if any point lies outside the unit cube (beyond a small slack).
    pub fn new(gn: u32, points: impl IntoIterator<Item = Point3>) -> Self {
        let grid = Grid::new(gn);
        let points: Vec<Point3> = points.into_iter().collect();
        let mut cells = Buckets::default();
        for (i, p) in points.iter().enumerate() {
            cells.push(grid.encode(grid.cell_of(p)), i);
        }
        Self {
            grid,
            points,
            cells,
        }
    }

    /// Grid partitioning the unit cube.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The indexed points, in id order.
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if no point is indexed.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of non-empty cells.
    pub fn num_cells(&self) -> usize {
        self.cells.num_cells()
    }

    /// Distribution of points per non-empty cell.
    pub fn occupancy(&self) -> Stat {
        self.cells.occupancy()
    }

    /// Drop the points and the cell map.
    pub fn clear(&mut self) {
        self.clear_with(|_| {});
    }

    /// Drop the points and the cell map, first reporting each cell's size to `observer`.
    pub fn clear_with(&mut self, observer: impl FnMut(usize)) {
        self.cells.clear_with(observer);
        self.points.clear();
    }

    /// Release spare bucket capacity.
    pub fn shrink_to_fit(&mut self) {
        self.cells.shrink_to_fit();
    }
}

impl Spatial for IndexedPointSpatial {
    type Id = usize;

    fn grid(&self) -> &Grid {
        &self.grid
    }

    fn add_cell(
        &self,
        ci: CellIndex,
        center: &Point3,
        pq: &mut Pqueue<usize>,
        _: &mut HashSet<usize>,
    ) {
        let Some(bucket) = self.cells.get(self.grid.encode(ci)) else {
            return;
        };
        for &i in bucket {
            pq.enter(i, center.dist2(&self.points[i]));
        }
    }
}

impl Debug for IndexedPointSpatial {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IndexedPointSpatial")
            .field("grid", &self.grid)
            .field("len", &self.points.len())
            .field("cells", &self.cells.num_cells())
            .finish_non_exhaustive()
    }
}
