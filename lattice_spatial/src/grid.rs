// Copyright 2025 the Lattice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform grid over the unit cube: quantization, cell keys and cell ranges.

use crate::types::{Aabb3D, Point3};

/// Largest supported resolution. Cell keys pack 10 bits per axis.
pub const MAX_RESOLUTION: u32 = 1023;

/// Integer coordinates of a grid cell, each in `[0, resolution)`.
pub type CellIndex = [i32; 3];

/// Packed scalar key of a cell: `(x << 20) | (y << 10) | z`.
pub type CellKey = u32;

const BITS: u32 = 10;
const MASK: u32 = (1 << BITS) - 1;

// Slack tolerated around the unit cube before a coordinate is rejected.
const LOW_LIMIT: f32 = -0.01;
const HIGH_LIMIT: f32 = 1.01;
const HIGH_SNAP: f32 = 0.99999;

// Padding applied to cell bounds handed to containment predicates.
const BOUNDS_EPS: f32 = 1e-7;

/// Partition of `[0, 1)^3` into `gn × gn × gn` cubic cells.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Grid {
    gn: i32,
    inv_gn: f32,
}

impl Grid {
    /// Create a grid with `gn` cells along each axis.
    ///
    /// Panics unless `1 <= gn <= MAX_RESOLUTION`.
    pub fn new(gn: u32) -> Self {
        assert!(
            (1..=MAX_RESOLUTION).contains(&gn),
            "grid resolution {gn} outside 1..={MAX_RESOLUTION}"
        );
        #[allow(
            clippy::cast_possible_wrap,
            reason = "gn is at most MAX_RESOLUTION and fits in i32."
        )]
        let gn = gn as i32;
        Self {
            gn,
            inv_gn: 1.0 / gn as f32,
        }
    }

    /// Number of cells along each axis.
    #[allow(
        clippy::cast_sign_loss,
        reason = "gn is validated positive at construction."
    )]
    pub const fn resolution(&self) -> u32 {
        self.gn as u32
    }

    /// Largest cell index along any axis.
    pub const fn max_index(&self) -> i32 {
        self.gn - 1
    }

    /// Width of one cell.
    pub const fn cell_size(&self) -> f32 {
        self.inv_gn
    }

    /// Quantize one coordinate to a cell index.
    ///
    /// Values slightly outside `[0, 1)` are snapped onto the boundary cells.
    /// Panics for values below `-0.01` or at/above `1.01`, and for NaN.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "f is within [0, 1) so the product is below gn."
    )]
    pub fn index_from_float(&self, f: f32) -> i32 {
        let mut f = f;
        if f.is_nan() || f < 0.0 {
            assert!(
                f > LOW_LIMIT,
                "coordinate {f} is outside the unit cube (grid quantization)"
            );
            f = 0.0;
        }
        if f >= HIGH_SNAP {
            assert!(
                f < HIGH_LIMIT,
                "coordinate {f} is outside the unit cube (grid quantization)"
            );
            f = HIGH_SNAP;
        }
        (f * self.gn as f32) as i32
    }

    /// Coordinate of the lower face of cell index `i` along any axis.
    #[inline]
    pub fn float_from_index(&self, i: i32) -> f32 {
        i as f32 * self.inv_gn
    }

    /// Cell containing `p`.
    pub fn cell_of(&self, p: &Point3) -> CellIndex {
        [
            self.index_from_float(p.x),
            self.index_from_float(p.y),
            self.index_from_float(p.z),
        ]
    }

    /// Whether `ci` names a cell of this grid.
    pub fn in_bounds(&self, ci: CellIndex) -> bool {
        ci.iter().all(|&i| i >= 0 && i < self.gn)
    }

    /// Pack a cell index into its scalar key.
    #[allow(
        clippy::cast_sign_loss,
        reason = "cell indices are validated non-negative."
    )]
    pub fn encode(&self, ci: CellIndex) -> CellKey {
        debug_assert!(self.in_bounds(ci), "cell {ci:?} outside the grid");
        ((ci[0] as u32) << (2 * BITS)) | ((ci[1] as u32) << BITS) | ci[2] as u32
    }

    /// Unpack a cell key produced by [`Grid::encode`].
    #[allow(
        clippy::cast_possible_wrap,
        reason = "each unpacked component has at most 10 bits."
    )]
    pub fn decode(&self, key: CellKey) -> CellIndex {
        [
            (key >> (2 * BITS)) as i32,
            ((key >> BITS) & MASK) as i32,
            (key & MASK) as i32,
        ]
    }

    /// Bounds of a cell, padded slightly so that shared faces overlap.
    pub fn cell_bounds(&self, ci: CellIndex) -> Aabb3D {
        let lo = Point3::new(
            self.float_from_index(ci[0]),
            self.float_from_index(ci[1]),
            self.float_from_index(ci[2]),
        );
        Aabb3D::new(
            lo - Point3::splat(BOUNDS_EPS),
            lo + Point3::splat(self.inv_gn + BOUNDS_EPS),
        )
    }

    /// The cell and its (up to 26) neighbors, clamped to the grid.
    pub fn neighborhood(&self, ci: CellIndex) -> CellRange {
        let lo = ci.map(|i| (i - 1).max(0));
        let hi = ci.map(|i| (i + 1).min(self.gn - 1));
        CellRange::new(lo, hi)
    }
}

/// Iterator over every cell of the inclusive box `[lo, hi]`, last axis fastest.
#[derive(Clone, Debug)]
pub struct CellRange {
    lo: CellIndex,
    hi: CellIndex,
    cur: Option<CellIndex>,
}

impl CellRange {
    /// Cells `c` with `lo[i] <= c[i] <= hi[i]` on every axis. Empty if any `lo > hi`.
    pub fn new(lo: CellIndex, hi: CellIndex) -> Self {
        let cur = (0..3).all(|c| lo[c] <= hi[c]).then_some(lo);
        Self { lo, hi, cur }
    }
}

impl Iterator for CellRange {
    type Item = CellIndex;

    fn next(&mut self) -> Option<CellIndex> {
        let out = self.cur?;
        let mut n = out;
        let mut axis = 3;
        self.cur = loop {
            if axis == 0 {
                break None;
            }
            axis -= 1;
            if n[axis] < self.hi[axis] {
                n[axis] += 1;
                break Some(n);
            }
            n[axis] = self.lo[axis];
        };
        Some(out)
    }
}
