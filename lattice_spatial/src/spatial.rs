// Copyright 2025 the Lattice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capability trait shared by the grid indexes and consumed by [`SpatialSearch`].
//!
//! [`SpatialSearch`]: crate::SpatialSearch

use core::hash::Hash;

use hashbrown::HashSet;

use crate::grid::{CellIndex, Grid};
use crate::pqueue::Pqueue;
use crate::types::Point3;

/// A grid-bucketed collection of elements that can feed a nearest-neighbor search.
///
/// The search is generic over this trait, so the per-cell work is monomorphized.
pub trait Spatial {
    /// Caller-chosen element identifier.
    type Id: Copy + Eq + Hash;

    /// Grid partitioning the unit cube.
    fn grid(&self) -> &Grid;

    /// Queue the elements of cell `ci` with their (possibly approximate) squared
    /// distance to `center`.
    ///
    /// Elements that span several cells should use `seen` to avoid queueing twice.
    fn add_cell(
        &self,
        ci: CellIndex,
        center: &Point3,
        pq: &mut Pqueue<Self::Id>,
        seen: &mut HashSet<Self::Id>,
    );

    /// Exact squared distance for an element queued with `approx2`.
    ///
    /// Called on the front of the queue before it is reported. Point indexes queue
    /// exact values already and keep this default.
    fn refine(&self, id: Self::Id, center: &Point3, approx2: f32) -> f32 {
        let _ = (id, center);
        approx2
    }
}
