// Copyright 2025 the Lattice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lattice Spatial: uniform-grid indexes over the unit cube with incremental
//! nearest-neighbor search.
//!
//! - [`PointSpatial`] stores points under caller-chosen ids, either copying the
//!   coordinates or borrowing them (`PointSpatial<T, &Point3>`).
//! - [`IndexedPointSpatial`] owns a point array and uses positions as ids.
//! - [`ObjectSpatial`] registers extended objects in every cell they overlap
//!   (flood-fill insertion) and supports segment traversal.
//! - [`SpatialSearch`] walks any [`Spatial`] index nearest-first, growing a box of
//!   visited cells one layer at a time and returning elements in non-decreasing
//!   squared distance.
//!
//! Coordinates are expected in `[0, 1)^3`. Values within `0.01` outside the cube are
//! snapped onto the boundary cells; values farther out are a caller bug and panic.
//!
//! # Example
//!
//! ```rust
//! use lattice_spatial::{Point3, PointSpatial, SpatialSearch};
//!
//! let mut sp: PointSpatial<u32> = PointSpatial::new(16);
//! sp.insert(1, Point3::new(0.1, 0.2, 0.3));
//! sp.insert(2, Point3::new(0.8, 0.8, 0.8));
//! sp.insert(3, Point3::new(0.15, 0.2, 0.3));
//!
//! // Two nearest neighbors of a query point.
//! let near: Vec<u32> = SpatialSearch::new(&sp, Point3::new(0.16, 0.2, 0.3))
//!     .take(2)
//!     .map(|r| r.id)
//!     .collect();
//! assert_eq!(near, [3, 1]);
//! ```
//!
//! ## Choosing a resolution
//!
//! Each search visits at least the cells of its frontier, so a grid much finer than
//! the point spacing wastes time on empty cells, and a coarse grid puts many points
//! in each cell. For `n` roughly uniform points, `gn ≈ (n / 2)^(1/3)` is a good start.
//! The resolution is limited to [`MAX_RESOLUTION`] cells per axis.
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs. Priorities are ordered with `ordered_float::OrderedFloat`; entries
//! with equal distance come out in the order they were queued.
//!
//! ## Features
//!
//! - `std` (default): links the standard library for float math.
//! - `libm`: float math for `no_std` targets.

#![no_std]

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("lattice_spatial requires either the `std` or `libm` feature");

mod buckets;
pub mod grid;
pub mod object;
pub mod point;
pub mod pqueue;
pub mod search;
pub mod spatial;
pub mod stat;
pub mod types;

pub use grid::{CellIndex, CellKey, CellRange, Grid, MAX_RESOLUTION};
pub use object::{FnDistance, ObjectDistance, ObjectSpatial};
pub use point::{IndexedPointSpatial, PointSpatial};
pub use pqueue::{HPqueue, Pqueue};
pub use search::{DEFAULT_MAX_DISTANCE, SearchResult, SpatialSearch};
pub use spatial::Spatial;
pub use stat::Stat;
pub use types::{Aabb3D, Point3};
