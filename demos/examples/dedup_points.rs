// Copyright 2025 the Lattice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimum-distance filtering.
//!
//! Streams points into an index and drops each point that lies within `MIN_DIS` of
//! one already kept. The search radius is bounded by `MIN_DIS`, so each query only
//! looks at nearby cells.
//!
//! Run:
//! - `cargo run -p lattice_demos --example dedup_points`

use lattice_spatial::{Point3, PointSpatial, SpatialSearch};

const MIN_DIS: f32 = 0.05;

fn main() {
    let mut seed = 0x1234_5678_9ABC_DEF0_u64;
    let mut next = move || {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        (seed >> 40) as f32 / (1u64 << 24) as f32
    };

    let mut kept: PointSpatial<usize> = PointSpatial::new(30);
    let mut dropped = 0;
    let total = 5_000;
    for _ in 0..total {
        let p = Point3::new(next(), next(), next());
        let mut ss = SpatialSearch::with_max_distance(&kept, p, MIN_DIS);
        let too_close = !ss.done() && ss.next_nearest().d2 < MIN_DIS * MIN_DIS;
        drop(ss);
        if too_close {
            dropped += 1;
        } else {
            let id = kept.len();
            kept.insert(id, p);
        }
    }
    println!(
        "kept {} of {} points ({} within {} of a kept point)",
        kept.len(),
        total,
        dropped,
        MIN_DIS
    );
    println!("{}", kept.occupancy());
}
