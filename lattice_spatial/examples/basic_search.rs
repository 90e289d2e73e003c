// Copyright 2025 the Lattice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Lattice Spatial: insert points, search nearest-first, remove.

use lattice_spatial::{Point3, PointSpatial, SpatialSearch};

fn main() {
    let mut sp: PointSpatial<&str> = PointSpatial::new(8);
    sp.insert("a", Point3::new(0.10, 0.10, 0.10));
    sp.insert("b", Point3::new(0.50, 0.50, 0.50));
    sp.insert("c", Point3::new(0.52, 0.49, 0.50));
    sp.insert("d", Point3::new(0.90, 0.20, 0.70));

    let q = Point3::new(0.48, 0.50, 0.50);
    for r in SpatialSearch::new(&sp, q) {
        println!("{} at distance {:.4}", r.id, r.d2.sqrt());
    }

    // Remove one point and search again with a small radius.
    sp.remove("b", &Point3::new(0.50, 0.50, 0.50));
    let mut ss = SpatialSearch::with_max_distance(&sp, q, 0.1);
    while !ss.done() {
        let r = ss.next_nearest();
        println!("within radius: {}", r.id);
    }
    println!(
        "cells visited: {}, elements visited: {}",
        ss.cells_visited(),
        ss.elements_visited()
    );
    println!("occupancy: {}", sp.occupancy());
}
