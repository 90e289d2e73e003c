// Copyright 2025 the Lattice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outlier removal.
//!
//! Scales a point cloud into the unit cube, then flags every point whose k-th
//! nearest neighbor is farther than a threshold (measured in the original units).
//!
//! Run:
//! - `cargo run -p lattice_demos --example outliers`

use lattice_spatial::{Aabb3D, Point3, PointSpatial, SpatialSearch, Stat};

const K: usize = 3;
const THRESHOLD: f32 = 1.5;

fn main() {
    // A dense blob around (10, 10, 10) plus a few strays.
    let mut cloud = Vec::new();
    for i in 0..10 {
        for j in 0..10 {
            for k in 0..5 {
                cloud.push(Point3::new(
                    8.0 + 0.4 * i as f32,
                    8.0 + 0.4 * j as f32,
                    9.0 + 0.4 * k as f32,
                ));
            }
        }
    }
    cloud.push(Point3::new(0.0, 0.0, 0.0));
    cloud.push(Point3::new(20.0, 3.0, 11.0));
    cloud.push(Point3::new(12.0, 18.0, 2.0));

    // Uniform scale into the unit cube.
    let bbox = Aabb3D::from_points(&cloud).expect("cloud is not empty");
    let extent = (bbox.max - bbox.min).max_abs_component();
    let scale = 0.999 / extent;
    let unit: Vec<Point3> = cloud.iter().map(|p| (*p - bbox.min) * scale).collect();

    let mut sp: PointSpatial<usize, &Point3> = PointSpatial::new(30);
    for (i, p) in unit.iter().enumerate() {
        sp.insert(i, p);
    }

    let mut kth = Stat::named("k-th neighbor distance");
    let mut outliers = Vec::new();
    for (i, p) in unit.iter().enumerate() {
        // K + 1 to include the point itself.
        let d2 = SpatialSearch::new(&sp, *p)
            .take(K + 1)
            .last()
            .map_or(0.0, |r| r.d2);
        let d = d2.sqrt() / scale;
        kth.enter(d);
        if d >= THRESHOLD {
            outliers.push(i);
        }
    }
    println!("{kth}");
    println!("found {}/{} outliers", outliers.len(), cloud.len());
    for i in outliers {
        println!("  outlier {i} at {:?}", cloud[i]);
    }
}
