// Copyright 2025 the Lattice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Segment probing and nearest objects.
//!
//! Registers spheres in an object index, walks a segment to find the spheres it
//! hits, and lists the spheres nearest to a point.
//!
//! Run:
//! - `cargo run -p lattice_demos --example segment_probe`

use lattice_spatial::{FnDistance, ObjectSpatial, Point3, SpatialSearch};

#[derive(Copy, Clone, Debug)]
struct Sphere {
    center: Point3,
    radius: f32,
}

impl Sphere {
    /// Distance along `p1 → p2` (as a fraction) of the first intersection, if any.
    fn hit(&self, p1: &Point3, p2: &Point3) -> Option<f32> {
        let d = *p2 - *p1;
        let m = *p1 - self.center;
        let a = d.dist2(&Point3::ZERO);
        let b = 2.0 * (m.x * d.x + m.y * d.y + m.z * d.z);
        let c = m.dist2(&Point3::ZERO) - self.radius * self.radius;
        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 {
            return None;
        }
        let t = (-b - disc.sqrt()) / (2.0 * a);
        (0.0..=1.0).contains(&t).then_some(t)
    }
}

fn main() {
    let spheres = [
        Sphere { center: Point3::new(0.2, 0.5, 0.5), radius: 0.05 },
        Sphere { center: Point3::new(0.5, 0.52, 0.5), radius: 0.1 },
        Sphere { center: Point3::new(0.8, 0.5, 0.48), radius: 0.08 },
        Sphere { center: Point3::new(0.5, 0.1, 0.9), radius: 0.04 },
    ];

    // Queue with a cheap lower bound, report the exact distance.
    let distance = FnDistance::new(
        |p: &Point3, i: usize| {
            let s = spheres[i];
            let d = (p.dist(&s.center) - s.radius * 3.0_f32.sqrt()).max(0.0);
            d * d
        },
        |p: &Point3, i: usize| {
            let s = spheres[i];
            let d = (p.dist(&s.center) - s.radius).max(0.0);
            d * d
        },
    );
    let mut index = ObjectSpatial::new(16, distance);
    for (i, s) in spheres.iter().enumerate() {
        let covered = index.insert(i, &s.center, |cell| {
            cell.dist2_to_point(&s.center) <= s.radius * s.radius
        });
        println!("sphere {i} covers {covered} cells");
    }

    let (p1, p2) = (Point3::new(0.0, 0.5, 0.5), Point3::new(1.0, 0.5, 0.5));
    let mut first: Option<(usize, f32)> = None;
    index.search_segment(&p1, &p2, |i| {
        println!("segment passes near sphere {i}");
        if let Some(t) = spheres[i].hit(&p1, &p2) {
            if first.is_none_or(|(_, best)| t < best) {
                first = Some((i, t));
            }
        }
        false
    });
    match first {
        Some((i, t)) => println!("segment first hits sphere {i} at t={t:.3}"),
        None => println!("segment hits nothing"),
    }

    let q = Point3::new(0.45, 0.2, 0.7);
    for r in SpatialSearch::new(&index, q) {
        println!("sphere {} at distance {:.4}", r.id, r.d2.sqrt());
    }
}
