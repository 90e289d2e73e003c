// Copyright 2025 the Lattice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Euclidean minimum spanning tree.
//!
//! Builds the EMST of random points three ways (dense Prim, threshold-growing
//! Prim over a grid index, Kruskal over a k-closest graph) and compares weights.
//!
//! Run:
//! - `cargo run -p lattice_demos --example emst`

use lattice_graph::{
    EmstConfig, dense_mst, edge_stats, euclidean_k_closest, graph_mst, num_components, quick_emst,
    symmetric_closure,
};
use lattice_spatial::{IndexedPointSpatial, Point3};

fn main() {
    let mut seed = 0x2545_F491_4F6C_DD1D_u64;
    let mut next = move || {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        (seed >> 40) as f32 / (1u64 << 24) as f32
    };
    let pts: Vec<Point3> = (0..1_000)
        .map(|_| Point3::new(next(), next(), next()))
        .collect();
    let dist = |a: usize, b: usize| pts[a].dist(&pts[b]);

    let index = IndexedPointSpatial::new(8, pts.iter().copied());
    match quick_emst(&pts, &index, &EmstConfig::default()) {
        Ok(mst) => {
            println!("quick emst weight:  {:.5}", mst.total_weight(dist));
            println!("{}", edge_stats(&mst.tree, dist));
        }
        Err(err) => println!("quick emst failed: {err}"),
    }

    let dense = dense_mst(pts.len(), dist);
    println!("dense prim weight:  {:.5}", dense.total_weight(dist));

    let mut knn = euclidean_k_closest(&pts, 6, &index);
    symmetric_closure(&mut knn);
    println!("k-closest graph components: {}", num_components(&knn));
    let kruskal = graph_mst(&knn, dist);
    println!(
        "kruskal weight:     {:.5} (connected: {})",
        kruskal.total_weight(dist),
        kruskal.is_connected
    );
}
