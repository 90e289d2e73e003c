// Copyright 2025 the Lattice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use lattice_graph::{
    EmstConfig, dense_mst, euclidean_k_closest, graph_mst, quick_emst, symmetric_closure,
};
use lattice_spatial::{IndexedPointSpatial, Point3};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_f32(&mut self) -> f32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        ((x >> 40) as f32) / ((1u64 << 24) as f32)
    }
}

fn gen_points(count: usize) -> Vec<Point3> {
    let mut rng = Rng::new(0x2545_F491_4F6C_DD1D);
    (0..count)
        .map(|_| Point3::new(rng.next_f32(), rng.next_f32(), rng.next_f32()))
        .collect()
}

fn grid_resolution(n: usize) -> u32 {
    ((n as f64 / 2.0).cbrt().ceil() as u32).clamp(1, 200)
}

fn bench_emst(c: &mut Criterion) {
    let mut group = c.benchmark_group("emst");
    for &n in &[500usize, 2_000] {
        let pts = gen_points(n);
        let index = IndexedPointSpatial::new(grid_resolution(n), pts.iter().copied());
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("dense_prim_n{}", n), |b| {
            b.iter(|| black_box(dense_mst(n, |i, j| pts[i].dist(&pts[j])).is_connected))
        });
        group.bench_function(format!("quick_n{}", n), |b| {
            b.iter(|| {
                let mst = quick_emst(&pts, &index, &EmstConfig::default()).unwrap();
                black_box(mst.tree.num_edges())
            })
        });
        group.bench_function(format!("kruskal_k8_n{}", n), |b| {
            b.iter(|| {
                let mut g = euclidean_k_closest(&pts, 8, &index);
                symmetric_closure(&mut g);
                let mst = graph_mst(&g, |i, j| pts[i].dist(&pts[j]));
                black_box(mst.is_connected)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_emst);
criterion_main!(benches);
