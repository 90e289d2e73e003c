// Copyright 2025 the Lattice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use lattice_spatial::{
    Aabb3D, FnDistance, IndexedPointSpatial, ObjectSpatial, Point3, PointSpatial, SpatialSearch,
};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f32(&mut self) -> f32 {
        let v = self.next_u64() >> 40;
        (v as f32) / ((1u64 << 24) as f32)
    }
    fn point(&mut self) -> Point3 {
        Point3::new(self.next_f32(), self.next_f32(), self.next_f32())
    }
}

fn gen_uniform_points(count: usize) -> Vec<Point3> {
    let mut rng = Rng::new(0x9E37_79B9_7F4A_7C15);
    (0..count).map(|_| rng.point()).collect()
}

fn gen_clustered_points(n_clusters: usize, per_cluster: usize, spread: f32) -> Vec<Point3> {
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    for _ in 0..n_clusters {
        let c = rng.point();
        for _ in 0..per_cluster {
            let d = Point3::new(
                rng.next_f32() - 0.5,
                rng.next_f32() - 0.5,
                rng.next_f32() - 0.5,
            ) * spread;
            out.push((c + d).max(Point3::ZERO).min(Point3::splat(0.999)));
        }
    }
    out
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("point_insert");
    let pts = gen_uniform_points(20_000);
    group.throughput(Throughput::Elements(pts.len() as u64));
    for &gn in &[10u32, 20, 40] {
        group.bench_function(format!("owned_gn{}", gn), |b| {
            b.iter_batched(
                || PointSpatial::<usize>::new(gn),
                |mut sp| {
                    for (i, p) in pts.iter().enumerate() {
                        sp.insert(i, *p);
                    }
                    black_box(sp.num_cells());
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_function(format!("borrowed_gn{}", gn), |b| {
            b.iter_batched(
                || PointSpatial::<usize, &Point3>::new(gn),
                |mut sp| {
                    for (i, p) in pts.iter().enumerate() {
                        sp.insert(i, p);
                    }
                    black_box(sp.num_cells());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_knn(c: &mut Criterion) {
    let mut group = c.benchmark_group("knn");
    let pts = gen_uniform_points(20_000);
    let queries = {
        let mut rng = Rng::new(0xFACE_FEED_CAFE_BABE);
        (0..256).map(|_| rng.point()).collect::<Vec<_>>()
    };
    group.throughput(Throughput::Elements(queries.len() as u64));
    for &gn in &[5u32, 10, 20, 40, 80] {
        let sp = IndexedPointSpatial::new(gn, pts.iter().copied());
        for &k in &[1usize, 16] {
            group.bench_function(format!("uniform_gn{}_k{}", gn, k), |b| {
                b.iter(|| {
                    let mut acc = 0.0_f32;
                    for q in &queries {
                        for r in SpatialSearch::new(&sp, *q).take(k) {
                            acc += r.d2;
                        }
                    }
                    black_box(acc);
                })
            });
        }
    }
    let clustered = gen_clustered_points(40, 500, 0.05);
    for &gn in &[10u32, 40] {
        let sp = IndexedPointSpatial::new(gn, clustered.iter().copied());
        group.bench_function(format!("clustered_gn{}_k8", gn), |b| {
            b.iter(|| {
                let mut acc = 0usize;
                for q in &queries {
                    for r in SpatialSearch::new(&sp, *q).take(8) {
                        acc ^= r.id;
                    }
                }
                black_box(acc);
            })
        });
    }
    group.finish();
}

fn bench_objects(c: &mut Criterion) {
    let mut group = c.benchmark_group("objects");
    let mut rng = Rng::new(0xBADC_F00D_1234_5678);
    let boxes: Vec<Aabb3D> = (0..2_000)
        .map(|_| {
            let lo = rng.point() * 0.95;
            Aabb3D::new(lo, lo + Point3::splat(0.02 + 0.03 * rng.next_f32()))
        })
        .collect();
    let distance = FnDistance::new(
        |p: &Point3, i: usize| boxes[i].dist2_to_point(p),
        |p: &Point3, i: usize| boxes[i].dist2_to_point(p),
    );
    let mut index = ObjectSpatial::new(32, distance);
    for (i, b) in boxes.iter().enumerate() {
        index.insert(i, &((b.min + b.max) * 0.5), |cell| cell.overlaps(b));
    }
    group.bench_function("nearest_object", |b| {
        let q = Point3::new(0.4, 0.6, 0.5);
        b.iter(|| black_box(SpatialSearch::new(&index, q).next()))
    });
    group.bench_function("segment_diagonal", |b| {
        b.iter(|| {
            let mut hits = 0usize;
            index.search_segment(&Point3::ZERO, &Point3::splat(1.0), |_| {
                hits += 1;
                false
            });
            black_box(hits);
        })
    });
    group.finish();
}

criterion_group!(benches, bench_insert, bench_knn, bench_objects);
criterion_main!(benches);
