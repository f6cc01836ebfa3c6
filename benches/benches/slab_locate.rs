// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use strata_dcel::Dcel;
use strata_locate::{LocatesPoints, PointLocator, ScanLocator, SegmentKey};
use strata_tree::TreeKind;

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
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// An `n` x `n` grid of square rooms with side `cell`.
fn gen_grid(n: usize, cell: f64) -> Dcel {
    let mut points = Vec::with_capacity((n + 1) * (n + 1));
    for j in 0..=n {
        for i in 0..=n {
            points.push(Point::new(i as f64 * cell, j as f64 * cell));
        }
    }
    let at = |i: usize, j: usize| j * (n + 1) + i;
    let mut rooms = Vec::with_capacity(n * n);
    for j in 0..n {
        for i in 0..n {
            rooms.push([at(i, j), at(i + 1, j), at(i + 1, j + 1), at(i, j + 1)]);
        }
    }
    Dcel::from_points(&points, &rooms).unwrap()
}

/// The same grid with every room split along its rising diagonal.
fn gen_triangulated_grid(n: usize, cell: f64) -> Dcel {
    let mut points = Vec::with_capacity((n + 1) * (n + 1));
    for j in 0..=n {
        for i in 0..=n {
            points.push(Point::new(i as f64 * cell, j as f64 * cell));
        }
    }
    let at = |i: usize, j: usize| j * (n + 1) + i;
    let mut rooms = Vec::with_capacity(2 * n * n);
    for j in 0..n {
        for i in 0..n {
            rooms.push([at(i, j), at(i + 1, j), at(i + 1, j + 1)]);
            rooms.push([at(i, j), at(i + 1, j + 1), at(i, j + 1)]);
        }
    }
    Dcel::from_points(&points, &rooms).unwrap()
}

fn gen_queries(count: usize, extent: f64) -> Vec<[f64; 2]> {
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    (0..count)
        .map(|_| [rng.next_f64() * extent, rng.next_f64() * extent])
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &n in &[16usize, 32, 64] {
        let grid = gen_grid(n, 10.0);
        group.throughput(Throughput::Elements(grid.vertices().len() as u64));
        group.bench_function(format!("grid_f64_red_black_n{}", n), |b| {
            b.iter(|| {
                let loc: PointLocator = PointLocator::build(&grid, TreeKind::RedBlack).unwrap();
                black_box(loc.node_count());
            });
        });
        group.bench_function(format!("grid_f64_plain_n{}", n), |b| {
            b.iter(|| {
                let loc: PointLocator = PointLocator::build(&grid, TreeKind::Plain).unwrap();
                black_box(loc.node_count());
            });
        });
        let tri = gen_triangulated_grid(n, 10.0);
        group.bench_function(format!("triangles_segment_n{}", n), |b| {
            b.iter(|| {
                let loc: PointLocator<SegmentKey> =
                    PointLocator::build(&tri, TreeKind::RedBlack).unwrap();
                black_box(loc.node_count());
            });
        });
    }
    group.finish();
}

fn run_queries<L: LocatesPoints>(loc: &L, queries: &[[f64; 2]]) -> usize {
    queries
        .iter()
        .filter(|q| matches!(loc.locate(&q[..]), Ok(Some(_))))
        .count()
}

fn bench_locate(c: &mut Criterion) {
    let mut group = c.benchmark_group("locate");
    let queries = gen_queries(1_000, 320.0);
    group.throughput(Throughput::Elements(queries.len() as u64));
    for &n in &[8usize, 32] {
        let cell = 320.0 / n as f64;
        let grid = gen_grid(n, cell);
        let slab: PointLocator = PointLocator::build(&grid, TreeKind::RedBlack).unwrap();
        let plain: PointLocator = PointLocator::build(&grid, TreeKind::Plain).unwrap();
        let scan = ScanLocator::new(&grid).unwrap();
        group.bench_function(format!("grid_slab_red_black_n{}", n), |b| {
            b.iter(|| black_box(run_queries(&slab, &queries)));
        });
        group.bench_function(format!("grid_slab_plain_n{}", n), |b| {
            b.iter(|| black_box(run_queries(&plain, &queries)));
        });
        group.bench_function(format!("grid_scan_n{}", n), |b| {
            b.iter(|| black_box(run_queries(&scan, &queries)));
        });

        let tri = gen_triangulated_grid(n, cell);
        let segment: PointLocator<SegmentKey> =
            PointLocator::build(&tri, TreeKind::RedBlack).unwrap();
        group.bench_function(format!("triangles_segment_n{}", n), |b| {
            b.iter(|| black_box(run_queries(&segment, &queries)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_locate);
criterion_main!(benches);
