// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use strata_tree::{OrderedTree, PersistentTree, TreeKind};

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

fn gen_random_keys(count: usize) -> Vec<f64> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count).map(|_| rng.next_f64() * 1.0e6).collect()
}

fn gen_sorted_keys(count: usize) -> Vec<f64> {
    (0..count).map(|i| i as f64).collect()
}

fn filled(kind: TreeKind, keys: &[f64]) -> OrderedTree<f64, u32> {
    let mut tree = OrderedTree::new(kind);
    for (i, k) in keys.iter().copied().enumerate() {
        tree.insert(k, i as u32);
    }
    tree
}

fn kind_name(kind: TreeKind) -> &'static str {
    match kind {
        TreeKind::RedBlack => "red_black",
        TreeKind::Plain => "plain",
    }
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for &n in &[1_000usize, 10_000] {
        let random = gen_random_keys(n);
        let sorted = gen_sorted_keys(n);
        group.throughput(Throughput::Elements(n as u64));
        for kind in [TreeKind::RedBlack, TreeKind::Plain] {
            group.bench_function(format!("{}_random_n{}", kind_name(kind), n), |b| {
                b.iter(|| black_box(filled(kind, &random).len()));
            });
        }
        // Sorted input turns the plain tree into a list, so only the balanced kind runs it.
        group.bench_function(format!("red_black_sorted_n{}", n), |b| {
            b.iter(|| black_box(filled(TreeKind::RedBlack, &sorted).len()));
        });
    }
    group.finish();
}

fn bench_delete(c: &mut Criterion) {
    let mut group = c.benchmark_group("delete");
    let n = 10_000;
    let keys = gen_random_keys(n);
    group.throughput(Throughput::Elements(n as u64));
    for kind in [TreeKind::RedBlack, TreeKind::Plain] {
        group.bench_function(format!("{}_random_n{}", kind_name(kind), n), |b| {
            b.iter_batched(
                || filled(kind, &keys),
                |mut tree| {
                    for k in &keys {
                        let _ = tree.delete(k, None);
                    }
                    black_box(tree.len());
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    let n = 10_000;
    let keys = gen_random_keys(n);
    let mut rng = Rng::new(0xBADC_F00D_1234_5678);
    let probes: Vec<f64> = (0..1_000).map(|_| rng.next_f64() * 1.0e6).collect();
    group.throughput(Throughput::Elements(probes.len() as u64));
    for kind in [TreeKind::RedBlack, TreeKind::Plain] {
        let tree = filled(kind, &keys);
        group.bench_function(format!("{}_search_up_n{}", kind_name(kind), n), |b| {
            b.iter(|| {
                let hits = probes
                    .iter()
                    .filter(|p| tree.search_up(**p).is_some())
                    .count();
                black_box(hits);
            });
        });
    }
    group.finish();
}

fn bench_versions(c: &mut Criterion) {
    let mut group = c.benchmark_group("persistent");
    let instants = 1_000;
    let per_instant = 8;
    let keys = gen_random_keys(instants * per_instant);
    group.throughput(Throughput::Elements(instants as u64));
    group.bench_function(format!("sliding_window_i{}", instants), |b| {
        b.iter(|| {
            let mut tree = PersistentTree::new(TreeKind::RedBlack);
            for (t, chunk) in keys.chunks(per_instant).enumerate() {
                let _ = tree.set_instant(t as f64);
                for (i, k) in chunk.iter().copied().enumerate() {
                    tree.insert(k, i as u32);
                }
                // Retire the chunk inserted four instants ago.
                if t >= 4 {
                    for k in &keys[(t - 4) * per_instant..(t - 3) * per_instant] {
                        let _ = tree.delete(k, None);
                    }
                }
            }
            black_box(tree.node_count());
        });
    });
    let mut tree = PersistentTree::new(TreeKind::RedBlack);
    for (t, chunk) in keys.chunks(per_instant).enumerate() {
        let _ = tree.set_instant(t as f64);
        for (i, k) in chunk.iter().copied().enumerate() {
            tree.insert(k, i as u32);
        }
    }
    group.bench_function(format!("at_instant_search_i{}", instants), |b| {
        b.iter(|| {
            let mut hits = 0;
            for t in 0..instants {
                let view = tree.at_instant(t as f64 + 0.5);
                if view.search_up(5.0e5).is_some() {
                    hits += 1;
                }
            }
            black_box(hits);
        });
    });
    group.finish();
}

criterion_group!(benches, bench_insert, bench_delete, bench_search, bench_versions);
criterion_main!(benches);
