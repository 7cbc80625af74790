// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use arbor_octree::{Octree, Point3, make_ordering};
use arbor_rank::{OrderStatisticsTree, Percent, Percentiles};
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};

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
    fn next_coord(&mut self, span: i64) -> i64 {
        (self.next_u64() % (2 * span as u64)) as i64 - span
    }
}

fn gen_random_points(count: usize, span: i64) -> Vec<Point3> {
    let mut out = Vec::with_capacity(count);
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    while out.len() < count {
        let p = Point3::new(rng.next_coord(span), rng.next_coord(span), rng.next_coord(span));
        out.push(p);
    }
    out.sort();
    out.dedup();
    // Undo the sort so sequential insertion sees a realistic order.
    let mut shuffle = Rng::new(0x0123_4567_89AB_CDEF);
    for i in (1..out.len()).rev() {
        let j = (shuffle.next_u64() % (i as u64 + 1)) as usize;
        out.swap(i, j);
    }
    out
}

fn gen_diagonal(count: usize) -> Vec<Point3> {
    (0..count as i64).map(|i| Point3::new(i, i, i)).collect()
}

fn build(points: &[Point3]) -> Octree<u32> {
    let mut tree = Octree::new();
    for (i, p) in points.iter().copied().enumerate() {
        let _ = tree.insert(p, i as u32);
    }
    tree
}

fn bench_octree_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("octree_insert");
    for &n in &[1_000usize, 10_000] {
        let random = gen_random_points(n, 1_000_000);
        let diagonal = gen_diagonal(n.min(2_000));
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("sequential_random_n{}", n), |b| {
            b.iter(|| black_box(build(&random).depth()));
        });
        group.bench_function(format!("balanced_random_n{}", n), |b| {
            b.iter_batched(
                || random.clone(),
                |points| black_box(build(&make_ordering(points)).depth()),
                BatchSize::SmallInput,
            );
        });
        group.bench_function(format!("balanced_diagonal_n{}", diagonal.len()), |b| {
            b.iter_batched(
                || diagonal.clone(),
                |points| black_box(build(&make_ordering(points)).depth()),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_octree_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("octree_lookup");
    let points = gen_random_points(10_000, 1_000_000);
    let sequential = build(&points);
    let balanced = build(&make_ordering(points.clone()));
    group.throughput(Throughput::Elements(points.len() as u64));
    group.bench_function("sequential_get_all", |b| {
        b.iter(|| {
            let hits = points.iter().filter(|p| sequential.get(**p).is_ok()).count();
            black_box(hits);
        });
    });
    group.bench_function("balanced_get_all", |b| {
        b.iter(|| {
            let hits = points.iter().filter(|p| balanced.get(**p).is_ok()).count();
            black_box(hits);
        });
    });
    group.finish();
}

fn bench_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank");
    let mut rng = Rng::new(0xBADC_F00D_1234_5678);
    let keys: Vec<u64> = (0..10_000).map(|_| rng.next_u64()).collect();
    group.throughput(Throughput::Elements(keys.len() as u64));
    group.bench_function("insert_kth_n10000", |b| {
        b.iter(|| {
            let mut tree = OrderStatisticsTree::new();
            for k in &keys {
                let _ = tree.insert(*k, ());
            }
            black_box(tree.kth_smallest(tree.len() / 2).map(|(k, _)| *k));
        });
    });
    let band: Percentiles<u64> = keys.iter().copied().collect();
    group.bench_function("ratio_eighth_n10000", |b| {
        b.iter(|| black_box(band.ratio(Percent::ONE_EIGHTH, Percent::ONE_EIGHTH).len()));
    });
    group.bench_function("band_limits_eighth_n10000", |b| {
        b.iter(|| black_box(band.band_limits(Percent::ONE_EIGHTH, Percent::ONE_EIGHTH)));
    });
    group.finish();
}

criterion_group!(benches, bench_octree_insert, bench_octree_lookup, bench_rank);
criterion_main!(benches);
