// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use arbor_octree::{Octree, Point3, make_ordering};
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};

use rstar::RTree;

fn gen_lattice(n: i64) -> Vec<Point3> {
    let mut out = Vec::with_capacity((n * n * n) as usize);
    for z in 0..n {
        for y in 0..n {
            for x in 0..n {
                // Mixed-radix coordinates: no two points share a value on any axis.
                let x0 = (x * n + y) * n + z;
                let y0 = (y * n + z) * n + x;
                let z0 = (z * n + x) * n + y;
                out.push(Point3::new(x0, y0, z0));
            }
        }
    }
    out
}

fn bench_rstar_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("rstar_compare_i64");
    for &n in &[12i64, 24] {
        let points = gen_lattice(n);
        let probes: Vec<Point3> = points.iter().step_by(7).copied().collect();
        group.throughput(Throughput::Elements(points.len() as u64));

        group.bench_function(format!("arbor_balanced_build_lookup_n{}", points.len()), |b| {
            b.iter_batched(
                || points.clone(),
                |points| {
                    let mut tree = Octree::new();
                    for p in make_ordering(points) {
                        let _ = tree.insert(p, ());
                    }
                    let hits = probes.iter().filter(|p| tree.contains(**p)).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("rstar_bulk_build_lookup_n{}", points.len()), |b| {
            b.iter_batched(
                || points.iter().map(|p| <[i64; 3]>::from(*p)).collect::<Vec<_>>(),
                |raw| {
                    let tree = RTree::bulk_load(raw);
                    let hits = probes
                        .iter()
                        .filter(|p| tree.locate_at_point(&<[i64; 3]>::from(**p)).is_some())
                        .count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rstar_compare);
criterion_main!(benches);
