// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Balance report.
//!
//! Build the same point cloud twice, once in input order and once in balanced
//! order, and compare depth and the worst splits found in the balanced tree.
//!
//! Run:
//! - `cargo run -p arbor_demos --example balance_report`

use arbor_octree::{BalanceConfig, NodeRef, Octant, Octree, Point3};

struct Lcg(u64);

impl Lcg {
    fn next_coord(&mut self) -> i64 {
        self.0 = self.0.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
        ((self.0 >> 33) % 2_000_001) as i64 - 1_000_000
    }
}

fn ratio(a: usize, b: usize) -> f64 {
    a.max(b) as f64 / a.min(b).max(1) as f64
}

fn report(name: &str, tree: &Octree<usize>) {
    let min_len = BalanceConfig::default().min_len;
    let mut worst_axis = 0.0_f64;
    let mut worst_octant = 0.0_f64;
    let mut stack: Vec<NodeRef<'_, usize>> = tree.root().into_iter().collect();
    while let Some(node) = stack.pop() {
        if node.subtree_size() >= min_len {
            for axis in [Octant::X, Octant::Y, Octant::Z] {
                let (below, above) = node.split(axis);
                worst_axis = worst_axis.max(ratio(below, above));
            }
            let sizes = node.child_sizes();
            let largest = sizes.iter().copied().max().unwrap_or(0);
            let smallest = sizes.iter().copied().min().unwrap_or(0);
            worst_octant = worst_octant.max(ratio(largest, smallest));
        }
        stack.extend(node.children().map(|(_, child)| child));
    }
    println!(
        "{name:>10}: len {:>5}  depth {:>4}  worst axis split {:>6.2}:1  worst octant ratio {:>7.2}:1",
        tree.len(),
        tree.depth(),
        worst_axis,
        worst_octant
    );
}

fn main() {
    let mut rng = Lcg(0x5EED);
    let mut points: Vec<Point3> = (0..5_000)
        .map(|_| Point3::new(rng.next_coord(), rng.next_coord(), rng.next_coord()))
        .collect();
    points.sort();
    points.dedup();

    let mut sequential = Octree::new();
    for (i, p) in points.iter().copied().enumerate() {
        sequential.insert(p, i).unwrap();
    }
    report("sorted", &sequential);

    let entries: Vec<_> = points.iter().copied().zip(0..).collect();
    let balanced = Octree::from_balanced(entries).unwrap();
    report("balanced", &balanced);

    let diagonal: Vec<_> = (0..1_000).map(|i| (Point3::new(i, i, i), 0)).collect();
    report("diagonal", &Octree::from_balanced(diagonal).unwrap());
}
