// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Percentile bands.
//!
//! Fill an order-statistics tree, query ranks, and trim the tails of a value set.
//!
//! Run:
//! - `cargo run -p arbor_demos --example percentile_band`

use arbor_rank::{OrderStatisticsTree, Percent, Percentiles};

fn main() {
    let mut tree = OrderStatisticsTree::new();
    for key in [50, 30, 70, 20, 40, 80, 75] {
        tree.insert(key, key * 10).unwrap();
    }
    let mut drawing = String::new();
    tree.draw(&mut drawing).unwrap();
    println!("{drawing}");
    println!("3rd smallest: {:?}", tree.kth_smallest(3));
    println!("rank of 75: {:?}", tree.rank_of(&75));

    tree.remove(&30).unwrap();
    let keys: Vec<_> = tree.iter().map(|(k, _)| *k).collect();
    println!("after removing 30: {keys:?}");

    let mut values = Percentiles::new();
    for i in 0..50 {
        values.add_point((i * 31) % 50).unwrap();
    }
    let low = Percent::new(15.0).unwrap();
    let high = Percent::new(66.0).unwrap();
    println!("rank bounds: {:?}", values.rank_bounds(low, high));
    let kept = values.ratio(low, high);
    println!("without bottom 15% and top 66%: {kept:?}");
    assert_eq!(kept, (8..=16).collect::<Vec<_>>(), "band should be 8..=16");

    let eighth = values.band_limits(Percent::ONE_EIGHTH, Percent::ONE_EIGHTH);
    println!("central band after a one-eighth trim: {eighth:?}");
}
