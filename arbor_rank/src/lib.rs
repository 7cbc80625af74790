// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbor Rank: an order-statistics binary search tree and percentile bands.
//!
//! Arbor Rank is the ordering layer under the Arbor octree balancer.
//!
//! - [`OrderStatisticsTree`] stores unique keys with payloads and tracks each subtree's size,
//!   so rank queries ([`kth_smallest`](OrderStatisticsTree::kth_smallest),
//!   [`rank_of`](OrderStatisticsTree::rank_of), [`rank_range`](OrderStatisticsTree::rank_range))
//!   cost a single descent.
//! - [`Percentiles`] wraps the tree as an ordered set and answers band queries: "everything except
//!   the bottom x% and the top y%", in ascending order.
//!
//! Failures are reported through [`Error`]: inserting a stored key is [`Error::DuplicateKey`],
//! removing or looking up a missing key is [`Error::KeyNotFound`]. A failing call never
//! leaves a partially applied change behind.
//!
//! # Example
//!
//! ```rust
//! use arbor_rank::{OrderStatisticsTree, Percent, Percentiles};
//!
//! let mut tree = OrderStatisticsTree::new();
//! for key in [40, 10, 30, 20] {
//!     tree.insert(key, ()).unwrap();
//! }
//! assert_eq!(tree.kth_smallest(2).map(|(k, _)| *k), Some(20));
//!
//! // Drop the bottom 15% and the top 66% of 0..50.
//! let band: Percentiles<i32> = (0..50).collect();
//! let kept = band.ratio(Percent::new(15.0).unwrap(), Percent::new(66.0).unwrap());
//! assert_eq!(kept, (8..=16).collect::<Vec<_>>());
//! ```
//!
//! The tree is not self-balancing; its shape follows insertion order. Every operation is
//! iterative, so degenerate shapes cost time but not stack depth.

#![no_std]

extern crate alloc;

pub mod error;
pub mod percentile;
pub mod tree;

pub use error::Error;
pub use percentile::{Percent, Percentiles};
pub use tree::{Iter, OrderStatisticsTree};

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn sorted_insertion_degenerates_but_stays_correct() {
        let mut tree = OrderStatisticsTree::new();
        for key in 0..5_000_u32 {
            tree.insert(key, key).unwrap();
        }
        assert_eq!(tree.kth_smallest(4_321).map(|(k, _)| *k), Some(4_320));
        for key in (0..5_000_u32).step_by(2) {
            assert_eq!(tree.remove(&key), Ok(key));
        }
        assert_eq!(tree.len(), 2_500);
        assert_eq!(tree.first().map(|(k, _)| *k), Some(1));
        assert_eq!(tree.rank_of(&4_999), Some(2_500));
    }

    #[test]
    fn percentiles_track_tree_removals() {
        let mut band: Percentiles<i64> = (-20..20).collect();
        for v in -20..-10 {
            band.remove_point(&v).unwrap();
        }
        let kept: Vec<_> = band.band(Percent::ZERO, Percent::new(50.0).unwrap()).copied().collect();
        assert_eq!(kept, (-10..5).collect::<Vec<_>>());
    }
}
