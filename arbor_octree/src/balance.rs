// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Insertion orders that keep a point octree shallow.
//!
//! Inserting points into an [`Octree`](crate::Octree) in arbitrary order can build
//! a list-shaped tree. The [`Balancer`] reorders a point set so that each node's
//! point sits in the central band of its subtree on every axis:
//!
//! 1. Lists shorter than [`BalanceConfig::min_len`] are returned as they are.
//! 2. The x, y and z coordinates go into one [`Percentiles`] container per axis.
//! 3. Each container is trimmed by [`BalanceConfig::band`] on both ends.
//! 4. The first point, in input order, whose three coordinates all survive the
//!    trim becomes the root. If there is none the list is returned unchanged.
//! 5. The remaining points are split into eight buckets by [`Octant::of`]
//!    relative to the root, keeping their relative order.
//! 6. Each bucket is ordered recursively and appended after the root, in octant order.
//!
//! With the default one-eighth trim and distinct coordinates on every axis, both
//! sides of every balanced node hold at least one eighth of its subtree along
//! each axis, so no half-space outweighs the other by more than 7:1.

use alloc::vec::Vec;
use core::ops::RangeInclusive;

use arbor_rank::{Percent, Percentiles};

use crate::types::{Octant, Point3};

/// Tuning for [`Balancer`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BalanceConfig {
    /// Lists shorter than this are left in input order.
    ///
    /// The default of 18 is the smallest size at which a one-eighth trim can
    /// leave at least two points on each side of every axis.
    pub min_len: usize,

    /// Share of ranks trimmed from each end of every axis when picking a root.
    pub band: Percent,
}

impl BalanceConfig {
    /// Set [`min_len`](Self::min_len).
    #[must_use]
    pub const fn with_min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len;
        self
    }

    /// Set [`band`](Self::band).
    #[must_use]
    pub const fn with_band(mut self, band: Percent) -> Self {
        self.band = band;
        self
    }
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            min_len: 18,
            band: Percent::ONE_EIGHTH,
        }
    }
}

/// Computes balanced insertion orders for point octrees.
#[derive(Copy, Clone, Debug, Default)]
pub struct Balancer {
    config: BalanceConfig,
}

impl Balancer {
    /// Create a balancer with the given configuration.
    pub const fn new(config: BalanceConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub const fn config(&self) -> &BalanceConfig {
        &self.config
    }

    /// Reorder `points` for insertion. The result is a permutation of the input.
    pub fn order(&self, points: Vec<Point3>) -> Vec<Point3> {
        self.order_by(points, |point| *point)
    }

    /// Reorder arbitrary entries by the point `key` extracts from each.
    ///
    /// Entries are moved, never cloned or dropped. Keys are expected to be
    /// distinct; repeated keys are tolerated but end up in the same bucket.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip_all, name = "balance::order", fields(len = items.len()))
    )]
    pub fn order_by<T, F>(&self, items: Vec<T>, key: F) -> Vec<T>
    where
        F: Fn(&T) -> Point3,
    {
        let mut out = Vec::with_capacity(items.len());
        self.order_into(items, &key, &mut out);
        out
    }

    fn order_into<T, F>(&self, items: Vec<T>, key: &F, out: &mut Vec<T>)
    where
        F: Fn(&T) -> Point3,
    {
        if items.len() < self.config.min_len {
            out.extend(items);
            return;
        }
        let Some(root_pos) = self.find_root(&items, key) else {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                len = items.len(),
                "no point is central on every axis, leaving subtree in input order"
            );
            out.extend(items);
            return;
        };

        let origin = key(&items[root_pos]);
        let mut buckets: [Vec<T>; Octant::COUNT] = core::array::from_fn(|_| Vec::new());
        for (pos, item) in items.into_iter().enumerate() {
            if pos == root_pos {
                out.push(item);
            } else {
                buckets[Octant::of(key(&item), origin).index()].push(item);
            }
        }
        for bucket in buckets {
            self.order_into(bucket, key, out);
        }
    }

    /// Position of the first entry that is central on all three axes.
    fn find_root<T, F>(&self, items: &[T], key: &F) -> Option<usize>
    where
        F: Fn(&T) -> Point3,
    {
        // Distinct points may share a coordinate; collecting keeps one copy of each value.
        let xs: Percentiles<i64> = items.iter().map(|item| key(item).x).collect();
        let ys: Percentiles<i64> = items.iter().map(|item| key(item).y).collect();
        let zs: Percentiles<i64> = items.iter().map(|item| key(item).z).collect();

        let band = self.config.band;
        let x = central(&xs, band)?;
        let y = central(&ys, band)?;
        let z = central(&zs, band)?;
        items.iter().position(|item| {
            let point = key(item);
            x.contains(&point.x) && y.contains(&point.y) && z.contains(&point.z)
        })
    }
}

/// Value range of the band left after trimming `band` from both ends.
fn central(values: &Percentiles<i64>, band: Percent) -> Option<RangeInclusive<i64>> {
    values
        .band_limits(band, band)
        .map(|(low, high)| *low..=*high)
}

/// Reorder `points` with the default [`BalanceConfig`].
///
/// Inserting the result into an empty [`Octree`](crate::Octree) in order builds a
/// tree whose balanced nodes split every axis no worse than 7:1.
pub fn make_ordering(points: Vec<Point3>) -> Vec<Point3> {
    Balancer::default().order(points)
}
