// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Percentile bands over an order-statistics tree.

use alloc::vec::Vec;

use crate::error::Error;
use crate::tree::OrderStatisticsTree;

/// A percentage in `0..=100`.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct Percent(f64);

impl Percent {
    /// Nothing excluded.
    pub const ZERO: Self = Self(0.0);

    /// One eighth, the per-side trim matching an eight-way octant split.
    pub const ONE_EIGHTH: Self = Self(12.5);

    /// Validate a raw percentage.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPercent`] for NaN or values outside `0..=100`.
    pub fn new(value: f64) -> Result<Self, Error> {
        if (0.0..=100.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::InvalidPercent)
        }
    }

    /// The raw percentage.
    pub const fn get(self) -> f64 {
        self.0
    }

    /// `ceil(self / 100 * total)`, never more than `total`.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "The value is non-negative and at most `total`, so it fits in usize."
    )]
    fn share_of(self, total: usize) -> usize {
        // Multiply first: 66 * 50 / 100 is exactly 33, 0.66 * 50 is not.
        let exact = self.0 * total as f64 / 100.0;
        let whole = exact as usize;
        let share = if (whole as f64) < exact { whole + 1 } else { whole };
        share.min(total)
    }
}

impl TryFrom<f64> for Percent {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// An ordered set of values answering "what lies between the bottom x% and the top y%".
///
/// Values are unique: adding a value that is already present fails with
/// [`Error::DuplicateKey`].
#[derive(Debug)]
pub struct Percentiles<T> {
    points: OrderStatisticsTree<T, ()>,
}

impl<T> Default for Percentiles<T> {
    fn default() -> Self {
        Self {
            points: OrderStatisticsTree::new(),
        }
    }
}

impl<T: Ord> Percentiles<T> {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if no values are stored.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True if `value` is stored.
    pub fn contains(&self, value: &T) -> bool {
        self.points.contains(value)
    }

    /// Add a value.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateKey`] if `value` is already stored.
    pub fn add_point(&mut self, value: T) -> Result<(), Error> {
        self.points.insert(value, ())
    }

    /// Remove a value.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if `value` is not stored.
    pub fn remove_point(&mut self, value: &T) -> Result<(), Error> {
        self.points.remove(value)
    }

    /// The inclusive 1-indexed rank bounds `(front, rear)` left after excluding
    /// the bottom `x` and the top `y` percent.
    ///
    /// `front = ceil(x/100 * len) + 1` and `rear = len - ceil(y/100 * len)`.
    /// The band is empty when `front > rear`.
    pub fn rank_bounds(&self, x: Percent, y: Percent) -> (usize, usize) {
        let total = self.len();
        (x.share_of(total) + 1, total - y.share_of(total))
    }

    /// Iterate, ascending, the values whose rank survives the `x`/`y` trim.
    pub fn band(&self, x: Percent, y: Percent) -> impl Iterator<Item = &T> + '_ {
        let (front, rear) = self.rank_bounds(x, y);
        self.points.rank_range(front, rear).map(|(value, ())| value)
    }

    /// Smallest and largest value of the band, or `None` if the band is empty.
    ///
    /// Because the band is a contiguous rank range, a stored value belongs to it
    /// exactly when it lies between these two.
    pub fn band_limits(&self, x: Percent, y: Percent) -> Option<(&T, &T)> {
        let (front, rear) = self.rank_bounds(x, y);
        if front > rear {
            return None;
        }
        let (low, ()) = self.points.kth_smallest(front)?;
        let (high, ()) = self.points.kth_smallest(rear)?;
        Some((low, high))
    }
}

impl<T: Ord + Clone> Percentiles<T> {
    /// The values whose rank survives the `x`/`y` trim, ascending.
    pub fn ratio(&self, x: Percent, y: Percent) -> Vec<T> {
        self.band(x, y).cloned().collect()
    }
}

impl<T: Ord> Extend<T> for Percentiles<T> {
    /// Add every value, skipping ones already present.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            if let Err(err) = self.add_point(value) {
                debug_assert_eq!(err, Error::DuplicateKey, "insert only fails on duplicates");
            }
        }
    }
}

impl<T: Ord> FromIterator<T> for Percentiles<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut out = Self::new();
        out.extend(iter);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use proptest::prelude::*;

    fn percent(value: f64) -> Percent {
        Percent::new(value).unwrap()
    }

    fn scrambled_0_to_49() -> Percentiles<i32> {
        let mut p = Percentiles::new();
        for i in 0..50 {
            p.add_point((i * 31) % 50).unwrap();
        }
        p
    }

    #[test]
    fn ratio_15_66_keeps_8_through_16() {
        let p = scrambled_0_to_49();
        assert_eq!(p.ratio(percent(15.0), percent(66.0)), (8..=16).collect::<Vec<_>>());
    }

    #[test]
    fn rank_bounds_follow_ceiling_rule() {
        let p = scrambled_0_to_49();
        assert_eq!(p.rank_bounds(percent(15.0), percent(66.0)), (9, 17));
        assert_eq!(p.rank_bounds(Percent::ZERO, Percent::ZERO), (1, 50));
        assert_eq!(p.rank_bounds(Percent::ONE_EIGHTH, Percent::ONE_EIGHTH), (8, 43));
        assert_eq!(p.rank_bounds(percent(100.0), percent(100.0)), (51, 0));
    }

    #[test]
    fn overlapping_trims_give_empty_band() {
        let p = scrambled_0_to_49();
        assert!(p.ratio(percent(60.0), percent(60.0)).is_empty());
        assert!(p.band_limits(percent(60.0), percent(60.0)).is_none());
        assert!(Percentiles::<i32>::new().ratio(Percent::ZERO, Percent::ZERO).is_empty());
    }

    #[test]
    fn band_limits_bracket_the_ratio() {
        let p = scrambled_0_to_49();
        let band = p.ratio(Percent::ONE_EIGHTH, Percent::ONE_EIGHTH);
        let (low, high) = p.band_limits(Percent::ONE_EIGHTH, Percent::ONE_EIGHTH).unwrap();
        assert_eq!(band.first(), Some(low));
        assert_eq!(band.last(), Some(high));
        assert_eq!(band, (7..=42).collect::<Vec<_>>());
    }

    #[test]
    fn remove_point_shifts_the_band() {
        let mut p: Percentiles<i32> = (0..10).collect();
        assert_eq!(p.ratio(percent(10.0), percent(10.0)), vec![1, 2, 3, 4, 5, 6, 7, 8]);
        p.remove_point(&0).unwrap();
        p.remove_point(&1).unwrap();
        assert_eq!(p.ratio(percent(10.0), percent(10.0)), vec![3, 4, 5, 6, 7, 8]);
        assert_eq!(p.remove_point(&1), Err(Error::KeyNotFound));
    }

    #[test]
    fn duplicates_are_rejected_and_skipped_by_extend() {
        let mut p = Percentiles::new();
        p.add_point(4).unwrap();
        assert_eq!(p.add_point(4), Err(Error::DuplicateKey));
        p.extend([4, 5, 5, 6]);
        assert_eq!(p.len(), 3);
        assert!(p.contains(&5));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn ratio_ignores_insertion_order(order in Just((0..50).collect::<Vec<i32>>()).prop_shuffle()) {
            let mut p = Percentiles::new();
            for value in order {
                p.add_point(value).unwrap();
            }
            prop_assert_eq!(p.ratio(percent(15.0), percent(66.0)), (8..=16).collect::<Vec<_>>());
            prop_assert_eq!(
                p.band_limits(Percent::ONE_EIGHTH, Percent::ONE_EIGHTH),
                Some((&7, &42))
            );
        }
    }

    #[test]
    fn percent_rejects_out_of_range() {
        assert_eq!(Percent::new(-0.5), Err(Error::InvalidPercent));
        assert_eq!(Percent::new(100.5), Err(Error::InvalidPercent));
        assert_eq!(Percent::new(f64::NAN), Err(Error::InvalidPercent));
        assert_eq!(Percent::try_from(12.5), Ok(Percent::ONE_EIGHTH));
    }
}
