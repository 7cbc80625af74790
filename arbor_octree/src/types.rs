// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the octree: integer points and octant selectors.

use core::fmt;

/// A point on the integer lattice.
///
/// Ordering is lexicographic on `(x, y, z)`; it exists so points can live in
/// ordered collections and carries no spatial meaning.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point3 {
    /// X coordinate.
    pub x: i64,
    /// Y coordinate.
    pub y: i64,
    /// Z coordinate.
    pub z: i64,
}

impl Point3 {
    /// Create a point from its coordinates.
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    /// The octant of `self` relative to `origin`.
    ///
    /// Shorthand for [`Octant::of`].
    pub fn octant_from(self, origin: Self) -> Octant {
        Octant::of(self, origin)
    }
}

impl From<(i64, i64, i64)> for Point3 {
    fn from((x, y, z): (i64, i64, i64)) -> Self {
        Self::new(x, y, z)
    }
}

impl From<[i64; 3]> for Point3 {
    fn from([x, y, z]: [i64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Point3> for [i64; 3] {
    fn from(p: Point3) -> Self {
        [p.x, p.y, p.z]
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

bitflags::bitflags! {
    /// Which of the eight partitions around a reference point a point falls into.
    ///
    /// A flag is set when the point's coordinate on that axis is greater than or
    /// equal to the reference coordinate. The raw bits double as the child slot
    /// index, so the empty set is slot `0` (below on every axis) and
    /// [`Octant::all`] is slot `7` (at or above on every axis).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Octant: u8 {
        /// At or above the reference on x.
        const X = 0b001;
        /// At or above the reference on y.
        const Y = 0b010;
        /// At or above the reference on z.
        const Z = 0b100;
    }
}

impl Octant {
    /// Number of octants around a point.
    pub const COUNT: usize = 8;

    /// Classify `point` against `origin`.
    pub fn of(point: Point3, origin: Point3) -> Self {
        let mut octant = Self::empty();
        octant.set(Self::X, point.x >= origin.x);
        octant.set(Self::Y, point.y >= origin.y);
        octant.set(Self::Z, point.z >= origin.z);
        octant
    }

    /// Child slot index in `0..8`.
    pub const fn index(self) -> usize {
        self.bits() as usize
    }

    /// The octant for a slot index, or `None` outside `0..8`.
    pub fn from_index(index: usize) -> Option<Self> {
        let bits = u8::try_from(index).ok()?;
        Self::from_bits(bits)
    }

    /// All eight octants in slot order.
    pub fn each() -> impl Iterator<Item = Self> {
        (0..=Self::all().bits()).map(Self::from_bits_truncate)
    }
}
