// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbor Octree: a point octree over integer coordinates, with a balancing insertion order.
//!
//! Every node of an [`Octree`] stores one [`Point3`] with a payload, and has eight child
//! slots, one per [`Octant`]. A point descends into the slot whose bits say, axis by axis,
//! whether it is at or above the node's point. The tree never rebalances on its own: its shape
//! is fixed by insertion order.
//!
//! [`make_ordering`] (or a configured [`Balancer`]) reorders a point set so that inserting it
//! front to back yields a shallow tree. It uses the percentile bands of
//! [`arbor_rank`] to pick, at every level, a point that is central on all three axes.
//!
//! # Example
//!
//! ```rust
//! use arbor_octree::{make_ordering, Octant, Octree, Point3};
//!
//! let mut tree = Octree::new();
//! for (x, y, z) in [(3, 3, 3), (4, 3, 1), (1, 1, 1), (4, 4, 2)] {
//!     tree.insert(Point3::new(x, y, z), ()).unwrap();
//! }
//! let root = tree.root().unwrap();
//! // (4, 3, 1) is at or above (3, 3, 3) on x and y: slot X | Y = 3.
//! let child = root.child(Octant::X | Octant::Y).unwrap();
//! assert_eq!(child.key(), Point3::new(4, 3, 1));
//! assert_eq!(child.subtree_size(), 2);
//!
//! // A diagonal inserted in order degenerates into a list; balanced, it does not.
//! let diagonal: Vec<_> = (0..200).map(|i| Point3::new(i, i, i)).collect();
//! let mut balanced = Octree::new();
//! for p in make_ordering(diagonal) {
//!     balanced.insert(p, ()).unwrap();
//! }
//! assert_eq!(balanced.len(), 200);
//! assert!(balanced.depth() < 50);
//! ```
//!
//! Errors are shared with [`arbor_rank`]: inserting a stored point fails with
//! [`Error::DuplicateKey`], and lookups through [`Octree::get_mut`] report
//! [`Error::KeyNotFound`].

#![no_std]

extern crate alloc;

pub mod balance;
pub mod tree;
pub mod types;

pub use arbor_rank::{Error, Percent};
pub use balance::{BalanceConfig, Balancer, make_ordering};
pub use tree::{NodeRef, Octree};
pub use types::{Octant, Point3};
