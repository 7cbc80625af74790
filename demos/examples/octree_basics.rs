// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Octree basics.
//!
//! Insert a few points, inspect a node's octants, and look payloads up.
//!
//! Run:
//! - `cargo run -p arbor_demos --example octree_basics`

use arbor_octree::{Error, Octant, Octree, Point3};

fn main() {
    let mut tree = Octree::new();
    for (name, p) in [
        ("origin", Point3::new(3, 3, 3)),
        ("east", Point3::new(4, 3, 1)),
        ("low", Point3::new(1, 1, 1)),
        ("east-up", Point3::new(4, 4, 2)),
    ] {
        tree.insert(p, name).unwrap();
    }

    let root = tree.root().unwrap();
    println!("root {} holds {:?}", root.key(), root.item());
    for (octant, child) in root.children() {
        println!(
            "  slot {} ({:?}): {} with {} point(s)",
            octant.index(),
            octant,
            child.key(),
            child.subtree_size()
        );
    }

    let east = root.child(Octant::X | Octant::Y).unwrap();
    assert_eq!(east.subtree_size(), 2, "east-up should sit under east");

    // Re-inserting a stored point is rejected and leaves the tree alone.
    assert_eq!(tree.insert(Point3::new(1, 1, 1), "again"), Err(Error::DuplicateKey));
    *tree.get_mut(Point3::new(1, 1, 1)).unwrap() = "renamed";
    println!("(1, 1, 1) now holds {:?}", tree.get(Point3::new(1, 1, 1)).unwrap());
    println!("depth {}, len {}", tree.depth(), tree.len());
}
