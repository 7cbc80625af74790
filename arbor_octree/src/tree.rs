// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point octree: every node stores one point and splits space around it into eight octants.

use alloc::vec::Vec;
use core::fmt::{self, Debug};

use arbor_rank::Error;

use crate::balance::{BalanceConfig, Balancer};
use crate::types::{Octant, Point3};

/// Octree over unique integer points, each carrying a payload.
///
/// Unlike a region octree, nodes here are the stored points themselves: the
/// first point inserted becomes the root, and each later point descends into
/// the child slot chosen by [`Octant::of`] until it finds an empty slot. The
/// shape therefore depends entirely on insertion order; use
/// [`from_balanced`](Self::from_balanced) (or order the points with
/// [`Balancer`] yourself) to get a shallow tree.
pub struct Octree<P> {
    root: Option<NodeIdx>,
    arena: Vec<Node<P>>,
}

struct Node<P> {
    key: Point3,
    item: P,
    size: usize,
    children: [Option<NodeIdx>; Octant::COUNT],
}

impl<P> Node<P> {
    const fn leaf(key: Point3, item: P) -> Self {
        Self {
            key,
            item,
            size: 1,
            children: [None; Octant::COUNT],
        }
    }

    fn child_for(&self, point: Point3) -> Option<NodeIdx> {
        self.children[Octant::of(point, self.key).index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct NodeIdx(usize);

impl NodeIdx {
    const fn new(i: usize) -> Self {
        Self(i)
    }

    const fn get(self) -> usize {
        self.0
    }
}

impl<P> Default for Octree<P> {
    fn default() -> Self {
        Self {
            root: None,
            arena: Vec::new(),
        }
    }
}

impl<P> Octree<P> {
    /// Create an empty octree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an octree from `(point, item)` entries, inserting them in the
    /// order chosen by a default [`Balancer`].
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateKey`] if two entries share a point.
    pub fn from_balanced(entries: Vec<(Point3, P)>) -> Result<Self, Error> {
        Self::from_balanced_with(BalanceConfig::default(), entries)
    }

    /// Like [`from_balanced`](Self::from_balanced) with an explicit balancing configuration.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateKey`] if two entries share a point.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip_all, name = "octree::from_balanced", fields(len = entries.len()))
    )]
    pub fn from_balanced_with(
        config: BalanceConfig,
        entries: Vec<(Point3, P)>,
    ) -> Result<Self, Error> {
        let ordered = Balancer::new(config).order_by(entries, |(point, _)| *point);
        let mut tree = Self::new();
        tree.arena.reserve(ordered.len());
        for (point, item) in ordered {
            tree.insert(point, item)?;
        }
        Ok(tree)
    }

    /// Number of stored points.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// True if no points are stored.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Insert `point` with its `item`.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateKey`] if `point` is already stored. The tree is unchanged.
    pub fn insert(&mut self, point: Point3, item: P) -> Result<(), Error> {
        let mut path = Vec::new();
        let mut slot = None;
        let mut cur = self.root;
        while let Some(idx) = cur {
            let node = &self.arena[idx.get()];
            if node.key == point {
                #[cfg(feature = "tracing")]
                tracing::trace!(%point, "rejected duplicate point");
                return Err(Error::DuplicateKey);
            }
            let octant = Octant::of(point, node.key).index();
            path.push(idx);
            slot = Some((idx, octant));
            cur = node.children[octant];
        }

        let idx = NodeIdx::new(self.arena.len());
        self.arena.push(Node::leaf(point, item));
        match slot {
            None => self.root = Some(idx),
            Some((parent, octant)) => self.arena[parent.get()].children[octant] = Some(idx),
        }
        for p in path {
            self.arena[p.get()].size += 1;
        }
        Ok(())
    }

    /// The item stored at `point`.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if `point` is not stored.
    pub fn get(&self, point: Point3) -> Result<&P, Error> {
        let idx = self.find(point).ok_or(Error::KeyNotFound)?;
        Ok(&self.arena[idx.get()].item)
    }

    /// Mutable access to the item stored at `point`.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if `point` is not stored.
    pub fn get_mut(&mut self, point: Point3) -> Result<&mut P, Error> {
        let idx = self.find(point).ok_or(Error::KeyNotFound)?;
        Ok(&mut self.arena[idx.get()].item)
    }

    /// True if `point` is stored.
    pub fn contains(&self, point: Point3) -> bool {
        self.find(point).is_some()
    }

    /// View of the root node.
    pub fn root(&self) -> Option<NodeRef<'_, P>> {
        self.root.map(|idx| NodeRef { tree: self, idx })
    }

    /// View of the node storing `point`.
    pub fn node(&self, point: Point3) -> Option<NodeRef<'_, P>> {
        self.find(point).map(|idx| NodeRef { tree: self, idx })
    }

    /// Number of nodes on the longest root-to-leaf path; `0` when empty.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(NodeIdx, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((idx, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            for child in self.arena[idx.get()].children.iter().flatten() {
                stack.push((*child, depth + 1));
            }
        }
        deepest
    }

    /// Iterate `(point, item)` in pre-order, children in octant order.
    ///
    /// Inserting the points in this order into an empty octree rebuilds the same shape.
    pub fn iter(&self) -> impl Iterator<Item = (Point3, &P)> + '_ {
        let mut stack: Vec<NodeIdx> = self.root.into_iter().collect();
        core::iter::from_fn(move || {
            let idx = stack.pop()?;
            let node = &self.arena[idx.get()];
            stack.extend(node.children.iter().rev().flatten());
            Some((node.key, &node.item))
        })
    }

    fn find(&self, point: Point3) -> Option<NodeIdx> {
        let mut cur = self.root;
        while let Some(idx) = cur {
            let node = &self.arena[idx.get()];
            if node.key == point {
                return Some(idx);
            }
            cur = node.child_for(point);
        }
        None
    }
}

impl<P> Debug for Octree<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Octree")
            .field("len", &self.arena.len())
            .field("root", &self.root.map(|r| self.arena[r.get()].key))
            .finish_non_exhaustive()
    }
}

/// Read-only view of one octree node and its subtree.
pub struct NodeRef<'a, P> {
    tree: &'a Octree<P>,
    idx: NodeIdx,
}

impl<P> Clone for NodeRef<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for NodeRef<'_, P> {}

impl<'a, P> NodeRef<'a, P> {
    fn node(&self) -> &'a Node<P> {
        &self.tree.arena[self.idx.get()]
    }

    fn view(&self, idx: Option<NodeIdx>) -> Option<Self> {
        idx.map(|idx| Self {
            tree: self.tree,
            idx,
        })
    }

    /// The point stored here.
    pub fn key(&self) -> Point3 {
        self.node().key
    }

    /// The payload stored here.
    pub fn item(&self) -> &'a P {
        &self.node().item
    }

    /// Number of points in this subtree, this one included.
    pub fn subtree_size(&self) -> usize {
        self.node().size
    }

    /// True if all eight child slots are empty.
    pub fn is_leaf(&self) -> bool {
        self.node().children.iter().all(Option::is_none)
    }

    /// The child in `octant`.
    pub fn child(&self, octant: Octant) -> Option<Self> {
        self.view(self.node().children[octant.index()])
    }

    /// The child whose octant `point` falls into, whether or not `point` is stored.
    pub fn child_for(&self, point: Point3) -> Option<Self> {
        self.view(self.node().child_for(point))
    }

    /// Non-empty children with their octants, in slot order.
    pub fn children(&self) -> impl Iterator<Item = (Octant, Self)> + 'a {
        let this = *self;
        Octant::each().filter_map(move |octant| this.child(octant).map(|c| (octant, c)))
    }

    /// Subtree size of every child slot (`0` for empty slots), in slot order.
    pub fn child_sizes(&self) -> [usize; Octant::COUNT] {
        let tree = self.tree;
        self.node()
            .children
            .map(|c| c.map_or(0, |idx| tree.arena[idx.get()].size))
    }

    /// Points below and at-or-above this node along the axes in `axis`.
    ///
    /// The first count sums the children whose octant has none of the `axis`
    /// flags, the second those having all of them. For a single axis this is the
    /// half-space split the balancer bounds.
    pub fn split(&self, axis: Octant) -> (usize, usize) {
        let mut below = 0;
        let mut above = 0;
        for (octant, size) in Octant::each().zip(self.child_sizes()) {
            if octant.contains(axis) {
                above += size;
            } else if !octant.intersects(axis) {
                below += size;
            }
        }
        (below, above)
    }
}

impl<P> Debug for NodeRef<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", &self.key())
            .field("subtree_size", &self.subtree_size())
            .finish_non_exhaustive()
    }
}
