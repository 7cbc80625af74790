// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Order-statistics binary search tree backed by a dense node arena.

use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt::{self, Debug, Display, Write};

use crate::error::Error;

/// Binary search tree whose nodes track the size of their own subtree.
///
/// Subtree sizes make rank queries ([`kth_smallest`](Self::kth_smallest),
/// [`rank_of`](Self::rank_of), [`rank_range`](Self::rank_range)) cost one
/// root-to-leaf descent. The tree is not self-balancing: its depth follows the
/// insertion order. All operations are iterative, so a degenerate (list-shaped)
/// tree costs time but never stack.
///
/// Keys are unique. [`insert`](Self::insert) of a stored key fails with
/// [`Error::DuplicateKey`] and leaves the tree untouched.
pub struct OrderStatisticsTree<K, V> {
    root: Option<NodeIdx>,
    arena: Vec<Node<K, V>>,
}

struct Node<K, V> {
    key: K,
    item: V,
    left: Option<NodeIdx>,
    right: Option<NodeIdx>,
    size: usize,
}

impl<K, V> Node<K, V> {
    const fn leaf(key: K, item: V) -> Self {
        Self {
            key,
            item,
            left: None,
            right: None,
            size: 1,
        }
    }

    const fn child(&self, side: Side) -> Option<NodeIdx> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
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

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// The slot holding a reference to a node: the root pointer or a parent's child slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Link {
    Root,
    Child(NodeIdx, Side),
}

impl<K, V> Default for OrderStatisticsTree<K, V> {
    fn default() -> Self {
        Self {
            root: None,
            arena: Vec::new(),
        }
    }
}

impl<K, V> OrderStatisticsTree<K, V> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// True if no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Remove every key.
    pub fn clear(&mut self) {
        self.root = None;
        self.arena.clear();
    }

    /// The smallest key and its item.
    pub fn first(&self) -> Option<(&K, &V)> {
        let mut idx = self.root?;
        while let Some(left) = self.arena[idx.get()].left {
            idx = left;
        }
        Some(self.entry(idx))
    }

    /// The largest key and its item.
    pub fn last(&self) -> Option<(&K, &V)> {
        let mut idx = self.root?;
        while let Some(right) = self.arena[idx.get()].right {
            idx = right;
        }
        Some(self.entry(idx))
    }

    /// The entry whose in-order rank is `k` (1-indexed).
    ///
    /// Returns `None` when `k` is zero or exceeds [`len`](Self::len).
    pub fn kth_smallest(&self, k: usize) -> Option<(&K, &V)> {
        self.select(k).map(|idx| self.entry(idx))
    }

    /// Iterate entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.rank_range(1, self.len())
    }

    /// Iterate, in ascending key order, the entries whose rank lies in `front..=rear`.
    ///
    /// Ranks are 1-indexed. Bounds outside `1..=len` are clamped; an inverted
    /// range yields nothing.
    pub fn rank_range(&self, front: usize, rear: usize) -> Iter<'_, K, V> {
        let front = front.max(1);
        let rear = rear.min(self.len());
        if front > rear {
            return Iter {
                tree: self,
                stack: Vec::new(),
                remaining: 0,
            };
        }

        // Seed the stack as an in-order walk would look right before yielding `front`.
        let mut stack = Vec::new();
        let mut k = front;
        let mut cur = self.root;
        while let Some(idx) = cur {
            let node = &self.arena[idx.get()];
            let left = self.size_of(node.left);
            match k.cmp(&(left + 1)) {
                Ordering::Less => {
                    stack.push(idx);
                    cur = node.left;
                }
                Ordering::Equal => {
                    stack.push(idx);
                    break;
                }
                Ordering::Greater => {
                    k -= left + 1;
                    cur = node.right;
                }
            }
        }
        Iter {
            tree: self,
            stack,
            remaining: rear - front + 1,
        }
    }

    fn select(&self, mut k: usize) -> Option<NodeIdx> {
        if k == 0 || k > self.len() {
            return None;
        }
        let mut cur = self.root;
        while let Some(idx) = cur {
            let node = &self.arena[idx.get()];
            let left = self.size_of(node.left);
            match k.cmp(&(left + 1)) {
                Ordering::Equal => return Some(idx),
                Ordering::Less => cur = node.left,
                Ordering::Greater => {
                    k -= left + 1;
                    cur = node.right;
                }
            }
        }
        None
    }

    fn entry(&self, idx: NodeIdx) -> (&K, &V) {
        let node = &self.arena[idx.get()];
        (&node.key, &node.item)
    }

    fn size_of(&self, idx: Option<NodeIdx>) -> usize {
        idx.map_or(0, |i| self.arena[i.get()].size)
    }

    fn link(&self, link: Link) -> Option<NodeIdx> {
        match link {
            Link::Root => self.root,
            Link::Child(parent, side) => self.arena[parent.get()].child(side),
        }
    }

    fn set_link(&mut self, link: Link, to: Option<NodeIdx>) {
        match link {
            Link::Root => self.root = to,
            Link::Child(parent, Side::Left) => self.arena[parent.get()].left = to,
            Link::Child(parent, Side::Right) => self.arena[parent.get()].right = to,
        }
    }

    fn shrink_path(&mut self, path: &[NodeIdx]) {
        for idx in path {
            self.arena[idx.get()].size -= 1;
        }
    }
}

impl<K: Ord, V> OrderStatisticsTree<K, V> {
    /// Insert `key` with its `item`.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateKey`] if `key` is already stored. The tree is unchanged.
    pub fn insert(&mut self, key: K, item: V) -> Result<(), Error> {
        let mut path = Vec::new();
        let mut link = Link::Root;
        let mut cur = self.root;
        while let Some(idx) = cur {
            let node = &self.arena[idx.get()];
            let side = match key.cmp(&node.key) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(len = self.arena.len(), "rejected duplicate key");
                    return Err(Error::DuplicateKey);
                }
            };
            path.push(idx);
            link = Link::Child(idx, side);
            cur = node.child(side);
        }

        let idx = NodeIdx::new(self.arena.len());
        self.arena.push(Node::leaf(key, item));
        self.set_link(link, Some(idx));
        for p in path {
            self.arena[p.get()].size += 1;
        }
        Ok(())
    }

    /// Remove `key` and return its item.
    ///
    /// A node with two children takes over the key and item of its in-order
    /// successor, and the successor's node is unlinked instead.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if `key` is not stored. The tree is unchanged.
    pub fn remove(&mut self, key: &K) -> Result<V, Error> {
        let mut path = Vec::new();
        let mut link = Link::Root;
        let mut cur = self.root;
        let target = loop {
            let Some(idx) = cur else {
                return Err(Error::KeyNotFound);
            };
            let node = &self.arena[idx.get()];
            let side = match key.cmp(&node.key) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => break idx,
            };
            path.push(idx);
            link = Link::Child(idx, side);
            cur = node.child(side);
        };

        let node = &self.arena[target.get()];
        match (node.left, node.right) {
            (Some(_), Some(right)) => {
                path.push(target);
                let mut succ_link = Link::Child(target, Side::Right);
                let mut succ = right;
                while let Some(left) = self.arena[succ.get()].left {
                    path.push(succ);
                    succ_link = Link::Child(succ, Side::Left);
                    succ = left;
                }
                let succ_right = self.arena[succ.get()].right;
                self.set_link(succ_link, succ_right);
                self.shrink_path(&path);

                let moved_from = self.arena.len() - 1;
                let successor = self.release(succ);
                let target = if target.get() == moved_from {
                    succ
                } else {
                    target
                };
                let node = &mut self.arena[target.get()];
                node.key = successor.key;
                Ok(core::mem::replace(&mut node.item, successor.item))
            }
            (child, None) | (None, child) => {
                self.set_link(link, child);
                self.shrink_path(&path);
                Ok(self.release(target).item)
            }
        }
    }

    /// True if `key` is stored.
    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// The item stored under `key`.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if `key` is not stored.
    pub fn get(&self, key: &K) -> Result<&V, Error> {
        let idx = self.find(key).ok_or(Error::KeyNotFound)?;
        Ok(&self.arena[idx.get()].item)
    }

    /// Mutable access to the item stored under `key`.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if `key` is not stored.
    pub fn get_mut(&mut self, key: &K) -> Result<&mut V, Error> {
        let idx = self.find(key).ok_or(Error::KeyNotFound)?;
        Ok(&mut self.arena[idx.get()].item)
    }

    /// 1-indexed rank of `key`, or `None` if it is not stored.
    pub fn rank_of(&self, key: &K) -> Option<usize> {
        let mut rank = 0;
        let mut cur = self.root;
        while let Some(idx) = cur {
            let node = &self.arena[idx.get()];
            match key.cmp(&node.key) {
                Ordering::Less => cur = node.left,
                Ordering::Equal => return Some(rank + self.size_of(node.left) + 1),
                Ordering::Greater => {
                    rank += self.size_of(node.left) + 1;
                    cur = node.right;
                }
            }
        }
        None
    }

    /// The entry with the smallest key strictly greater than `key`.
    ///
    /// `key` itself does not need to be stored.
    pub fn successor(&self, key: &K) -> Option<(&K, &V)> {
        let mut best = None;
        let mut cur = self.root;
        while let Some(idx) = cur {
            let node = &self.arena[idx.get()];
            if *key < node.key {
                best = Some(idx);
                cur = node.left;
            } else {
                cur = node.right;
            }
        }
        best.map(|idx| self.entry(idx))
    }

    fn find(&self, key: &K) -> Option<NodeIdx> {
        let mut cur = self.root;
        while let Some(idx) = cur {
            let node = &self.arena[idx.get()];
            cur = match key.cmp(&node.key) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(idx),
            };
        }
        None
    }

    /// Take an unlinked node out of the arena.
    ///
    /// The arena stays dense: the last node moves into the freed slot and the one
    /// link pointing at it is found again by descending on its key.
    fn release(&mut self, idx: NodeIdx) -> Node<K, V> {
        let last = NodeIdx::new(self.arena.len() - 1);
        let node = self.arena.swap_remove(idx.get());
        if idx != last {
            let link = self.link_to_moved(last, idx);
            debug_assert!(link.is_some(), "relocated node must still be linked");
            if let Some(link) = link {
                self.set_link(link, Some(idx));
            }
        }
        node
    }

    fn link_to_moved(&self, old: NodeIdx, new: NodeIdx) -> Option<Link> {
        let key = &self.arena[new.get()].key;
        let mut link = Link::Root;
        loop {
            let next = self.link(link)?;
            if next == old {
                return Some(link);
            }
            let node = &self.arena[next.get()];
            let side = match key.cmp(&node.key) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return None,
            };
            link = Link::Child(next, side);
        }
    }
}

impl<K: Display, V> OrderStatisticsTree<K, V> {
    /// Render the tree shape, one key per line, root first.
    ///
    /// The left child is drawn under `╟─` and the right under `╙─`; a node with a
    /// single child still draws an empty line for the missing one so the sides
    /// stay distinguishable. An empty tree draws nothing.
    ///
    /// # Errors
    ///
    /// Propagates the writer's error.
    pub fn draw<W: Write>(&self, out: &mut W) -> fmt::Result {
        const LEFT: &str = "\u{255f}\u{2500}";
        const RIGHT: &str = "\u{2559}\u{2500}";
        const BAR: &str = "\u{2551} ";
        const GAP: &str = "  ";

        if self.root.is_none() {
            return Ok(());
        }
        let mut stack: Vec<(Option<NodeIdx>, Vec<&str>, &str)> = vec![(self.root, Vec::new(), "")];
        while let Some((cur, prefix, last)) = stack.pop() {
            for part in prefix.iter().take(prefix.len().saturating_sub(1)) {
                out.write_str(part)?;
            }
            out.write_str(last)?;
            let Some(idx) = cur else {
                out.write_char('\n')?;
                continue;
            };
            let node = &self.arena[idx.get()];
            writeln!(out, "{}", node.key)?;
            if node.left.is_some() || node.right.is_some() {
                let mut right_prefix = prefix.clone();
                right_prefix.push(GAP);
                let mut left_prefix = prefix;
                left_prefix.push(BAR);
                stack.push((node.right, right_prefix, RIGHT));
                stack.push((node.left, left_prefix, LEFT));
            }
        }
        Ok(())
    }
}

impl<K, V> Debug for OrderStatisticsTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderStatisticsTree")
            .field("len", &self.arena.len())
            .field("has_root", &self.root.is_some())
            .finish_non_exhaustive()
    }
}

/// Ascending iterator over a rank range of an [`OrderStatisticsTree`].
///
/// Created by [`OrderStatisticsTree::iter`] and [`OrderStatisticsTree::rank_range`].
pub struct Iter<'a, K, V> {
    tree: &'a OrderStatisticsTree<K, V>,
    stack: Vec<NodeIdx>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.stack.pop()?;
        let arena = &self.tree.arena;
        let mut cur = arena[idx.get()].right;
        while let Some(next) = cur {
            self.stack.push(next);
            cur = arena[next.get()].left;
        }
        self.remaining -= 1;
        Some(self.tree.entry(idx))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}

impl<'a, K, V> IntoIterator for &'a OrderStatisticsTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
