// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node storage types and key ordering helpers.

use alloc::vec::Vec;
use core::cmp::Ordering;

/// Balancing strategy applied after each structural mutation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TreeKind {
    /// Red-black tree: insert, delete and search are O(log n) in the worst case.
    #[default]
    RedBlack,
    /// Unbalanced binary search tree. The shape follows insertion order.
    Plain,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// Side of a node. Also names the direction of a rotation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Dir {
    Left,
    Right,
}

impl Dir {
    pub(crate) const fn flip(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeIdx(usize);

impl NodeIdx {
    pub(crate) const fn new(i: usize) -> Self {
        Self(i)
    }

    pub(crate) const fn get(self) -> usize {
        self.0
    }
}

/// A tree node. All values stored under an equal key share one node.
#[derive(Clone, Debug)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) values: Vec<V>,
    pub(crate) left: Option<NodeIdx>,
    pub(crate) right: Option<NodeIdx>,
    pub(crate) color: Color,
    /// Version epoch that created this node. Only nodes of the open epoch may be written.
    pub(crate) epoch: u64,
}

impl<K, V> Node<K, V> {
    pub(crate) fn leaf(key: K, value: V, epoch: u64) -> Self {
        let mut values = Vec::with_capacity(1);
        values.push(value);
        Self {
            key,
            values,
            left: None,
            right: None,
            color: Color::Red,
            epoch,
        }
    }

    pub(crate) const fn child(&self, dir: Dir) -> Option<NodeIdx> {
        match dir {
            Dir::Left => self.left,
            Dir::Right => self.right,
        }
    }

    pub(crate) fn child_mut(&mut self, dir: Dir) -> &mut Option<NodeIdx> {
        match dir {
            Dir::Left => &mut self.left,
            Dir::Right => &mut self.right,
        }
    }
}

/// Total order used by the tree. Keys are assumed comparable (no NaN).
#[inline]
pub(crate) fn compare<K: PartialOrd>(a: &K, b: &K) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dir_flip_round_trips() {
        assert_eq!(Dir::Left.flip(), Dir::Right);
        assert_eq!(Dir::Left.flip().flip(), Dir::Left);
    }

    #[test]
    fn leaf_starts_red_with_one_value() {
        let n: Node<i64, u8> = Node::leaf(3, 7, 2);
        assert_eq!(n.color, Color::Red);
        assert_eq!(n.values, [7]);
        assert_eq!(n.epoch, 2);
        assert!(n.child(Dir::Left).is_none() && n.child(Dir::Right).is_none());
    }
}
