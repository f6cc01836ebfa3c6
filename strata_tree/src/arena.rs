// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Copy-on-write node arena and the binary search tree mutations built on it.
//!
//! Nodes live in a flat `Vec` and link to each other by [`NodeIdx`]. There are no
//! parent links: a mutation first records the root-to-target path, then makes every
//! node on it writable. A node is writable when it was created in the open epoch;
//! otherwise it is cloned into a fresh slot and its parent is relinked to the clone.
//! Sealing bumps the epoch, so every node reachable from a sealed root is frozen and
//! later mutations copy only the O(log n) nodes they touch.

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::mem;

use crate::error::TreeError;
use crate::types::{Color, Dir, Node, NodeIdx, TreeKind, compare};
use crate::view::TreeView;

pub(crate) struct RawTree<K, V> {
    nodes: Vec<Node<K, V>>,
    free_list: Vec<NodeIdx>,
    epoch: u64,
    pub(crate) root: Option<NodeIdx>,
    pub(crate) len: usize,
    pub(crate) kind: TreeKind,
}

impl<K, V> RawTree<K, V> {
    pub(crate) const fn new(kind: TreeKind) -> Self {
        Self {
            nodes: Vec::new(),
            free_list: Vec::new(),
            epoch: 0,
            root: None,
            len: 0,
            kind,
        }
    }

    /// Freeze every node created so far.
    pub(crate) fn seal(&mut self) {
        self.epoch += 1;
    }

    pub(crate) fn view(&self) -> TreeView<'_, K, V> {
        self.view_at(self.root, self.len)
    }

    pub(crate) fn view_at(&self, root: Option<NodeIdx>, len: usize) -> TreeView<'_, K, V> {
        TreeView::new(&self.nodes, root, len, self.kind)
    }

    /// Number of live arena slots.
    pub(crate) fn live_slots(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }

    #[inline]
    pub(crate) fn node(&self, i: NodeIdx) -> &Node<K, V> {
        &self.nodes[i.get()]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, i: NodeIdx) -> &mut Node<K, V> {
        debug_assert_eq!(
            self.nodes[i.get()].epoch,
            self.epoch,
            "sealed nodes must never be written"
        );
        &mut self.nodes[i.get()]
    }

    #[inline]
    pub(crate) fn is_red(&self, i: Option<NodeIdx>) -> bool {
        i.is_some_and(|i| self.node(i).color == Color::Red)
    }

    fn alloc(&mut self, node: Node<K, V>) -> NodeIdx {
        if let Some(i) = self.free_list.pop() {
            self.nodes[i.get()] = node;
            i
        } else {
            self.nodes.push(node);
            NodeIdx::new(self.nodes.len() - 1)
        }
    }

    /// Return an unlinked node's slot to the free list when no sealed version can see it.
    fn release(&mut self, i: NodeIdx) {
        let node = &mut self.nodes[i.get()];
        if node.epoch == self.epoch {
            node.values.clear();
            node.left = None;
            node.right = None;
            self.free_list.push(i);
        }
    }

    /// Point `parent`'s link to `old` (or the root when `parent` is `None`) at `new`.
    pub(crate) fn relink(&mut self, parent: Option<NodeIdx>, old: NodeIdx, new: Option<NodeIdx>) {
        match parent {
            None => self.root = new,
            Some(p) => {
                let p = self.node_mut(p);
                if p.left == Some(old) {
                    p.left = new;
                } else {
                    debug_assert_eq!(p.right, Some(old), "relink target is not a child");
                    p.right = new;
                }
            }
        }
    }

    /// Rotate `x` so its child on the `dir.flip()` side takes its place. Returns that child.
    ///
    /// `x` and the lifted child must be writable; the subtree that changes parent is
    /// only relinked, never copied.
    pub(crate) fn rotate(&mut self, x: NodeIdx, parent: Option<NodeIdx>, dir: Dir) -> NodeIdx {
        let up = dir.flip();
        let Some(y) = self.node(x).child(up) else {
            unreachable!("rotation needs a child on the lifted side");
        };
        let inner = self.node(y).child(dir);
        *self.node_mut(x).child_mut(up) = inner;
        *self.node_mut(y).child_mut(dir) = Some(x);
        self.relink(parent, x, Some(y));
        y
    }

    /// Root-to-node path towards `key`. The flag tells whether the last node holds `key`.
    pub(crate) fn find(&self, key: &K) -> (Vec<NodeIdx>, bool)
    where
        K: PartialOrd,
    {
        let mut path = Vec::new();
        let mut cur = self.root;
        while let Some(i) = cur {
            path.push(i);
            let node = self.node(i);
            cur = match compare(key, &node.key) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return (path, true),
            };
        }
        (path, false)
    }
}

impl<K: Copy + PartialOrd, V: Clone> RawTree<K, V> {
    /// Writable version of `i`: itself when it belongs to the open epoch, otherwise a copy.
    pub(crate) fn own(&mut self, i: NodeIdx) -> NodeIdx {
        let node = &self.nodes[i.get()];
        if node.epoch == self.epoch {
            return i;
        }
        let mut copy = node.clone();
        copy.epoch = self.epoch;
        self.alloc(copy)
    }

    /// Make the child of writable `parent` on side `dir` writable and relink it.
    pub(crate) fn own_child(&mut self, parent: NodeIdx, dir: Dir) -> Option<NodeIdx> {
        let child = self.node(parent).child(dir)?;
        let owned = self.own(child);
        if owned != child {
            *self.node_mut(parent).child_mut(dir) = Some(owned);
        }
        Some(owned)
    }

    /// Make every node on a root-to-node path writable, relinking copies top-down.
    pub(crate) fn own_path(&mut self, path: &mut [NodeIdx]) {
        let mut parent = None;
        for slot in path.iter_mut() {
            let owned = self.own(*slot);
            if owned != *slot {
                self.relink(parent, *slot, Some(owned));
                *slot = owned;
            }
            parent = Some(owned);
        }
    }

    /// Add `value` under `key`. Equal keys share a node; nothing is ever rejected.
    pub(crate) fn insert(&mut self, key: K, value: V) {
        debug_assert!(
            key.partial_cmp(&key).is_some(),
            "keys must be comparable with themselves (no NaN)"
        );
        let (mut path, found) = self.find(&key);
        self.own_path(&mut path);
        self.len += 1;
        if found {
            if let Some(&at) = path.last() {
                self.node_mut(at).values.push(value);
            }
            return;
        }
        let leaf = self.alloc(Node::leaf(key, value, self.epoch));
        match path.last().copied() {
            None => self.root = Some(leaf),
            Some(parent) => {
                let dir = if compare(&key, &self.node(parent).key) == Ordering::Less {
                    Dir::Left
                } else {
                    Dir::Right
                };
                *self.node_mut(parent).child_mut(dir) = Some(leaf);
            }
        }
        path.push(leaf);
        match self.kind {
            TreeKind::RedBlack => self.insert_fixup(path),
            TreeKind::Plain => self.node_mut(leaf).color = Color::Black,
        }
    }

    /// Remove one value under `key`: the given one, or the first when `value` is `None`.
    ///
    /// The node itself is unlinked once its last value is gone.
    pub(crate) fn delete(&mut self, key: &K, value: Option<&V>) -> Result<V, TreeError>
    where
        V: PartialEq,
    {
        let (mut path, found) = self.find(key);
        let at = match path.last() {
            Some(&at) if found => at,
            _ => return Err(TreeError::KeyNotFound),
        };
        let slot = match value {
            None => 0,
            Some(v) => self
                .node(at)
                .values
                .iter()
                .position(|x| x == v)
                .ok_or(TreeError::ValueNotFound)?,
        };
        self.own_path(&mut path);
        self.len -= 1;
        let at = path[path.len() - 1];
        let removed = self.node_mut(at).values.remove(slot);
        if self.node(at).values.is_empty() {
            self.unlink(path);
        }
        Ok(removed)
    }

    /// Structurally remove the (writable) node at the end of `path`.
    fn unlink(&mut self, mut path: Vec<NodeIdx>) {
        let Some(&target) = path.last() else {
            return;
        };
        if self.node(target).left.is_some() && self.node(target).right.is_some() {
            // Two children: move the in-order successor's entry here and remove the
            // successor instead, which has no left child.
            let mut cur = self.node(target).right;
            while let Some(i) = cur {
                path.push(i);
                cur = self.node(i).left;
            }
            self.own_path(&mut path);
            let succ = path[path.len() - 1];
            let values = mem::take(&mut self.node_mut(succ).values);
            let key = self.node(succ).key;
            let t = self.node_mut(target);
            t.key = key;
            t.values = values;
        }
        let Some(y) = path.pop() else {
            return;
        };
        let parent = path.last().copied();
        let child = self.node(y).left.or(self.node(y).right);
        let side = parent.map(|p| {
            if self.node(p).left == Some(y) {
                Dir::Left
            } else {
                Dir::Right
            }
        });
        let removed_black = self.node(y).color == Color::Black;
        self.relink(parent, y, child);
        self.release(y);
        if self.kind == TreeKind::RedBlack && removed_black {
            self.delete_fixup(path, side, child);
        }
    }
}
