// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-only access to one root of the node arena.

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt::Debug;

use crate::error::InvariantViolation;
use crate::types::{Color, Node, NodeIdx, TreeKind, compare};

/// A read-only tree rooted at one version of the arena.
///
/// Views are cheap to create and to copy. A view obtained from a
/// [`PersistentTree`](crate::PersistentTree) keeps reporting the same contents
/// no matter what is mutated afterwards.
pub struct TreeView<'a, K, V> {
    nodes: &'a [Node<K, V>],
    root: Option<NodeIdx>,
    len: usize,
    kind: TreeKind,
}

impl<K, V> Clone for TreeView<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for TreeView<'_, K, V> {}

impl<K, V> Debug for TreeView<'_, K, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TreeView")
            .field("len", &self.len)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl<'a, K, V> TreeView<'a, K, V> {
    pub(crate) const fn new(
        nodes: &'a [Node<K, V>],
        root: Option<NodeIdx>,
        len: usize,
        kind: TreeKind,
    ) -> Self {
        Self {
            nodes,
            root,
            len,
            kind,
        }
    }

    /// An empty view.
    pub const fn empty(kind: TreeKind) -> Self {
        Self {
            nodes: &[],
            root: None,
            len: 0,
            kind,
        }
    }

    /// Number of stored values (duplicates counted). O(1).
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the view holds no values.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Balancing strategy of the tree this view was taken from.
    pub const fn kind(&self) -> TreeKind {
        self.kind
    }

    #[inline]
    fn node(&self, i: NodeIdx) -> &'a Node<K, V> {
        &self.nodes[i.get()]
    }

    fn entry(&self, i: NodeIdx) -> (K, &'a [V])
    where
        K: Copy,
    {
        let n = self.node(i);
        (n.key, &n.values)
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        let mut best = 0;
        let mut stack: Vec<(NodeIdx, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((i, depth)) = stack.pop() {
            best = best.max(depth);
            let n = self.node(i);
            for c in [n.left, n.right].into_iter().flatten() {
                stack.push((c, depth + 1));
            }
        }
        best
    }

    /// In-order iterator over `(key, values)`.
    pub fn iter(&self) -> Iter<'a, K, V> {
        let mut it = Iter {
            nodes: self.nodes,
            stack: Vec::new(),
        };
        it.push_left(self.root);
        it
    }

    /// In-order sequence of `(key, values)`.
    pub fn in_order(&self) -> Vec<(K, &'a [V])>
    where
        K: Copy,
    {
        self.iter().collect()
    }
}

impl<'a, K: Copy + PartialOrd, V> TreeView<'a, K, V> {
    fn find(&self, key: &K) -> Option<NodeIdx> {
        let mut cur = self.root;
        while let Some(i) = cur {
            let n = self.node(i);
            cur = match compare(key, &n.key) {
                Ordering::Less => n.left,
                Ordering::Greater => n.right,
                Ordering::Equal => return Some(i),
            };
        }
        None
    }

    /// Smallest key `>= key` (`strict`: `> key`).
    fn ceiling(&self, key: &K, strict: bool) -> Option<NodeIdx> {
        let mut best = None;
        let mut cur = self.root;
        while let Some(i) = cur {
            let n = self.node(i);
            match compare(key, &n.key) {
                Ordering::Less => {
                    best = Some(i);
                    cur = n.left;
                }
                Ordering::Equal if !strict => return Some(i),
                _ => cur = n.right,
            }
        }
        best
    }

    /// Greatest key `<= key` (`strict`: `< key`).
    fn floor(&self, key: &K, strict: bool) -> Option<NodeIdx> {
        let mut best = None;
        let mut cur = self.root;
        while let Some(i) = cur {
            let n = self.node(i);
            match compare(key, &n.key) {
                Ordering::Greater => {
                    best = Some(i);
                    cur = n.right;
                }
                Ordering::Equal if !strict => return Some(i),
                _ => cur = n.left,
            }
        }
        best
    }

    fn extreme(&self, leftmost: bool) -> Option<NodeIdx> {
        let mut cur = self.root?;
        loop {
            let n = self.node(cur);
            match if leftmost { n.left } else { n.right } {
                Some(next) => cur = next,
                None => return Some(cur),
            }
        }
    }

    /// All values stored under `key`, in insertion order.
    pub fn search(&self, key: &K) -> Option<&'a [V]> {
        self.find(key).map(|i| &*self.node(i).values)
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &K) -> Option<&'a V> {
        self.search(key).and_then(|v| v.first())
    }

    /// Whether a node holds `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Value at `key`, else at the nearest greater key.
    ///
    /// When every key is smaller than `key` this clamps to the greatest key rather
    /// than returning nothing; only an empty tree yields `None`. The returned key
    /// tells callers whether the clamp happened.
    pub fn search_up(&self, key: K) -> Option<(K, &'a V)> {
        let i = self.ceiling(&key, false).or_else(|| self.extreme(false))?;
        let n = self.node(i);
        n.values.first().map(|v| (n.key, v))
    }

    /// Value at `key`, else at the nearest lesser key, clamping to the least key.
    pub fn search_down(&self, key: K) -> Option<(K, &'a V)> {
        let i = self.floor(&key, false).or_else(|| self.extreme(true))?;
        let n = self.node(i);
        n.values.first().map(|v| (n.key, v))
    }

    /// Entry with the least key strictly greater than `key`.
    pub fn successor(&self, key: &K) -> Option<(K, &'a [V])> {
        self.ceiling(key, true).map(|i| self.entry(i))
    }

    /// Entry with the greatest key strictly less than `key`.
    pub fn predecessor(&self, key: &K) -> Option<(K, &'a [V])> {
        self.floor(key, true).map(|i| self.entry(i))
    }

    /// Entry with the least key.
    pub fn first(&self) -> Option<(K, &'a [V])> {
        self.extreme(true).map(|i| self.entry(i))
    }

    /// Entry with the greatest key.
    pub fn last(&self) -> Option<(K, &'a [V])> {
        self.extreme(false).map(|i| self.entry(i))
    }

    /// Check ordering, coloring, black height and size. Returns the black height.
    ///
    /// Color rules are only enforced for [`TreeKind::RedBlack`].
    pub fn validate(&self) -> Result<usize, InvariantViolation> {
        let mut prev: Option<K> = None;
        let mut counted = 0;
        for (k, values) in self.iter() {
            if values.is_empty() {
                return Err(InvariantViolation::EmptyNode);
            }
            if let Some(p) = prev
                && p.partial_cmp(&k) != Some(Ordering::Less)
            {
                return Err(InvariantViolation::OutOfOrder);
            }
            prev = Some(k);
            counted += values.len();
        }
        if counted != self.len {
            return Err(InvariantViolation::SizeMismatch {
                recorded: self.len,
                counted,
            });
        }
        if self.kind != TreeKind::RedBlack {
            return Ok(0);
        }
        if self.root.is_some_and(|r| self.node(r).color == Color::Red) {
            return Err(InvariantViolation::RedRoot);
        }
        self.black_height(self.root)
    }

    fn black_height(&self, at: Option<NodeIdx>) -> Result<usize, InvariantViolation> {
        let Some(i) = at else {
            return Ok(1);
        };
        let n = self.node(i);
        let red = |c: Option<NodeIdx>| c.is_some_and(|c| self.node(c).color == Color::Red);
        if n.color == Color::Red && (red(n.left) || red(n.right)) {
            return Err(InvariantViolation::RedRed);
        }
        let left = self.black_height(n.left)?;
        let right = self.black_height(n.right)?;
        if left != right {
            return Err(InvariantViolation::BlackHeight { left, right });
        }
        Ok(left + usize::from(n.color == Color::Black))
    }
}

/// In-order iterator returned by [`TreeView::iter`].
pub struct Iter<'a, K, V> {
    nodes: &'a [Node<K, V>],
    stack: Vec<NodeIdx>,
}

impl<K, V> Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Iter")
            .field("pending", &self.stack.len())
            .finish_non_exhaustive()
    }
}

impl<K, V> Iter<'_, K, V> {
    fn push_left(&mut self, mut cur: Option<NodeIdx>) {
        while let Some(i) = cur {
            self.stack.push(i);
            cur = self.nodes[i.get()].left;
        }
    }
}

impl<'a, K: Copy, V> Iterator for Iter<'a, K, V> {
    type Item = (K, &'a [V]);

    fn next(&mut self) -> Option<Self::Item> {
        let i = self.stack.pop()?;
        let n = &self.nodes[i.get()];
        self.push_left(n.right);
        Some((n.key, &n.values))
    }
}
