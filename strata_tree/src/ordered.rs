// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-version ordered multimap.

use core::fmt::Debug;

use crate::arena::RawTree;
use crate::error::TreeError;
use crate::persistent::PersistentTree;
use crate::types::TreeKind;
use crate::view::{Iter, TreeView};

/// An ordered multimap: every key holds one or more values in insertion order.
///
/// The balancing strategy is chosen at construction. With [`TreeKind::RedBlack`]
/// (the default) every operation is O(log n) in the worst case.
///
/// ```
/// use strata_tree::{OrderedTree, TreeKind};
///
/// let mut t = OrderedTree::new(TreeKind::RedBlack);
/// t.insert(2.0, 'b');
/// t.insert(1.0, 'a');
/// t.insert(2.0, 'c');
/// assert_eq!(t.search(&2.0), Some(&['b', 'c'][..]));
/// assert_eq!(t.delete(&2.0, None), Ok('b'));
/// assert_eq!(t.len(), 2);
/// ```
pub struct OrderedTree<K, V> {
    raw: RawTree<K, V>,
}

impl<K, V> Default for OrderedTree<K, V> {
    fn default() -> Self {
        Self::new(TreeKind::default())
    }
}

impl<K, V> Debug for OrderedTree<K, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OrderedTree")
            .field("len", &self.raw.len)
            .field("kind", &self.raw.kind)
            .finish_non_exhaustive()
    }
}

impl<K, V> OrderedTree<K, V> {
    /// Create an empty tree with the given balancing strategy.
    pub const fn new(kind: TreeKind) -> Self {
        Self {
            raw: RawTree::new(kind),
        }
    }

    /// Number of stored values (duplicates counted). O(1).
    pub const fn len(&self) -> usize {
        self.raw.len
    }

    /// Alias of [`len`](Self::len).
    pub const fn size(&self) -> usize {
        self.raw.len
    }

    /// Whether the tree holds no values.
    pub const fn is_empty(&self) -> bool {
        self.raw.len == 0
    }

    /// Balancing strategy.
    pub const fn kind(&self) -> TreeKind {
        self.raw.kind
    }

    /// Borrow the tree as a read-only view.
    pub fn view(&self) -> TreeView<'_, K, V> {
        self.raw.view()
    }

    /// In-order iterator over `(key, values)`.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.raw.view().iter()
    }

    /// Turn this tree into the base version of a [`PersistentTree`].
    ///
    /// The current contents become visible at every instant.
    pub fn into_persistent(self) -> PersistentTree<K, V> {
        PersistentTree::from_raw(self.raw)
    }
}

impl<K: Copy + PartialOrd, V> OrderedTree<K, V> {
    /// All values stored under `key`, in insertion order.
    pub fn search(&self, key: &K) -> Option<&[V]> {
        self.raw.view().search(key)
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.raw.view().get(key)
    }

    /// Whether any value is stored under `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.raw.view().contains_key(key)
    }

    /// See [`TreeView::search_up`].
    pub fn search_up(&self, key: K) -> Option<(K, &V)> {
        self.raw.view().search_up(key)
    }

    /// See [`TreeView::search_down`].
    pub fn search_down(&self, key: K) -> Option<(K, &V)> {
        self.raw.view().search_down(key)
    }
}

impl<K: Copy + PartialOrd, V: Clone> OrderedTree<K, V> {
    /// Store `value` under `key`. Duplicate keys accumulate values.
    ///
    /// Keys must be comparable with themselves. A NaN key compares equal to every
    /// key, so in release builds it joins the values of the first node on its search
    /// path; debug builds panic instead.
    pub fn insert(&mut self, key: K, value: V) {
        self.raw.insert(key, value);
    }

    /// Remove one value stored under `key` and return it.
    ///
    /// With `Some(value)` the first equal value is removed, otherwise the first value
    /// stored under the key. The node disappears with its last value.
    ///
    /// # Errors
    ///
    /// [`TreeError::KeyNotFound`] when no node holds `key`, [`TreeError::ValueNotFound`]
    /// when `value` is given but not stored under it. The tree is unchanged on error.
    pub fn delete(&mut self, key: &K, value: Option<&V>) -> Result<V, TreeError>
    where
        V: PartialEq,
    {
        self.raw.delete(key, value)
    }
}

impl<'a, K: Copy, V> IntoIterator for &'a OrderedTree<K, V> {
    type Item = (K, &'a [V]);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
