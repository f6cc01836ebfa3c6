// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Versioned tree: every committed instant stays queryable.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::arena::RawTree;
use crate::error::TreeError;
use crate::types::{NodeIdx, TreeKind};
use crate::view::TreeView;

/// A published root and the number of values reachable from it.
#[derive(Copy, Clone, Debug)]
struct Version {
    at: f64,
    root: Option<NodeIdx>,
    len: usize,
}

/// An ordered multimap whose past states remain readable.
///
/// Mutations always apply to the latest instant. [`set_instant`](Self::set_instant)
/// freezes everything committed so far and opens a new instant; later mutations
/// copy only the root-to-node paths they rewrite, and all untouched subtrees are
/// shared between versions. [`at_instant`](Self::at_instant) returns the state as
/// of any earlier label.
///
/// Mutations made before the first `set_instant` belong to a base version that
/// precedes every label.
///
/// ```
/// use strata_tree::{PersistentTree, TreeKind};
///
/// let mut t = PersistentTree::new(TreeKind::RedBlack);
/// t.set_instant(1.0).unwrap();
/// t.insert(10, "a");
/// t.set_instant(2.0).unwrap();
/// t.delete(&10, None).unwrap();
/// t.insert(20, "b");
///
/// assert!(t.at_instant(0.5).is_empty());
/// assert_eq!(t.at_instant(1.5).get(&10), Some(&"a"));
/// assert_eq!(t.at_instant(2.0).get(&10), None);
/// assert_eq!(t.at_instant(9.0).get(&20), Some(&"b"));
/// ```
pub struct PersistentTree<K, V> {
    raw: RawTree<K, V>,
    versions: Vec<Version>,
}

impl<K, V> Default for PersistentTree<K, V> {
    fn default() -> Self {
        Self::new(TreeKind::default())
    }
}

impl<K, V> Debug for PersistentTree<K, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PersistentTree")
            .field("kind", &self.raw.kind)
            .field("instants", &(self.versions.len() - 1))
            .field("len", &self.raw.len)
            .field("node_count", &self.raw.live_slots())
            .finish_non_exhaustive()
    }
}

impl<K, V> PersistentTree<K, V> {
    /// Create an empty tree with no committed instants.
    pub fn new(kind: TreeKind) -> Self {
        Self::from_raw(RawTree::new(kind))
    }

    pub(crate) fn from_raw(raw: RawTree<K, V>) -> Self {
        let base = Version {
            at: f64::NEG_INFINITY,
            root: raw.root,
            len: raw.len,
        };
        let mut versions = Vec::with_capacity(1);
        versions.push(base);
        Self { raw, versions }
    }

    /// Balancing strategy.
    pub const fn kind(&self) -> TreeKind {
        self.raw.kind
    }

    /// Number of values in the latest version.
    pub const fn len(&self) -> usize {
        self.raw.len
    }

    /// Whether the latest version is empty.
    pub const fn is_empty(&self) -> bool {
        self.raw.len == 0
    }

    /// Label of the latest instant, or `None` before the first [`set_instant`](Self::set_instant).
    pub fn current_instant(&self) -> Option<f64> {
        self.versions.last().map(|v| v.at).filter(|&at| at > f64::NEG_INFINITY)
    }

    /// Committed instant labels in increasing order.
    pub fn instants(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.versions[1..].iter().map(|v| v.at)
    }

    /// Number of versions, counting the base version.
    pub fn version_count(&self) -> usize {
        self.versions.len()
    }

    /// Number of live nodes across all versions.
    pub fn node_count(&self) -> usize {
        self.raw.live_slots()
    }

    /// Open a new instant labelled `at`. Later mutations belong to it.
    ///
    /// # Errors
    ///
    /// [`TreeError::NonMonotonicInstant`] unless `at` is strictly greater than the
    /// latest label (this also rejects NaN). Nothing changes on error.
    pub fn set_instant(&mut self, at: f64) -> Result<(), TreeError> {
        let last = self.versions.last().map_or(f64::NEG_INFINITY, |v| v.at);
        if !(at > last) {
            return Err(TreeError::NonMonotonicInstant {
                last,
                requested: at,
            });
        }
        self.raw.seal();
        self.versions.push(Version {
            at,
            root: self.raw.root,
            len: self.raw.len,
        });
        tracing::trace!(at, len = self.raw.len, nodes = self.raw.live_slots(), "instant opened");
        Ok(())
    }

    /// The latest version, including uncommitted mutations of the open instant.
    pub fn current(&self) -> TreeView<'_, K, V> {
        self.raw.view()
    }

    /// The version committed at the greatest label `<= at`.
    ///
    /// Before the first label this is the base version, which is empty unless
    /// mutations happened before the first `set_instant`. NaN yields an empty view.
    pub fn at_instant(&self, at: f64) -> TreeView<'_, K, V> {
        let idx = self.versions.partition_point(|v| v.at <= at);
        match idx.checked_sub(1).map(|i| self.versions[i]) {
            Some(v) => self.raw.view_at(v.root, v.len),
            None => TreeView::empty(self.raw.kind),
        }
    }

    fn publish(&mut self) {
        if let Some(v) = self.versions.last_mut() {
            v.root = self.raw.root;
            v.len = self.raw.len;
        }
    }
}

impl<K: Copy + PartialOrd, V: Clone> PersistentTree<K, V> {
    /// Store `value` under `key` in the latest instant.
    ///
    /// Keys must be comparable with themselves. A NaN key compares equal to every
    /// key, so in release builds it joins the values of the first node on its search
    /// path; debug builds panic instead.
    pub fn insert(&mut self, key: K, value: V) {
        self.raw.insert(key, value);
        self.publish();
    }

    /// Remove one value under `key` from the latest instant.
    ///
    /// # Errors
    ///
    /// As [`OrderedTree::delete`](crate::OrderedTree::delete). Earlier instants are
    /// never affected, whether or not the call succeeds.
    pub fn delete(&mut self, key: &K, value: Option<&V>) -> Result<V, TreeError>
    where
        V: PartialEq,
    {
        let removed = self.raw.delete(key, value)?;
        self.publish();
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::vec::Vec;

    use super::*;
    use crate::OrderedTree;

    struct Rng(u64);

    impl Rng {
        fn next(&mut self) -> u64 {
            let mut x = self.0;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            self.0 = x;
            x
        }
    }

    fn contents(view: TreeView<'_, i64, u32>) -> Vec<(i64, Vec<u32>)> {
        view.iter().map(|(k, vs)| (k, vs.to_vec())).collect()
    }

    #[test]
    fn every_instant_keeps_its_snapshot() {
        let mut rng = Rng(0xDEAD_BEEF_CAFE_F00D);
        let mut t = PersistentTree::new(TreeKind::RedBlack);
        let mut reference: BTreeMap<i64, Vec<u32>> = BTreeMap::new();
        let mut snapshots: Vec<(f64, Vec<(i64, Vec<u32>)>)> = Vec::new();
        let mut value = 0_u32;
        for instant in 0..200_u32 {
            let at = f64::from(instant) * 0.5;
            t.set_instant(at).unwrap();
            for _ in 0..(rng.next() % 6) {
                let key = (rng.next() % 40) as i64;
                if rng.next() % 2 == 0 && reference.contains_key(&key) {
                    let vs = reference.get_mut(&key).unwrap();
                    let expected = vs.remove(0);
                    if vs.is_empty() {
                        reference.remove(&key);
                    }
                    assert_eq!(t.delete(&key, None), Ok(expected));
                } else {
                    value += 1;
                    t.insert(key, value);
                    reference.entry(key).or_default().push(value);
                }
            }
            snapshots.push((at, reference.clone().into_iter().collect()));
            // Every earlier instant still reads what it read when it was committed.
            for (i, (at, want)) in snapshots.iter().enumerate() {
                if i % 17 == 0 || i + 1 == snapshots.len() {
                    let view = t.at_instant(*at);
                    view.validate().unwrap();
                    assert_eq!(&contents(view), want);
                    // Between labels the earlier one is in effect.
                    assert_eq!(&contents(t.at_instant(*at + 0.25)), want);
                }
            }
        }
        assert_eq!(t.instants().len(), 200);
        assert_eq!(t.version_count(), 201);
    }

    #[test]
    fn non_increasing_instant_is_rejected_without_effect() {
        let mut t = PersistentTree::new(TreeKind::RedBlack);
        t.set_instant(1.0).unwrap();
        t.insert(1, 1_u32);
        t.set_instant(2.0).unwrap();
        t.insert(2, 2);
        for bad in [2.0, 1.5, -3.0, f64::NAN] {
            let err = t.set_instant(bad).unwrap_err();
            assert!(matches!(
                err,
                TreeError::NonMonotonicInstant { last, .. } if last == 2.0
            ));
        }
        assert_eq!(t.instants().collect::<Vec<_>>(), [1.0, 2.0]);
        assert_eq!(t.current_instant(), Some(2.0));
        assert_eq!(contents(t.at_instant(1.0)), [(1, alloc::vec![1])]);
        assert_eq!(contents(t.at_instant(2.0)), [(1, alloc::vec![1]), (2, alloc::vec![2])]);
    }

    #[test]
    fn query_before_first_instant_is_empty() {
        let mut t: PersistentTree<i64, u32> = PersistentTree::default();
        assert!(t.at_instant(0.0).is_empty());
        assert_eq!(t.current_instant(), None);
        t.set_instant(3.0).unwrap();
        t.insert(7, 7);
        assert!(t.at_instant(2.9).is_empty());
        assert!(t.at_instant(f64::NAN).is_empty());
        assert_eq!(t.at_instant(3.0).len(), 1);
    }

    #[test]
    fn base_version_precedes_every_instant() {
        let mut ordered = OrderedTree::new(TreeKind::RedBlack);
        ordered.insert(1, 100_u32);
        let mut t = ordered.into_persistent();
        t.insert(2, 200);
        t.set_instant(0.0).unwrap();
        t.delete(&1, None).unwrap();
        assert_eq!(contents(t.at_instant(-1.0e9)), [(1, alloc::vec![100]), (2, alloc::vec![200])]);
        assert_eq!(contents(t.at_instant(0.0)), [(2, alloc::vec![200])]);
    }

    #[test]
    fn failed_delete_does_not_touch_history() {
        let mut t = PersistentTree::new(TreeKind::RedBlack);
        t.set_instant(0.0).unwrap();
        t.insert(1, 1_u32);
        t.set_instant(1.0).unwrap();
        let nodes = t.node_count();
        assert_eq!(t.delete(&5, None), Err(TreeError::KeyNotFound));
        assert_eq!(t.delete(&1, Some(&9)), Err(TreeError::ValueNotFound));
        assert_eq!(t.node_count(), nodes);
        assert_eq!(t.at_instant(1.0).len(), 1);
    }

    #[test]
    fn versions_share_untouched_subtrees() {
        const N: usize = 1024;
        let mut t = PersistentTree::new(TreeKind::RedBlack);
        for i in 0..N {
            t.set_instant(i as f64).unwrap();
            t.insert(i as i64, ());
        }
        let height = t.current().height();
        // A version copies one root-to-leaf path plus the siblings it recolors or rotates.
        assert!(t.node_count() <= N * (2 * height + 2), "{} nodes", t.node_count());
        // Full copies would need N * (N + 1) / 2 nodes.
        assert!(t.node_count() < N * 64);
        assert_eq!(t.at_instant(511.0).len(), 512);
        assert_eq!(t.at_instant(511.0).last().map(|(k, _)| k), Some(511));
    }
}
