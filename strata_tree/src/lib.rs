// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strata Tree: an ordered multimap with persistent, x-labelled versions.
//!
//! - [`OrderedTree`]: a red-black (or plain) binary search tree where every key holds
//!   one or more values. Insert, delete and lookups are O(log n).
//! - [`PersistentTree`]: the same tree with versions. [`PersistentTree::set_instant`]
//!   freezes the current state under a strictly increasing `f64` label and
//!   [`PersistentTree::at_instant`] reads any earlier state back.
//! - [`TreeView`]: the read-only interface shared by both, including the clamping
//!   [`search_up`](TreeView::search_up) / [`search_down`](TreeView::search_down) lookups
//!   used by slab point location.
//!
//! Nodes live in one arena and are copied on write: after an instant is frozen, a
//! mutation copies only the root-to-node path it rewrites (plus the few siblings that
//! rebalancing touches) and shares every other subtree with older versions. No node
//! reachable from a frozen version is ever written again, so views of old versions
//! can be read from many threads while nothing else holds the tree mutably.
//!
//! # Example
//!
//! ```rust
//! use strata_tree::{PersistentTree, TreeKind};
//!
//! let mut t = PersistentTree::new(TreeKind::RedBlack);
//! t.set_instant(0.0).unwrap();
//! t.insert(1.0, 'a');
//! t.insert(3.0, 'c');
//! t.set_instant(1.0).unwrap();
//! t.insert(2.0, 'b');
//!
//! // At 0.5 the tree still holds only the first two keys.
//! assert_eq!(t.at_instant(0.5).search_up(2.0), Some((3.0, &'c')));
//! assert_eq!(t.at_instant(1.0).search_up(2.0), Some((2.0, &'b')));
//! // Past the greatest key, `search_up` clamps instead of failing.
//! assert_eq!(t.at_instant(1.0).search_up(9.0), Some((3.0, &'c')));
//! ```
//!
//! ### Key semantics
//!
//! Keys only need [`PartialOrd`] and [`Copy`], but must be totally ordered in practice:
//! incomparable keys (such as NaN) are treated as equal. Debug builds assert on insert.

#![no_std]

extern crate alloc;

mod arena;
mod error;
mod ordered;
mod persistent;
mod rb;
mod types;
mod view;

pub use error::{InvariantViolation, TreeError};
pub use ordered::OrderedTree;
pub use persistent::PersistentTree;
pub use types::TreeKind;
pub use view::{Iter, TreeView};
