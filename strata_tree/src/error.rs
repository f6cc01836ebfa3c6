// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for tree mutations and invariant checks.

/// Failure of a tree or versioning operation.
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum TreeError {
    /// No node holds the requested key.
    #[error("key not found")]
    KeyNotFound,
    /// The key exists but the requested value is not stored under it.
    #[error("value not found under key")]
    ValueNotFound,
    /// [`set_instant`](crate::PersistentTree::set_instant) was called with an
    /// instant that does not follow the last committed one.
    #[error("instant {requested} does not follow the last committed instant {last}")]
    NonMonotonicInstant {
        /// Last committed instant.
        last: f64,
        /// Rejected instant.
        requested: f64,
    },
}

/// A structural invariant that [`validate`](crate::TreeView::validate) found broken.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    /// In-order traversal produced keys that are not strictly increasing.
    #[error("in-order keys are not strictly increasing")]
    OutOfOrder,
    /// A node carries no values.
    #[error("node without values")]
    EmptyNode,
    /// The root of a red-black tree is red.
    #[error("red root")]
    RedRoot,
    /// A red node has a red child.
    #[error("red node with a red child")]
    RedRed,
    /// Two sibling subtrees disagree on black height.
    #[error("black height mismatch: left {left}, right {right}")]
    BlackHeight {
        /// Black height of the left subtree.
        left: usize,
        /// Black height of the right subtree.
        right: usize,
    },
    /// The recorded size differs from the number of stored values.
    #[error("size {recorded} recorded, {counted} values stored")]
    SizeMismatch {
        /// Size the tree reports.
        recorded: usize,
        /// Values actually reachable from the root.
        counted: usize,
    },
}
