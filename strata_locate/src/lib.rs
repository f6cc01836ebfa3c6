// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strata Locate: slab-decomposition point location over a DCEL.
//!
//! A left-to-right sweep over the vertices of a [`Dcel`](strata_dcel::Dcel) keeps the
//! set of edges crossing the current vertical slab in a persistent red-black tree,
//! committing one version per distinct vertex x. A query then
//!
//! 1. picks the version for its x (binary search over slab boundaries), and
//! 2. searches that version for the nearest edge at or above its y,
//!
//! and reports the face on the query's side of that edge. Both steps are O(log n);
//! versions share all unchanged tree nodes, so the index takes O(n log n) space
//! instead of O(n²).
//!
//! - [`PointLocator`]: the index. Build it with [`PointLocator::build`] or drive a
//!   [`SlabBuilder`] yourself.
//! - [`SlabKey`]: how edges are ordered inside a slab. `f64` keys an edge by the y
//!   of its left endpoint; [`SegmentKey`] compares whole segments and handles
//!   slanted edges.
//! - [`ScanLocator`]: a linear-scan reference behind the same [`LocatesPoints`] trait.
//!
//! # Example
//!
//! ```rust
//! use kurbo::Point;
//! use strata_dcel::{Dcel, FaceId};
//! use strata_locate::{PointLocator, SegmentKey};
//! use strata_tree::TreeKind;
//!
//! // A 10 x 4 rectangle split at x = 5 into a left room (1) and a right room (2).
//! let points = [
//!     Point::new(0.0, 0.0),
//!     Point::new(5.0, 0.0),
//!     Point::new(10.0, 0.0),
//!     Point::new(10.0, 4.0),
//!     Point::new(5.0, 4.0),
//!     Point::new(0.0, 4.0),
//! ];
//! let dcel = Dcel::from_points(&points, &[[0, 1, 4, 5], [1, 2, 3, 4]]).unwrap();
//! let locator = PointLocator::<SegmentKey>::build(&dcel, TreeKind::RedBlack).unwrap();
//!
//! assert_eq!(locator.locate(&[2.0, 2.0]), Ok(Some(FaceId(1))));
//! assert_eq!(locator.locate(&[8.0, 2.0]), Ok(Some(FaceId(2))));
//! assert_eq!(locator.locate(&[2.0, 7.0]), Ok(Some(FaceId::UNBOUNDED)));
//! assert_eq!(locator.locate(&[-1.0, 2.0]), Ok(None));
//! ```
//!
//! ### Degenerate input
//!
//! A vertex x is the left edge of its slab, so points on the vertical line through a
//! vertex resolve to the slab on the right. Vertical edges never span a slab and are
//! left out of the tree; the faces on either side of one are told apart by which
//! slab a query falls into.

#![no_std]

extern crate alloc;

mod error;
mod key;
mod locator;
mod sweep;

pub use error::LocateError;
pub use key::{SegmentKey, SlabKey};
pub use locator::{LocatesPoints, PointLocator, ScanLocator};
pub use sweep::{SlabBuilder, SlabEdge};
