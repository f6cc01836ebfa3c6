// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordering keys for edges inside a slab.

use core::cmp::Ordering;
use core::fmt::Debug;

use kurbo::Point;

/// How an edge (and a query point) is keyed in the slab tree.
///
/// Within one slab no two edges cross, so any key that orders them bottom to top
/// works. Keys of edges that are live at the same time must stay distinct.
pub trait SlabKey: Copy + PartialOrd + Debug {
    /// Key of the non-vertical edge from `left` to `right` (`left.x < right.x`).
    fn edge(left: Point, right: Point) -> Self;

    /// Key to search for when locating `p`.
    fn probe(p: Point) -> Self;
}

/// Keys an edge by the y of its left endpoint and a probe by its own y.
///
/// Exact for subdivisions whose edges are horizontal within every slab, and cheap.
/// Slanted edges are ordered by where they start, so two edges leaving one vertex
/// share a key and a probe is compared against start heights rather than the edge
/// itself. Use [`SegmentKey`] for general subdivisions.
impl SlabKey for f64 {
    fn edge(left: Point, _right: Point) -> Self {
        left.y
    }

    fn probe(p: Point) -> Self {
        p.y
    }
}

/// Keys an edge by its whole segment, comparing heights at a shared x.
///
/// Two keys compare by their y at the greater of their start x, then, when that
/// ties (edges leaving one vertex), by their y at the lesser of their end x. A probe
/// is a zero-length segment, so it compares against an edge by the edge's height
/// directly above or below it.
#[derive(Copy, Clone, Debug)]
pub struct SegmentKey {
    from: Point,
    to: Point,
}

impl SegmentKey {
    /// Key for the segment between `a` and `b`, in either order.
    pub fn new(a: Point, b: Point) -> Self {
        if b.x < a.x {
            Self { from: b, to: a }
        } else {
            Self { from: a, to: b }
        }
    }

    /// Left endpoint.
    pub const fn left(&self) -> Point {
        self.from
    }

    /// Right endpoint.
    pub const fn right(&self) -> Point {
        self.to
    }

    /// Height of the segment's supporting line at `x`.
    ///
    /// Vertical segments and probes report the height of their left endpoint.
    pub fn y_at(&self, x: f64) -> f64 {
        let dx = self.to.x - self.from.x;
        if dx == 0.0 {
            return self.from.y;
        }
        let t = (x - self.from.x) / dx;
        self.from.y + t * (self.to.y - self.from.y)
    }
}

impl PartialEq for SegmentKey {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for SegmentKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let x = self.from.x.max(other.from.x);
        match self.y_at(x).partial_cmp(&other.y_at(x))? {
            Ordering::Equal => {
                let x = self.to.x.min(other.to.x);
                self.y_at(x).partial_cmp(&other.y_at(x))
            }
            ord => Some(ord),
        }
    }
}

impl SlabKey for SegmentKey {
    fn edge(left: Point, right: Point) -> Self {
        Self::new(left, right)
    }

    fn probe(p: Point) -> Self {
        Self { from: p, to: p }
    }
}
