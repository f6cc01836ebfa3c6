// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the edge list: typed identifiers and the three record kinds.

use alloc::vec::Vec;

use kurbo::Point;

/// Identifier of a vertex: its index in [`Dcel::vertices`](crate::Dcel::vertices).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(pub u32);

/// Identifier of a half-edge: its index in [`Dcel::half_edges`](crate::Dcel::half_edges).
///
/// Half-edges are allocated in twin pairs: slots `2k` and `2k + 1` are twins.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HalfEdgeId(pub u32);

/// Identifier of a face: its index in [`Dcel::faces`](crate::Dcel::faces).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FaceId(pub u32);

impl VertexId {
    /// Slot index.
    pub const fn idx(self) -> usize {
        self.0 as usize
    }
}

impl HalfEdgeId {
    /// Slot index.
    pub const fn idx(self) -> usize {
        self.0 as usize
    }

    /// The other slot of this half-edge's allocation pair.
    ///
    /// For edge lists built by [`Dcel::from_coords`](crate::Dcel::from_coords) this is
    /// always the twin. Lists from [`Dcel::from_raw_parts`](crate::Dcel::from_raw_parts)
    /// store twins explicitly and need not follow the pairing.
    pub const fn pair(self) -> Self {
        Self(self.0 ^ 1)
    }
}

impl FaceId {
    /// The face outside every bounded face.
    pub const UNBOUNDED: Self = Self(0);

    /// Slot index.
    pub const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Whether this is the unbounded face.
    pub const fn is_unbounded(self) -> bool {
        self.0 == 0
    }
}

/// A vertex with any number of coordinates. Axis 0 is x, axis 1 is y.
#[derive(Clone, Debug, PartialEq)]
pub struct Vertex {
    /// Coordinates, one per axis.
    pub coords: Vec<f64>,
    /// One half-edge leaving this vertex, `None` when isolated.
    pub edge: Option<HalfEdgeId>,
}

impl Vertex {
    /// An isolated vertex.
    pub fn new(coords: Vec<f64>) -> Self {
        Self { coords, edge: None }
    }

    /// Number of coordinates.
    pub fn dimension(&self) -> usize {
        self.coords.len()
    }

    /// Coordinate along `axis`, if the vertex has one.
    pub fn coord(&self, axis: usize) -> Option<f64> {
        self.coords.get(axis).copied()
    }

    /// The first two coordinates as a point.
    pub fn point(&self) -> Option<Point> {
        match self.coords.as_slice() {
            [x, y, ..] => Some(Point::new(*x, *y)),
            _ => None,
        }
    }
}

/// One direction of an edge.
///
/// The face a half-edge bounds lies to its left; bounded faces are therefore walked
/// counter-clockwise along `next`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HalfEdge {
    /// Vertex the half-edge starts at.
    pub origin: VertexId,
    /// Opposite half-edge, starting where this one ends.
    pub twin: HalfEdgeId,
    /// Following half-edge around [`face`](Self::face).
    pub next: HalfEdgeId,
    /// Preceding half-edge around [`face`](Self::face).
    pub prev: HalfEdgeId,
    /// Face on the left.
    pub face: FaceId,
}

/// A face and representative half-edges of its boundary.
///
/// Bounded faces carry their outer boundary. The unbounded face has no outer boundary
/// and records the outside of the subdivision as its inner boundary. A face may have
/// neither when the subdivision has no edges.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Face {
    /// A half-edge of the outer boundary.
    pub outer: Option<HalfEdgeId>,
    /// A half-edge of an inner boundary.
    pub inner: Option<HalfEdgeId>,
}

impl Face {
    /// Any representative half-edge, outer boundary first.
    pub fn boundary(&self) -> Option<HalfEdgeId> {
        self.outer.or(self.inner)
    }
}

/// Half-edges around one vertex, split by the far endpoint's coordinate along an axis.
///
/// See [`Dcel::partition_vertex_edges`](crate::Dcel::partition_vertex_edges).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VertexEdges {
    /// Outgoing half-edges whose destination is lesser or equal along the axis.
    pub lesser: Vec<HalfEdgeId>,
    /// Outgoing half-edges whose destination is greater along the axis.
    pub greater: Vec<HalfEdgeId>,
}
