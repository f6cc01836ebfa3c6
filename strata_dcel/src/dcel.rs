// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The edge list itself: storage, accessors, traversal and extents.

use alloc::vec::Vec;

use kurbo::Rect;

use crate::error::DcelError;
use crate::types::{Face, FaceId, HalfEdge, HalfEdgeId, Vertex, VertexEdges, VertexId};

/// A doubly-connected edge list describing a planar subdivision.
///
/// Records live in three flat tables indexed by [`VertexId`], [`HalfEdgeId`] and
/// [`FaceId`]. [`FaceId::UNBOUNDED`] is always present. Every constructor validates the
/// links, so a `Dcel` value is always internally consistent.
///
/// Accessors taking an id panic when the id is out of range, like slice indexing.
/// Ids obtained from the same `Dcel` are always in range.
#[derive(Clone, PartialEq)]
pub struct Dcel {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) half_edges: Vec<HalfEdge>,
    pub(crate) faces: Vec<Face>,
}

impl core::fmt::Debug for Dcel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Dcel")
            .field("vertices", &self.vertices.len())
            .field("half_edges", &self.half_edges.len())
            .field("faces", &self.faces.len())
            .finish_non_exhaustive()
    }
}

impl Default for Dcel {
    fn default() -> Self {
        let mut faces = Vec::with_capacity(1);
        faces.push(Face::default());
        Self {
            vertices: Vec::new(),
            half_edges: Vec::new(),
            faces,
        }
    }
}

impl Dcel {
    /// An edge list with no vertices and only the unbounded face.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt externally built tables after validating them.
    ///
    /// `faces[0]` is taken to be the unbounded face; an empty face table gets one.
    pub fn from_raw_parts(
        vertices: Vec<Vertex>,
        half_edges: Vec<HalfEdge>,
        mut faces: Vec<Face>,
    ) -> Result<Self, DcelError> {
        if faces.is_empty() {
            faces.push(Face::default());
        }
        let dcel = Self {
            vertices,
            half_edges,
            faces,
        };
        dcel.validate()?;
        Ok(dcel)
    }

    /// All vertices, indexed by [`VertexId`].
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// All half-edges, indexed by [`HalfEdgeId`].
    pub fn half_edges(&self) -> &[HalfEdge] {
        &self.half_edges
    }

    /// All faces, indexed by [`FaceId`].
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Ids of all vertices.
    pub fn vertex_ids(&self) -> impl ExactSizeIterator<Item = VertexId> + '_ {
        (0..self.vertices.len()).map(|i| VertexId(i as u32))
    }

    /// Ids of all faces, the unbounded one first.
    pub fn face_ids(&self) -> impl ExactSizeIterator<Item = FaceId> + '_ {
        (0..self.faces.len()).map(|i| FaceId(i as u32))
    }

    /// The vertex record for `id`.
    #[inline]
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.idx()]
    }

    /// The half-edge record for `id`.
    #[inline]
    pub fn half_edge(&self, id: HalfEdgeId) -> &HalfEdge {
        &self.half_edges[id.idx()]
    }

    /// The face record for `id`.
    #[inline]
    pub fn face(&self, id: FaceId) -> &Face {
        &self.faces[id.idx()]
    }

    /// Vertex a half-edge ends at.
    pub fn destination(&self, id: HalfEdgeId) -> VertexId {
        self.half_edge(self.half_edge(id).twin).origin
    }

    /// Both endpoints of a half-edge, origin first.
    pub fn full_edge(&self, id: HalfEdgeId) -> (&Vertex, &Vertex) {
        let e = self.half_edge(id);
        (self.vertex(e.origin), self.vertex(self.destination(id)))
    }

    /// Half-edges leaving `v`, in clockwise order starting at its representative.
    pub fn outgoing(&self, v: VertexId) -> Outgoing<'_> {
        let start = self.vertex(v).edge;
        Outgoing {
            dcel: self,
            start,
            cur: start,
            budget: self.half_edges.len(),
        }
    }

    /// Half-edges of the cycle through `start`, following `next`.
    pub fn cycle(&self, start: HalfEdgeId) -> Cycle<'_> {
        Cycle {
            dcel: self,
            start,
            cur: Some(start),
            budget: self.half_edges.len(),
        }
    }

    /// Half-edges of a face's representative boundary (outer, else inner).
    pub fn face_edges(&self, f: FaceId) -> impl Iterator<Item = HalfEdgeId> + '_ {
        self.face(f)
            .boundary()
            .into_iter()
            .flat_map(|start| self.cycle(start))
    }

    /// Split the half-edges leaving `v` by their destination's coordinate along `axis`.
    ///
    /// Destinations at a coordinate lesser than or equal to `v`'s go to
    /// [`lesser`](VertexEdges::lesser), the rest to [`greater`](VertexEdges::greater).
    ///
    /// # Errors
    ///
    /// [`DcelError::DimensionTooLow`] when `v` or a neighbor has no coordinate on `axis`.
    pub fn partition_vertex_edges(
        &self,
        v: VertexId,
        axis: usize,
    ) -> Result<VertexEdges, DcelError> {
        let at = self.coord(v, axis)?;
        let mut out = VertexEdges::default();
        for e in self.outgoing(v) {
            if self.coord(self.destination(e), axis)? <= at {
                out.lesser.push(e);
            } else {
                out.greater.push(e);
            }
        }
        Ok(out)
    }

    fn coord(&self, v: VertexId, axis: usize) -> Result<f64, DcelError> {
        let vertex = self.vertex(v);
        vertex.coord(axis).ok_or(DcelError::DimensionTooLow {
            vertex: v,
            dimension: vertex.dimension(),
        })
    }

    /// Coordinates every vertex has. Zero for an empty list.
    pub fn dimension(&self) -> usize {
        self.vertices.iter().map(Vertex::dimension).min().unwrap_or(0)
    }

    /// Least coordinate along `axis` among vertices that have one.
    pub fn min(&self, axis: usize) -> Option<f64> {
        self.vertices
            .iter()
            .filter_map(|v| v.coord(axis))
            .reduce(f64::min)
    }

    /// Greatest coordinate along `axis` among vertices that have one.
    pub fn max(&self, axis: usize) -> Option<f64> {
        self.vertices
            .iter()
            .filter_map(|v| v.coord(axis))
            .reduce(f64::max)
    }

    /// Bounding rectangle of the first two axes.
    pub fn bounds(&self) -> Option<Rect> {
        Some(Rect::new(
            self.min(0)?,
            self.min(1)?,
            self.max(0)?,
            self.max(1)?,
        ))
    }

    /// Check every link of the edge list.
    ///
    /// # Errors
    ///
    /// The first inconsistency found, see [`DcelError`].
    pub fn validate(&self) -> Result<(), DcelError> {
        let nv = self.vertices.len();
        let ne = self.half_edges.len();
        let nf = self.faces.len();
        let dangling = |kind, index: usize| DcelError::DanglingReference {
            kind,
            index: index as u32,
        };
        for (i, e) in self.half_edges.iter().enumerate() {
            if e.origin.idx() >= nv
                || e.twin.idx() >= ne
                || e.next.idx() >= ne
                || e.prev.idx() >= ne
                || e.face.idx() >= nf
            {
                return Err(dangling("half-edge", i));
            }
        }
        for (i, v) in self.vertices.iter().enumerate() {
            if let Some(e) = v.edge {
                if e.idx() >= ne {
                    return Err(dangling("vertex", i));
                }
                if self.half_edge(e).origin.idx() != i {
                    return Err(DcelError::BadRepresentative {
                        kind: "vertex",
                        index: i as u32,
                    });
                }
            }
        }
        for (i, f) in self.faces.iter().enumerate() {
            for e in [f.outer, f.inner].into_iter().flatten() {
                if e.idx() >= ne {
                    return Err(dangling("face", i));
                }
                if self.half_edge(e).face.idx() != i {
                    return Err(DcelError::bad_face(FaceId(i as u32)));
                }
            }
        }
        for (i, e) in self.half_edges.iter().enumerate() {
            let id = HalfEdgeId(i as u32);
            let twin = self.half_edge(e.twin);
            if e.twin == id || twin.twin != id || twin.origin == e.origin {
                return Err(DcelError::BrokenTwin(id));
            }
            let next = self.half_edge(e.next);
            if next.prev != id || self.half_edge(e.prev).next != id || next.origin != twin.origin
            {
                return Err(DcelError::BrokenCycle(id));
            }
            if next.face != e.face {
                return Err(DcelError::FaceMismatch(id));
            }
        }
        Ok(())
    }
}

/// Iterator returned by [`Dcel::outgoing`].
#[derive(Clone)]
pub struct Outgoing<'a> {
    dcel: &'a Dcel,
    start: Option<HalfEdgeId>,
    cur: Option<HalfEdgeId>,
    budget: usize,
}

impl core::fmt::Debug for Outgoing<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Outgoing")
            .field("start", &self.start)
            .field("cur", &self.cur)
            .finish_non_exhaustive()
    }
}

impl Iterator for Outgoing<'_> {
    type Item = HalfEdgeId;

    fn next(&mut self) -> Option<HalfEdgeId> {
        let e = self.cur?;
        // The budget bounds the walk even if links were edited into a non-cycle.
        self.budget = self.budget.checked_sub(1)?;
        let after = self.dcel.half_edge(self.dcel.half_edge(e).twin).next;
        self.cur = (Some(after) != self.start).then_some(after);
        Some(e)
    }
}

/// Iterator returned by [`Dcel::cycle`].
#[derive(Clone)]
pub struct Cycle<'a> {
    dcel: &'a Dcel,
    start: HalfEdgeId,
    cur: Option<HalfEdgeId>,
    budget: usize,
}

impl core::fmt::Debug for Cycle<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Cycle")
            .field("start", &self.start)
            .field("cur", &self.cur)
            .finish_non_exhaustive()
    }
}

impl Iterator for Cycle<'_> {
    type Item = HalfEdgeId;

    fn next(&mut self) -> Option<HalfEdgeId> {
        let e = self.cur?;
        self.budget = self.budget.checked_sub(1)?;
        let after = self.dcel.half_edge(e).next;
        self.cur = (after != self.start).then_some(after);
        Some(e)
    }
}
