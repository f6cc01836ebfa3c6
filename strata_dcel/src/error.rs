// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction and validation errors.

use crate::types::{FaceId, HalfEdgeId, VertexId};

/// Why an edge list could not be built or failed validation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DcelError {
    /// A face cycle names a vertex index past the end of the vertex list.
    #[error("face {face} refers to vertex {vertex}, which does not exist")]
    VertexOutOfRange {
        /// Index of the face cycle in the input.
        face: usize,
        /// Offending vertex index.
        vertex: usize,
    },
    /// A face cycle has fewer than three vertices or encloses no area.
    #[error("face {face} is degenerate")]
    DegenerateFace {
        /// Index of the face cycle in the input.
        face: usize,
    },
    /// A face cycle visits the same vertex twice.
    #[error("face {face} visits vertex {vertex} more than once")]
    RepeatedVertex {
        /// Index of the face cycle in the input.
        face: usize,
        /// Repeated vertex index.
        vertex: usize,
    },
    /// Two faces claim the same directed edge, so they overlap or disagree on orientation.
    #[error("directed edge {from} -> {to} is claimed by two faces")]
    DuplicateHalfEdge {
        /// Start vertex index.
        from: usize,
        /// End vertex index.
        to: usize,
    },
    /// A vertex has fewer coordinates than the operation needs.
    #[error("vertex {vertex:?} has {dimension} coordinates, too few for this operation")]
    DimensionTooLow {
        /// Offending vertex.
        vertex: VertexId,
        /// Coordinates it has.
        dimension: usize,
    },
    /// A half-edge's twin does not point back, or twins share an origin.
    #[error("half-edge {0:?} has an inconsistent twin")]
    BrokenTwin(HalfEdgeId),
    /// `next`/`prev` links disagree, or `next` does not start where the half-edge ends.
    #[error("half-edge {0:?} has inconsistent next/prev links")]
    BrokenCycle(HalfEdgeId),
    /// A half-edge and its `next` bound different faces.
    #[error("half-edge {0:?} and its successor bound different faces")]
    FaceMismatch(HalfEdgeId),
    /// A record refers to an id past the end of its table.
    #[error("{kind} {index} refers past the end of a table")]
    DanglingReference {
        /// Kind of record holding the reference.
        kind: &'static str,
        /// Index of that record.
        index: u32,
    },
    /// A vertex or face representative half-edge does not belong to it.
    #[error("representative half-edge of {kind} {index} does not belong to it")]
    BadRepresentative {
        /// Kind of record.
        kind: &'static str,
        /// Index of that record.
        index: u32,
    },
}

impl DcelError {
    pub(crate) const fn bad_face(face: FaceId) -> Self {
        Self::BadRepresentative {
            kind: "face",
            index: face.0,
        }
    }
}
