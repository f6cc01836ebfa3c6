// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strata DCEL: a doubly-connected edge list for planar subdivisions.
//!
//! - Typed ids ([`VertexId`], [`HalfEdgeId`], [`FaceId`]) index three flat tables.
//! - [`Dcel::from_points`] / [`Dcel::from_coords`] build the list from bounded face
//!   cycles, fixing their orientation and deriving twins and `next`/`prev` links.
//! - [`Dcel::from_raw_parts`] adopts tables built elsewhere.
//! - Every constructor runs [`Dcel::validate`], so links can be followed without checks.
//!
//! Bounded faces are counter-clockwise and lie to the left of their half-edges.
//! [`FaceId::UNBOUNDED`] is the face outside all of them.
//!
//! # Example
//!
//! ```rust
//! use kurbo::Point;
//! use strata_dcel::{Dcel, FaceId, VertexId};
//!
//! // A square split into two triangles along its diagonal.
//! let points = [
//!     Point::new(0.0, 0.0),
//!     Point::new(4.0, 0.0),
//!     Point::new(4.0, 4.0),
//!     Point::new(0.0, 4.0),
//! ];
//! let dcel = Dcel::from_points(&points, &[[0, 1, 2], [0, 2, 3]]).unwrap();
//! assert_eq!(dcel.faces().len(), 3);
//! assert_eq!(dcel.face_edges(FaceId(1)).count(), 3);
//! assert_eq!(dcel.outgoing(VertexId(0)).count(), 3);
//! ```

#![no_std]

extern crate alloc;

mod construction;
mod dcel;
mod error;
mod types;

pub use dcel::{Cycle, Dcel, Outgoing};
pub use error::DcelError;
pub use types::{Face, FaceId, HalfEdge, HalfEdgeId, Vertex, VertexEdges, VertexId};

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use kurbo::{Point, Rect};

    /// An `n` x `n` grid of unit rooms.
    fn grid(n: usize) -> Dcel {
        let mut points = Vec::new();
        for j in 0..=n {
            for i in 0..=n {
                points.push(Point::new(i as f64, j as f64));
            }
        }
        let at = |i: usize, j: usize| j * (n + 1) + i;
        let mut rooms = Vec::new();
        for j in 0..n {
            for i in 0..n {
                rooms.push([at(i, j), at(i + 1, j), at(i + 1, j + 1), at(i, j + 1)]);
            }
        }
        Dcel::from_points(&points, &rooms).unwrap()
    }

    #[test]
    fn grid_counts_follow_euler() {
        let n = 4;
        let d = grid(n);
        let v = d.vertices().len();
        let e = d.half_edges().len() / 2;
        let f = d.faces().len();
        assert_eq!(v, 25);
        assert_eq!(e, 2 * n * (n + 1));
        // V - E + F = 2 for a connected planar subdivision.
        assert_eq!(v + f, e + 2);
        assert_eq!(d.bounds(), Some(Rect::new(0.0, 0.0, 4.0, 4.0)));
    }

    #[test]
    fn every_face_cycle_closes_on_its_face() {
        let d = grid(3);
        for f in d.face_ids() {
            let edges: Vec<_> = d.face_edges(f).collect();
            let expected = if f.is_unbounded() { 12 } else { 4 };
            assert_eq!(edges.len(), expected, "{f:?}");
            assert!(edges.iter().all(|&e| d.half_edge(e).face == f));
        }
    }

    #[test]
    fn twins_are_pairs_and_every_vertex_fan_closes() {
        let d = grid(3);
        for (i, e) in d.half_edges().iter().enumerate() {
            assert_eq!(e.twin, HalfEdgeId(i as u32).pair());
        }
        let total: usize = d.vertex_ids().map(|v| d.outgoing(v).count()).sum();
        assert_eq!(total, d.half_edges().len());
    }

    #[test]
    fn raw_parts_round_trip() {
        let d = grid(2);
        let again = Dcel::from_raw_parts(
            d.vertices().to_vec(),
            d.half_edges().to_vec(),
            d.faces().to_vec(),
        )
        .unwrap();
        assert_eq!(again, d);
    }

    #[test]
    fn corrupted_next_is_caught() {
        let d = grid(2);
        let mut half_edges = d.half_edges().to_vec();
        let first = half_edges[0].next;
        half_edges[0].next = half_edges[first.idx()].next;
        let err = Dcel::from_raw_parts(d.vertices().to_vec(), half_edges, d.faces().to_vec())
            .unwrap_err();
        assert!(matches!(err, DcelError::BrokenCycle(_)));
    }

    #[test]
    fn errors_render() {
        use alloc::string::ToString;
        let e = DcelError::DimensionTooLow {
            vertex: VertexId(3),
            dimension: 1,
        };
        assert_eq!(
            e.to_string(),
            "vertex VertexId(3) has 1 coordinates, too few for this operation"
        );
        assert_eq!(
            DcelError::BrokenTwin(HalfEdgeId(4)).to_string(),
            "half-edge HalfEdgeId(4) has an inconsistent twin"
        );
        assert_eq!(
            DcelError::bad_face(FaceId(2)).to_string(),
            "representative half-edge of face 2 does not belong to it"
        );
    }
}
