// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Building an edge list from vertex coordinates and face cycles.

use alloc::collections::BTreeMap;
use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;

use kurbo::{Point, Vec2};

use crate::dcel::Dcel;
use crate::error::DcelError;
use crate::types::{Face, FaceId, HalfEdge, HalfEdgeId, Vertex, VertexId};

impl Dcel {
    /// Build from 2D points and bounded face cycles.
    ///
    /// See [`from_coords`](Self::from_coords).
    pub fn from_points<F: AsRef<[usize]>>(points: &[Point], faces: &[F]) -> Result<Self, DcelError> {
        let coords = points.iter().map(|p| vec![p.x, p.y]).collect();
        Self::from_coords(coords, faces)
    }

    /// Build from vertex coordinates and bounded face cycles.
    ///
    /// Each entry of `faces` lists the vertex indices around one bounded face and
    /// becomes `FaceId(i + 1)`. Only the first two coordinates take part in the
    /// geometry; extra axes are kept on the vertices.
    ///
    /// - Clockwise cycles are reversed so every bounded face is counter-clockwise.
    /// - Each undirected edge gets a twin pair of half-edges at slots `2k`, `2k + 1`.
    /// - Half-edges no face claims bound the unbounded face.
    /// - `next` is the half-edge leaving the head that comes right after the twin in
    ///   clockwise order, so every face, the unbounded one included, is a closed cycle.
    ///
    /// Faces must not contain other faces unless connected to them by edges; a
    /// disconnected inner cycle is treated as part of the unbounded face.
    ///
    /// # Errors
    ///
    /// [`DcelError::DimensionTooLow`] for vertices with fewer than two coordinates and
    /// the face-cycle errors [`VertexOutOfRange`](DcelError::VertexOutOfRange),
    /// [`DegenerateFace`](DcelError::DegenerateFace),
    /// [`RepeatedVertex`](DcelError::RepeatedVertex) and
    /// [`DuplicateHalfEdge`](DcelError::DuplicateHalfEdge). Faces that overlap in a way
    /// the pairwise checks miss surface as a [`DcelError::FaceMismatch`].
    pub fn from_coords<F: AsRef<[usize]>>(
        coords: Vec<Vec<f64>>,
        faces: &[F],
    ) -> Result<Self, DcelError> {
        let mut points = Vec::with_capacity(coords.len());
        for (i, c) in coords.iter().enumerate() {
            match c.as_slice() {
                [x, y, ..] => points.push(Point::new(*x, *y)),
                _ => {
                    return Err(DcelError::DimensionTooLow {
                        vertex: VertexId(i as u32),
                        dimension: c.len(),
                    });
                }
            }
        }

        let mut pairs: BTreeMap<(usize, usize), u32> = BTreeMap::new();
        let mut ends: Vec<(usize, usize)> = Vec::new();
        let mut claims: Vec<Option<FaceId>> = Vec::new();
        let mut face_table = vec![Face::default()];
        for (fi, cycle) in faces.iter().enumerate() {
            let cycle = oriented_cycle(fi, cycle.as_ref(), &points)?;
            let face = FaceId(face_table.len() as u32);
            let mut outer = None;
            for (i, &from) in cycle.iter().enumerate() {
                let to = cycle[(i + 1) % cycle.len()];
                let key = (from.min(to), from.max(to));
                let k = *pairs.entry(key).or_insert_with(|| {
                    ends.push(key);
                    claims.extend([None, None]);
                    (ends.len() - 1) as u32
                });
                let id = if from < to {
                    HalfEdgeId(2 * k)
                } else {
                    HalfEdgeId(2 * k + 1)
                };
                let claim = &mut claims[id.idx()];
                if claim.is_some() {
                    return Err(DcelError::DuplicateHalfEdge { from, to });
                }
                *claim = Some(face);
                outer.get_or_insert(id);
            }
            face_table.push(Face { outer, inner: None });
        }

        let mut half_edges: Vec<HalfEdge> = Vec::with_capacity(claims.len());
        for (k, &(lo, hi)) in ends.iter().enumerate() {
            for (slot, origin) in [(2 * k, lo), (2 * k + 1, hi)] {
                let id = HalfEdgeId(slot as u32);
                half_edges.push(HalfEdge {
                    origin: VertexId(origin as u32),
                    twin: id.pair(),
                    next: id,
                    prev: id,
                    face: claims[slot].unwrap_or(FaceId::UNBOUNDED),
                });
            }
        }

        // Outgoing half-edges of each vertex in counter-clockwise angular order.
        let mut fans: Vec<Vec<HalfEdgeId>> = vec![Vec::new(); points.len()];
        for (i, e) in half_edges.iter().enumerate() {
            fans[e.origin.idx()].push(HalfEdgeId(i as u32));
        }
        let direction = |e: HalfEdgeId| {
            let from = half_edges[e.idx()].origin;
            let to = half_edges[e.pair().idx()].origin;
            points[to.idx()] - points[from.idx()]
        };
        for fan in &mut fans {
            fan.sort_by(|&a, &b| angular_order(direction(a), direction(b)));
        }

        let mut vertices: Vec<Vertex> = coords.into_iter().map(Vertex::new).collect();
        for (v, fan) in fans.iter().enumerate() {
            vertices[v].edge = fan.first().copied();
            for (i, &out) in fan.iter().enumerate() {
                // The half-edge arriving along `out` continues with the fan entry
                // just clockwise of `out`.
                let clockwise = fan[(i + fan.len() - 1) % fan.len()];
                let incoming = out.pair();
                half_edges[incoming.idx()].next = clockwise;
                half_edges[clockwise.idx()].prev = incoming;
            }
        }

        if let Some(e) = half_edges.iter().position(|e| e.face.is_unbounded()) {
            face_table[0].inner = Some(HalfEdgeId(e as u32));
        }

        let dcel = Self {
            vertices,
            half_edges,
            faces: face_table,
        };
        dcel.validate()?;
        tracing::debug!(
            vertices = dcel.vertices.len(),
            half_edges = dcel.half_edges.len(),
            faces = dcel.faces.len(),
            "edge list built"
        );
        Ok(dcel)
    }
}

/// Check one input cycle and return it in counter-clockwise order.
fn oriented_cycle(face: usize, cycle: &[usize], points: &[Point]) -> Result<Vec<usize>, DcelError> {
    if cycle.len() < 3 {
        return Err(DcelError::DegenerateFace { face });
    }
    if let Some(&vertex) = cycle.iter().find(|&&v| v >= points.len()) {
        return Err(DcelError::VertexOutOfRange { face, vertex });
    }
    let mut seen = cycle.to_vec();
    seen.sort_unstable();
    if let Some(w) = seen.windows(2).find(|w| w[0] == w[1]) {
        return Err(DcelError::RepeatedVertex {
            face,
            vertex: w[0],
        });
    }
    let area = signed_area(cycle, points);
    if area == 0.0 || area.is_nan() {
        return Err(DcelError::DegenerateFace { face });
    }
    let mut cycle = cycle.to_vec();
    if area < 0.0 {
        tracing::debug!(face, "clockwise face cycle reversed");
        cycle.reverse();
    }
    Ok(cycle)
}

/// Twice the signed area enclosed by `cycle`; positive when counter-clockwise.
fn signed_area(cycle: &[usize], points: &[Point]) -> f64 {
    let mut sum = 0.0;
    for (i, &a) in cycle.iter().enumerate() {
        let b = cycle[(i + 1) % cycle.len()];
        sum += points[a].to_vec2().cross(points[b].to_vec2());
    }
    sum
}

/// Counter-clockwise order of directions, starting from the positive x axis.
fn angular_order(a: Vec2, b: Vec2) -> Ordering {
    let half = |v: Vec2| u8::from(!(v.y > 0.0 || (v.y == 0.0 && v.x > 0.0)));
    half(a)
        .cmp(&half(b))
        .then_with(|| 0.0_f64.partial_cmp(&a.cross(b)).unwrap_or(Ordering::Equal))
}
