// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Left-to-right plane sweep that turns an edge list into slab versions.

use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::Point;
use strata_dcel::{Dcel, DcelError, FaceId, HalfEdgeId, VertexId};
use strata_tree::{PersistentTree, TreeError, TreeKind};

use crate::error::LocateError;
use crate::key::SlabKey;
use crate::locator::PointLocator;

/// An edge live in a slab, as stored in the tree.
///
/// `half_edge` is the half-edge running right to left, so the face it bounds lies
/// below the edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SlabEdge {
    /// Right-to-left half-edge of the edge.
    pub half_edge: HalfEdgeId,
    /// Face directly below the edge.
    pub below: FaceId,
    /// Face directly above the edge.
    pub above: FaceId,
}

impl SlabEdge {
    /// The slab record for the edge whose right-to-left half is `half_edge`.
    pub fn new(dcel: &Dcel, half_edge: HalfEdgeId) -> Self {
        let e = dcel.half_edge(half_edge);
        Self {
            half_edge,
            below: e.face,
            above: dcel.half_edge(e.twin).face,
        }
    }
}

/// Sweeps columns of vertices into a [`PersistentTree`], one instant per distinct x.
///
/// At each column, edges reaching back to a lesser x are closed (deleted) and edges
/// reaching on to a greater x are opened (inserted). Edges whose far end has the same
/// x are vertical: they never span a slab and are neither inserted nor deleted.
///
/// The builder remembers the last committed x, so a sweep may be fed in several
/// calls as long as every column lies strictly right of the previous one.
pub struct SlabBuilder<K = f64> {
    tree: PersistentTree<K, SlabEdge>,
    last: Option<f64>,
}

impl<K> Debug for SlabBuilder<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SlabBuilder")
            .field("last", &self.last)
            .field("live_edges", &self.tree.len())
            .finish_non_exhaustive()
    }
}

impl<K: SlabKey> SlabBuilder<K> {
    /// An empty sweep over a tree with the given balancing.
    pub fn new(kind: TreeKind) -> Self {
        Self {
            tree: PersistentTree::new(kind),
            last: None,
        }
    }

    /// X of the last committed column.
    pub fn last_instant(&self) -> Option<f64> {
        self.last
    }

    /// Number of edges live right of the last column.
    pub fn live_edges(&self) -> usize {
        self.tree.len()
    }

    /// Sweep `vertices`, which must be sorted by x.
    ///
    /// Consecutive vertices with equal x form one column and one instant.
    ///
    /// # Errors
    ///
    /// [`LocateError::UnsupportedDimension`] or [`LocateError::NonFiniteCoordinate`]
    /// before anything is swept; [`LocateError::Sweep`] when a column does not lie
    /// right of the previous one or an edge to close is missing. The builder must be
    /// discarded after a `Sweep` error.
    pub fn sweep(&mut self, dcel: &Dcel, vertices: &[VertexId]) -> Result<(), LocateError> {
        for &v in vertices {
            point_of(dcel, v)?;
        }
        let mut rest = vertices;
        while let Some(&first) = rest.first() {
            let x = point_of(dcel, first)?.x;
            let mut n = 1;
            while n < rest.len() && point_of(dcel, rest[n])?.x == x {
                n += 1;
            }
            let (column, tail) = rest.split_at(n);
            self.sweep_column(dcel, x, column)?;
            rest = tail;
        }
        Ok(())
    }

    fn sweep_column(&mut self, dcel: &Dcel, x: f64, column: &[VertexId]) -> Result<(), LocateError> {
        self.tree
            .set_instant(x)
            .map_err(|source| sweep_error(x, source))?;
        self.last = Some(x);
        // Close everything first so an opening edge never meets the closing edge that
        // ends at the same vertex.
        let mut opening: Vec<(K, SlabEdge)> = Vec::new();
        for &v in column {
            let here = point_of(dcel, v)?;
            let split = dcel
                .partition_vertex_edges(v, 0)
                .map_err(|err| unsupported(dcel, v, err))?;
            for e in split.lesser {
                let far = point_of(dcel, dcel.destination(e))?;
                if far.x == here.x {
                    tracing::trace!(x, half_edge = e.0, "vertical edge skipped");
                    continue;
                }
                // `e` runs from here back to the left: it is the stored half.
                let value = SlabEdge::new(dcel, e);
                self.tree
                    .delete(&K::edge(far, here), Some(&value))
                    .map_err(|source| sweep_error(x, source))?;
            }
            for e in split.greater {
                let far = point_of(dcel, dcel.destination(e))?;
                let value = SlabEdge::new(dcel, dcel.half_edge(e).twin);
                opening.push((K::edge(here, far), value));
            }
        }
        for (key, value) in opening {
            self.tree.insert(key, value);
        }
        tracing::trace!(x, live = self.tree.len(), "column swept");
        Ok(())
    }

    /// Stop sweeping and hand the versions to a locator.
    pub fn finish(self) -> PointLocator<K> {
        tracing::debug!(
            slabs = self.tree.instants().len(),
            nodes = self.tree.node_count(),
            "slab decomposition built"
        );
        PointLocator::from_tree(self.tree)
    }
}

fn sweep_error(x: f64, source: TreeError) -> LocateError {
    tracing::warn!(x, %source, "sweep step failed");
    LocateError::Sweep { x, source }
}

fn unsupported(dcel: &Dcel, v: VertexId, err: DcelError) -> LocateError {
    match err {
        DcelError::DimensionTooLow { vertex, dimension } => {
            LocateError::UnsupportedDimension { vertex, dimension }
        }
        _ => LocateError::UnsupportedDimension {
            vertex: v,
            dimension: dcel.vertex(v).dimension(),
        },
    }
}

/// First two coordinates of `v`, checked.
pub(crate) fn point_of(dcel: &Dcel, v: VertexId) -> Result<Point, LocateError> {
    let vertex = dcel.vertex(v);
    let p = vertex.point().ok_or(LocateError::UnsupportedDimension {
        vertex: v,
        dimension: vertex.dimension(),
    })?;
    if !p.is_finite() {
        return Err(LocateError::NonFiniteCoordinate { vertex: v });
    }
    Ok(p)
}
