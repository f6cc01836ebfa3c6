// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point location queries.

use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::{BezPath, Point, Shape};
use strata_dcel::{Dcel, FaceId, VertexId};
use strata_tree::{PersistentTree, TreeKind, TreeView};

use crate::error::LocateError;
use crate::key::SlabKey;
use crate::sweep::{SlabBuilder, SlabEdge, point_of};

/// Anything that answers "which face contains this point?".
pub trait LocatesPoints {
    /// Face containing the point whose first two coordinates are `coords`.
    ///
    /// `Ok(None)` means the point lies outside the range the locator covers.
    ///
    /// # Errors
    ///
    /// [`LocateError::InsufficientDimensions`] when fewer than two coordinates are given.
    fn locate(&self, coords: &[f64]) -> Result<Option<FaceId>, LocateError>;
}

fn query_point(coords: &[f64]) -> Result<Point, LocateError> {
    match coords {
        [x, y, ..] => Ok(Point::new(*x, *y)),
        _ => Err(LocateError::InsufficientDimensions(coords.len())),
    }
}

/// Slab decomposition point locator.
///
/// Holds one tree version per distinct vertex x. A query picks the version for its
/// x in O(log m) and searches it for the nearest edge at or above its y in O(log n),
/// where m is the number of slabs and n the number of edges crossing one slab.
///
/// Points in the slab at exactly a vertex x belong to the slab on its right. A point
/// lying exactly on an edge reports the face below that edge.
///
/// The locator is immutable once built, so `&PointLocator` can be shared freely
/// between threads.
pub struct PointLocator<K = f64> {
    tree: PersistentTree<K, SlabEdge>,
}

impl<K> Debug for PointLocator<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PointLocator")
            .field("kind", &self.tree.kind())
            .field("slabs", &self.tree.instants().len())
            .field("nodes", &self.tree.node_count())
            .finish_non_exhaustive()
    }
}

impl<K: SlabKey> PointLocator<K> {
    /// Sweep every vertex of `dcel` from left to right.
    ///
    /// # Errors
    ///
    /// [`LocateError::UnsupportedDimension`] or [`LocateError::NonFiniteCoordinate`]
    /// for unusable vertices, checked before the sweep starts, and
    /// [`LocateError::Sweep`] when the edge list is not a planar subdivision.
    pub fn build(dcel: &Dcel, kind: TreeKind) -> Result<Self, LocateError> {
        let mut order = dcel
            .vertex_ids()
            .map(|v| point_of(dcel, v).map(|p| (p.x, v)))
            .collect::<Result<Vec<(f64, VertexId)>, _>>()?;
        order.sort_by(|a, b| a.0.total_cmp(&b.0));
        let order: Vec<VertexId> = order.into_iter().map(|(_, v)| v).collect();
        let mut builder = SlabBuilder::new(kind);
        builder.sweep(dcel, &order)?;
        Ok(builder.finish())
    }

    pub(crate) fn from_tree(tree: PersistentTree<K, SlabEdge>) -> Self {
        Self { tree }
    }

    /// Balancing strategy of the underlying tree.
    pub fn kind(&self) -> TreeKind {
        self.tree.kind()
    }

    /// Left boundaries of the slabs, in increasing order.
    pub fn slabs(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.tree.instants()
    }

    /// Tree nodes shared by all slabs.
    pub fn node_count(&self) -> usize {
        self.tree.node_count()
    }

    /// Edges crossing the slab that contains `x`, bottom to top.
    pub fn slab_at(&self, x: f64) -> TreeView<'_, K, SlabEdge> {
        self.tree.at_instant(x)
    }

    /// The edge nearest above `p` in its slab, or the topmost edge when none is above.
    ///
    /// The flag is `true` when the edge lies above `p` (or through it).
    pub fn edge_near(&self, p: Point) -> Option<(SlabEdge, bool)> {
        let probe = K::probe(p);
        let (key, edge) = self.tree.at_instant(p.x).search_up(probe)?;
        Some((*edge, !(key < probe)))
    }

    /// Face containing `p`, or `None` when `p` is left of every vertex or in a slab
    /// no edge crosses.
    pub fn locate_point(&self, p: Point) -> Option<FaceId> {
        // `search_up` clamps to the topmost edge when nothing is above the probe.
        self.edge_near(p)
            .map(|(edge, above)| if above { edge.below } else { edge.above })
    }

    /// Face containing the point whose first two coordinates are `coords`.
    ///
    /// # Errors
    ///
    /// [`LocateError::InsufficientDimensions`] when fewer than two coordinates are given.
    pub fn locate(&self, coords: &[f64]) -> Result<Option<FaceId>, LocateError> {
        Ok(self.locate_point(query_point(coords)?))
    }
}

impl<K: SlabKey> LocatesPoints for PointLocator<K> {
    fn locate(&self, coords: &[f64]) -> Result<Option<FaceId>, LocateError> {
        Self::locate(self, coords)
    }
}

/// Reference locator testing every bounded face in turn.
///
/// O(n) per query, with no preprocessing beyond collecting face outlines. Points
/// inside no bounded face report [`FaceId::UNBOUNDED`], so this locator never
/// returns `Ok(None)`. Points exactly on an edge may report either side.
pub struct ScanLocator {
    outlines: Vec<(FaceId, BezPath)>,
}

impl Debug for ScanLocator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScanLocator")
            .field("faces", &self.outlines.len())
            .finish_non_exhaustive()
    }
}

impl ScanLocator {
    /// Collect the outer boundary of every bounded face.
    ///
    /// # Errors
    ///
    /// [`LocateError::UnsupportedDimension`] or [`LocateError::NonFiniteCoordinate`]
    /// for boundary vertices without usable x and y.
    pub fn new(dcel: &Dcel) -> Result<Self, LocateError> {
        let mut outlines = Vec::new();
        for f in dcel.face_ids().filter(|f| !f.is_unbounded()) {
            let Some(start) = dcel.face(f).outer else {
                continue;
            };
            let mut path = BezPath::new();
            for (i, e) in dcel.cycle(start).enumerate() {
                let p = point_of(dcel, dcel.half_edge(e).origin)?;
                if i == 0 {
                    path.move_to(p);
                } else {
                    path.line_to(p);
                }
            }
            path.close_path();
            outlines.push((f, path));
        }
        Ok(Self { outlines })
    }

    /// Face containing `p`.
    pub fn locate_point(&self, p: Point) -> FaceId {
        self.outlines
            .iter()
            .find(|(_, path)| path.contains(p))
            .map_or(FaceId::UNBOUNDED, |(f, _)| *f)
    }
}

impl LocatesPoints for ScanLocator {
    fn locate(&self, coords: &[f64]) -> Result<Option<FaceId>, LocateError> {
        Ok(Some(self.locate_point(query_point(coords)?)))
    }
}
