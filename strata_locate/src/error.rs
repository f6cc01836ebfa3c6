// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised while building or querying a locator.

use strata_dcel::VertexId;
use strata_tree::TreeError;

/// Why a slab decomposition could not be built or a query was malformed.
///
/// A query outside the swept range is not an error: it returns `Ok(None)`.
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum LocateError {
    /// A vertex has fewer than two coordinates. Nothing was built.
    #[error("vertex {vertex:?} has {dimension} coordinates, slab decomposition needs 2")]
    UnsupportedDimension {
        /// Offending vertex.
        vertex: VertexId,
        /// Coordinates it has.
        dimension: usize,
    },
    /// A vertex has a NaN or infinite coordinate. Nothing was built.
    #[error("vertex {vertex:?} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Offending vertex.
        vertex: VertexId,
    },
    /// A query passed fewer than two coordinates.
    #[error("point location needs 2 coordinates, got {0}")]
    InsufficientDimensions(usize),
    /// A tree operation failed during the sweep, which means the edge list does not
    /// describe a planar subdivision (or columns were swept out of order).
    #[error("sweep failed at x = {x}")]
    Sweep {
        /// Sweep position of the failing column.
        x: f64,
        /// Underlying tree error.
        source: TreeError,
    },
}
