// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error types for graphs and pathfinding.

use quadnav_geom::GeomError;
use thiserror::Error;

use crate::graph::VertexId;

/// Structural graph errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// The vertex handle does not exist in this graph.
    #[error("vertex {0} is not in the graph")]
    VertexNotFound(VertexId),
    /// Edge costs must be finite and non-negative.
    #[error("invalid edge cost {0}")]
    InvalidCost(f64),
    /// An edge from a vertex to itself was requested.
    #[error("self loop on vertex {0}")]
    SelfLoop(VertexId),
    /// A geometric operation needed coordinates on an abstract vertex.
    #[error("vertex {0} has no coordinates")]
    MissingCoordinates(VertexId),
}

/// Errors from pathfinders and the quad-pathfinder facade.
///
/// "No route" is never an error: it is an empty path.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    /// Graph-level failure, including querying a vertex that is absent.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// A query point was not a finite coordinate pair
    /// ([`GeomError::NonFinite`] from `QuadPathfinder::find_path`).
    #[error(transparent)]
    Geometry(#[from] GeomError),
    /// Algorithm name did not match any known pathfinder.
    #[error("unknown algorithm `{0}` (expected dijkstra, floyd, A* or Theta*)")]
    UnknownAlgorithm(String),
}
