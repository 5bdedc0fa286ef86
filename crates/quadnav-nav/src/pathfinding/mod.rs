// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shortest-path engines over [`Graph`].
//!
//! Every engine answers `find_path(start, goal)` with the vertex sequence
//! from `start` to `goal` inclusive. An unreachable goal is an empty path;
//! an endpoint missing from the graph is [`GraphError::VertexNotFound`].

mod astar;
mod dijkstra;
mod floyd;
mod theta;

pub use astar::AStar;
pub use dijkstra::Dijkstra;
pub use floyd::{Floyd, FloydSnapshot};
pub use theta::ThetaStar;

use rustc_hash::FxHashMap;

use crate::error::{GraphError, PathError};
use crate::graph::{Graph, VertexId};

/// A shortest-path engine.
pub trait Pathfinder {
    /// Vertex path from `start` to `goal` inclusive, or empty if unreachable.
    ///
    /// # Errors
    /// [`GraphError::VertexNotFound`] for unknown endpoints; engines that
    /// need coordinates fail with [`GraphError::MissingCoordinates`].
    fn find_path(
        &mut self,
        graph: &Graph,
        start: VertexId,
        goal: VertexId,
    ) -> Result<Vec<VertexId>, PathError>;

    /// Whole-graph preprocessing. No-op for single-query engines.
    fn preprocess_paths(&mut self, _graph: &Graph) {}

    /// Incrementally accounts for a vertex that was added or gained edges.
    ///
    /// # Errors
    /// [`GraphError::VertexNotFound`] if `vertex` is not in the graph.
    fn update_shortest_paths(&mut self, _graph: &Graph, _vertex: VertexId) -> Result<(), PathError> {
        Ok(())
    }
}

/// Sum of Euclidean segment lengths along a waypoint path.
///
/// # Errors
/// [`GraphError::MissingCoordinates`] / [`GraphError::VertexNotFound`].
pub fn path_cost(graph: &Graph, path: &[VertexId]) -> Result<f64, GraphError> {
    path.windows(2)
        .map(|w| graph.distance(w[0], w[1]))
        .sum()
}

/// Sum of edge costs along a path; `f64::INFINITY` if a hop has no edge.
pub fn path_weight(graph: &Graph, path: &[VertexId]) -> f64 {
    path.windows(2).map(|w| graph.cost(w[0], w[1])).sum()
}

pub(crate) fn check_endpoints(
    graph: &Graph,
    start: VertexId,
    goal: VertexId,
) -> Result<(), GraphError> {
    for v in [start, goal] {
        if !graph.contains(v) {
            return Err(GraphError::VertexNotFound(v));
        }
    }
    Ok(())
}

/// Walks `came_from` back from `goal`. Returns an empty path if the chain
/// breaks before reaching `start`.
pub(crate) fn reconstruct(
    came_from: &FxHashMap<VertexId, VertexId>,
    start: VertexId,
    goal: VertexId,
) -> Vec<VertexId> {
    let mut path = vec![goal];
    let mut cur = goal;
    while cur != start {
        match came_from.get(&cur) {
            Some(&prev) if prev != cur && path.len() <= came_from.len() => {
                path.push(prev);
                cur = prev;
            }
            _ => return Vec::new(),
        }
    }
    path.reverse();
    path
}
