// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use rustc_hash::FxHashMap;
use tracing::trace;

use super::{check_endpoints, reconstruct, Pathfinder};
use crate::error::PathError;
use crate::graph::{Graph, VertexId};
use crate::queue::PriorityQueue;

/// A* with the straight-line distance to the goal as heuristic.
///
/// Every vertex it touches must carry coordinates. The heuristic is only
/// admissible when edge costs are at least the Euclidean length of the
/// edge, which holds for graphs produced by the quadtree builder.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStar;

impl AStar {
    /// New engine.
    pub fn new() -> Self {
        Self
    }
}

impl Pathfinder for AStar {
    fn find_path(
        &mut self,
        graph: &Graph,
        start: VertexId,
        goal: VertexId,
    ) -> Result<Vec<VertexId>, PathError> {
        check_endpoints(graph, start, goal)?;
        if start == goal {
            return Ok(vec![start]);
        }
        let target = graph.require_coords(goal)?;
        let mut g_score: FxHashMap<VertexId, f64> = FxHashMap::default();
        let mut came_from: FxHashMap<VertexId, VertexId> = FxHashMap::default();
        let mut open = PriorityQueue::new();
        g_score.insert(start, 0.0);
        open.insert(start, graph.require_coords(start)?.distance(target));

        while let Some((current, _)) = open.extract_min() {
            if current == goal {
                trace!(visited = g_score.len(), "A* reached goal");
                return Ok(reconstruct(&came_from, start, goal));
            }
            let g = g_score.get(&current).copied().unwrap_or(f64::INFINITY);
            for (next, cost) in graph.neighbors(current) {
                let candidate = g + cost;
                if candidate < g_score.get(&next).copied().unwrap_or(f64::INFINITY) {
                    let h = graph.require_coords(next)?.distance(target);
                    g_score.insert(next, candidate);
                    came_from.insert(next, current);
                    open.insert(next, candidate + h);
                }
            }
        }
        Ok(Vec::new())
    }
}
