// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use rustc_hash::FxHashMap;
use tracing::trace;

use super::{check_endpoints, reconstruct, Pathfinder};
use crate::error::PathError;
use crate::graph::{Graph, VertexId};
use crate::queue::PriorityQueue;

/// Single-source shortest paths with early exit on the goal.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dijkstra;

impl Dijkstra {
    /// New engine.
    pub fn new() -> Self {
        Self
    }
}

impl Pathfinder for Dijkstra {
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
        let mut dist: FxHashMap<VertexId, f64> = FxHashMap::default();
        let mut came_from: FxHashMap<VertexId, VertexId> = FxHashMap::default();
        let mut open = PriorityQueue::new();
        dist.insert(start, 0.0);
        open.insert(start, 0.0);

        while let Some((current, d)) = open.extract_min() {
            if current == goal {
                trace!(settled = dist.len(), cost = d, "dijkstra reached goal");
                return Ok(reconstruct(&came_from, start, goal));
            }
            for (next, cost) in graph.neighbors(current) {
                let candidate = d + cost;
                if candidate < dist.get(&next).copied().unwrap_or(f64::INFINITY) {
                    dist.insert(next, candidate);
                    came_from.insert(next, current);
                    open.insert(next, candidate);
                }
            }
        }
        Ok(Vec::new())
    }
}
