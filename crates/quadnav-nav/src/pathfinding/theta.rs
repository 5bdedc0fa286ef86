// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

use super::{check_endpoints, reconstruct, Pathfinder};
use crate::error::PathError;
use crate::graph::{Graph, VertexId};
use crate::queue::PriorityQueue;
use crate::sight::LineOfSight;

/// Any-angle A*.
///
/// When relaxing `current → next`, if `next` can see `current`'s parent the
/// search re-parents `next` onto that vertex at straight-line cost, so the
/// returned vertex sequence may skip over lattice vertices. Consecutive
/// vertices in the result are therefore joined by clear segments, not
/// necessarily by graph edges.
#[derive(Debug, Clone)]
pub struct ThetaStar<S> {
    sight: S,
}

impl<S: LineOfSight> ThetaStar<S> {
    /// Engine using `sight` for line-of-sight checks.
    pub fn new(sight: S) -> Self {
        Self { sight }
    }

    /// The line-of-sight oracle.
    pub fn sight(&self) -> &S {
        &self.sight
    }
}

impl<S: LineOfSight> Pathfinder for ThetaStar<S> {
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
        let mut closed: FxHashSet<VertexId> = FxHashSet::default();
        let mut open = PriorityQueue::new();
        g_score.insert(start, 0.0);
        came_from.insert(start, start);
        open.insert(start, graph.require_coords(start)?.distance(target));

        let mut shortcuts = 0usize;
        while let Some((current, _)) = open.extract_min() {
            if current == goal {
                trace!(visited = closed.len(), shortcuts, "Theta* reached goal");
                return Ok(reconstruct(&came_from, start, goal));
            }
            closed.insert(current);
            let parent = came_from.get(&current).copied().unwrap_or(current);
            let g_current = g_score.get(&current).copied().unwrap_or(f64::INFINITY);
            let parent_at = graph.require_coords(parent)?;

            for (next, cost) in graph.neighbors(current) {
                if closed.contains(&next) {
                    continue;
                }
                let next_at = graph.require_coords(next)?;
                let (via, candidate) = if parent != current && self.sight.visible(parent_at, next_at)
                {
                    let g_parent = g_score.get(&parent).copied().unwrap_or(f64::INFINITY);
                    (parent, g_parent + parent_at.distance(next_at))
                } else {
                    (current, g_current + cost)
                };
                if candidate < g_score.get(&next).copied().unwrap_or(f64::INFINITY) {
                    if via != current {
                        shortcuts += 1;
                    }
                    g_score.insert(next, candidate);
                    came_from.insert(next, via);
                    open.insert(next, candidate + next_at.distance(target));
                }
            }
        }
        Ok(Vec::new())
    }
}
