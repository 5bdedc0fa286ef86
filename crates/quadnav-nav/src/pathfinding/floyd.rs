// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use super::{check_endpoints, Pathfinder};
use crate::error::{GraphError, PathError};
use crate::graph::{Graph, VertexId};

/// Dense all-pairs tables.
#[derive(Debug, Clone, Default)]
struct Tables {
    ids: Vec<VertexId>,
    index: FxHashMap<VertexId, usize>,
    dist: Vec<Vec<f64>>,
    /// `pred[i][j]`: the vertex before `j` on the best `i → j` path.
    pred: Vec<Vec<Option<usize>>>,
}

impl Tables {
    fn push(&mut self, id: VertexId) -> usize {
        let n = self.ids.len();
        for row in &mut self.dist {
            row.push(f64::INFINITY);
        }
        for row in &mut self.pred {
            row.push(None);
        }
        let mut dist = vec![f64::INFINITY; n + 1];
        dist[n] = 0.0;
        let mut pred = vec![None; n + 1];
        pred[n] = Some(n);
        self.dist.push(dist);
        self.pred.push(pred);
        self.ids.push(id);
        self.index.insert(id, n);
        n
    }

    /// Relaxes every pair through `k`.
    fn relax_through(&mut self, k: usize) {
        let n = self.ids.len();
        for i in 0..n {
            let dik = self.dist[i][k];
            if dik == f64::INFINITY {
                continue;
            }
            for j in 0..n {
                let through = dik + self.dist[k][j];
                if through < self.dist[i][j] {
                    self.dist[i][j] = through;
                    self.pred[i][j] = self.pred[k][j];
                }
            }
        }
    }
}

/// Saved Floyd tables, restored with [`Floyd::restore`].
#[derive(Debug, Clone)]
pub struct FloydSnapshot(Tables);

/// Floyd–Warshall all-pairs shortest paths.
///
/// [`Pathfinder::preprocess_paths`] builds the tables in O(V³);
/// [`Pathfinder::update_shortest_paths`] folds in one vertex in O(V²).
/// A query touching a vertex the tables have never seen triggers a full
/// rebuild first.
#[derive(Debug, Clone, Default)]
pub struct Floyd {
    tables: Tables,
}

impl Floyd {
    /// Engine with empty tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices covered by the tables.
    pub fn len(&self) -> usize {
        self.tables.ids.len()
    }

    /// `true` before any preprocessing.
    pub fn is_empty(&self) -> bool {
        self.tables.ids.is_empty()
    }

    /// Shortest distance from `a` to `b`, `None` if either is unknown to
    /// the tables. Unreachable pairs report `f64::INFINITY`.
    pub fn path_length(&self, a: VertexId, b: VertexId) -> Option<f64> {
        let i = *self.tables.index.get(&a)?;
        let j = *self.tables.index.get(&b)?;
        Some(self.tables.dist[i][j])
    }

    /// Copies the current tables.
    pub fn snapshot(&self) -> FloydSnapshot {
        FloydSnapshot(self.tables.clone())
    }

    /// Replaces the tables with a snapshot, undoing any incremental updates
    /// made since it was taken.
    pub fn restore(&mut self, snapshot: FloydSnapshot) {
        self.tables = snapshot.0;
    }

    fn indexed(&self, graph: &Graph, v: VertexId) -> bool {
        self.tables.index.contains_key(&v) && graph.contains(v)
    }
}

impl Pathfinder for Floyd {
    fn find_path(
        &mut self,
        graph: &Graph,
        start: VertexId,
        goal: VertexId,
    ) -> Result<Vec<VertexId>, PathError> {
        check_endpoints(graph, start, goal)?;
        if !self.indexed(graph, start) || !self.indexed(graph, goal) {
            self.preprocess_paths(graph);
        }
        let (Some(&i), Some(&j)) = (self.tables.index.get(&start), self.tables.index.get(&goal))
        else {
            return Ok(Vec::new());
        };
        if self.tables.dist[i][j] == f64::INFINITY {
            return Ok(Vec::new());
        }
        let mut path = vec![goal];
        let mut cur = j;
        while cur != i {
            match self.tables.pred[i][cur] {
                Some(p) if path.len() <= self.tables.ids.len() => {
                    path.push(self.tables.ids[p]);
                    cur = p;
                }
                _ => return Ok(Vec::new()),
            }
        }
        path.reverse();
        Ok(path)
    }

    fn preprocess_paths(&mut self, graph: &Graph) {
        let mut tables = Tables::default();
        for id in graph.vertex_ids() {
            tables.push(id);
        }
        for (i, &id) in tables.ids.iter().enumerate() {
            for (to, cost) in graph.neighbors(id) {
                if let Some(&j) = tables.index.get(&to) {
                    if cost < tables.dist[i][j] {
                        tables.dist[i][j] = cost;
                        tables.pred[i][j] = Some(i);
                    }
                }
            }
        }
        for k in 0..tables.ids.len() {
            tables.relax_through(k);
        }
        debug!(vertices = tables.ids.len(), "floyd tables built");
        self.tables = tables;
    }

    fn update_shortest_paths(&mut self, graph: &Graph, vertex: VertexId) -> Result<(), PathError> {
        if !graph.contains(vertex) {
            return Err(GraphError::VertexNotFound(vertex).into());
        }
        let t = &mut self.tables;
        let v = match t.index.get(&vertex) {
            Some(&v) => v,
            None => t.push(vertex),
        };
        let n = t.ids.len();

        // Row: leave through an out-edge, then follow a known path.
        for (to, cost) in graph.neighbors(vertex) {
            let Some(&u) = t.index.get(&to) else { continue };
            for j in 0..n {
                let through = cost + t.dist[u][j];
                if through < t.dist[v][j] {
                    t.dist[v][j] = through;
                    t.pred[v][j] = if j == u { Some(v) } else { t.pred[u][j] };
                }
            }
        }
        // Column: follow a known path, then enter through an in-edge.
        for (from, cost) in graph.incoming(vertex) {
            let Some(&u) = t.index.get(&from) else { continue };
            for i in 0..n {
                let through = t.dist[i][u] + cost;
                if through < t.dist[i][v] {
                    t.dist[i][v] = through;
                    t.pred[i][v] = Some(u);
                }
            }
        }
        t.relax_through(v);
        trace!(%vertex, vertices = n, "floyd tables updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use quadnav_geom::Point;

    #[test]
    fn incremental_update_matches_full_rebuild() {
        let mut g = Graph::new();
        let a = g.add_waypoint(Point::new(0.0, 0.0));
        let b = g.add_waypoint(Point::new(4.0, 0.0));
        let c = g.add_waypoint(Point::new(8.0, 0.0));
        g.add_edge(a, b, 4.0).unwrap();
        g.add_edge(b, c, 4.0).unwrap();

        let mut floyd = Floyd::new();
        floyd.preprocess_paths(&g);
        let before = floyd.snapshot();
        assert_eq!(floyd.path_length(a, c), Some(8.0));

        let s = g.add_waypoint(Point::new(2.0, 1.0));
        g.add_edge(s, a, 1.0).unwrap();
        g.add_edge(s, c, 2.0).unwrap();
        floyd.update_shortest_paths(&g, s).unwrap();
        assert_eq!(floyd.path_length(a, c), Some(3.0));
        assert_eq!(floyd.find_path(&g, a, c).unwrap(), vec![a, s, c]);
        assert_eq!(floyd.find_path(&g, s, b).unwrap(), vec![s, a, b]);

        let mut rebuilt = Floyd::new();
        rebuilt.preprocess_paths(&g);
        for x in [a, b, c, s] {
            for y in [a, b, c, s] {
                assert_eq!(floyd.path_length(x, y), rebuilt.path_length(x, y), "{x}->{y}");
            }
        }

        g.remove_vertex(s).unwrap();
        floyd.restore(before);
        assert_eq!(floyd.len(), 3);
        assert_eq!(floyd.path_length(a, c), Some(8.0));
        assert_eq!(floyd.find_path(&g, a, c).unwrap(), vec![a, b, c]);
    }

    #[test]
    fn directed_update_uses_in_and_out_edges() {
        let mut g = Graph::directed();
        let a = g.add_vertex();
        let b = g.add_vertex();
        let mut floyd = Floyd::new();
        floyd.preprocess_paths(&g);
        assert_eq!(floyd.path_length(a, b), Some(f64::INFINITY));

        let hub = g.add_vertex();
        g.add_edge(a, hub, 1.0).unwrap();
        g.add_edge(hub, b, 1.0).unwrap();
        floyd.update_shortest_paths(&g, hub).unwrap();
        assert_eq!(floyd.path_length(a, b), Some(2.0));
        assert_eq!(floyd.path_length(b, a), Some(f64::INFINITY));
        assert_eq!(floyd.find_path(&g, a, b).unwrap(), vec![a, hub, b]);
        assert!(floyd.find_path(&g, b, a).unwrap().is_empty());
    }

    #[test]
    fn stale_tables_are_rebuilt_on_query() {
        let mut g = Graph::new();
        let a = g.add_vertex();
        let mut floyd = Floyd::new();
        floyd.preprocess_paths(&g);
        let b = g.add_vertex();
        g.add_edge(a, b, 3.0).unwrap();
        assert_eq!(floyd.find_path(&g, a, b).unwrap(), vec![a, b]);
        assert_eq!(floyd.len(), 2);
    }
}
