// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Weighted graph over an arena of vertices.
//!
//! Vertices are identified by [`VertexId`] handles that are allocated
//! monotonically and never reused, so two vertices are equal only when they
//! are the same vertex. Waypoints additionally carry coordinates; those are
//! compared only during the explicit [`Graph::dedup_waypoints`] pass, which
//! merges coordinate-equal waypoints and re-homes their edges.
//!
//! Coordinates are indexed by [`GridKey`]: a lookup scans the 3×3 block of
//! keys around the query and confirms with `Point::approx_eq`, so two points
//! within `EPS` always find each other even across a cell boundary.

use std::collections::{BTreeMap, BTreeSet};

use quadnav_geom::{GridKey, Point};
use tracing::debug;

use crate::error::GraphError;

/// Stable vertex handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(u64);

impl VertexId {
    /// Raw handle value.
    pub fn index(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for VertexId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// A vertex and its outgoing edge table.
#[derive(Debug, Clone, Default)]
pub struct Vertex {
    coords: Option<Point>,
    edges: BTreeMap<VertexId, f64>,
}

impl Vertex {
    /// Coordinates for waypoints, `None` for abstract vertices.
    pub fn coords(&self) -> Option<Point> {
        self.coords
    }

    /// Outgoing edges and their costs.
    pub fn edges(&self) -> &BTreeMap<VertexId, f64> {
        &self.edges
    }

    /// Cost of the edge to `other`, or `f64::INFINITY` when absent.
    pub fn cost(&self, other: VertexId) -> f64 {
        self.edges.get(&other).copied().unwrap_or(f64::INFINITY)
    }
}

/// An edge between two vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// First endpoint (the source in a directed graph).
    pub v1: VertexId,
    /// Second endpoint (the target in a directed graph).
    pub v2: VertexId,
    /// Non-negative traversal cost.
    pub cost: f64,
}

impl Edge {
    /// Builds an edge value.
    pub fn new(v1: VertexId, v2: VertexId, cost: f64) -> Self {
        Self { v1, v2, cost }
    }

    /// The endpoint opposite `v`.
    pub fn other(&self, v: VertexId) -> VertexId {
        if self.v1 == v {
            self.v2
        } else {
            self.v1
        }
    }
}

/// Undirected or directed weighted graph.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    vertices: BTreeMap<VertexId, Vertex>,
    waypoints: BTreeMap<GridKey, BTreeSet<VertexId>>,
    directed: bool,
    next_id: u64,
}

impl Graph {
    /// Empty undirected graph: every edge is stored on both endpoints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty directed graph: edges are stored on the source only.
    pub fn directed() -> Self {
        Self {
            directed: true,
            ..Self::default()
        }
    }

    /// `true` for graphs built with [`Graph::directed`].
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    fn alloc(&mut self, coords: Option<Point>) -> VertexId {
        let id = VertexId(self.next_id);
        self.next_id += 1;
        self.vertices.insert(
            id,
            Vertex {
                coords,
                edges: BTreeMap::new(),
            },
        );
        id
    }

    /// Adds an abstract vertex without coordinates.
    pub fn add_vertex(&mut self) -> VertexId {
        self.alloc(None)
    }

    /// Adds a waypoint at `p`.
    ///
    /// The new vertex is distinct from any existing waypoint at the same
    /// location until [`Graph::dedup_waypoints`] runs.
    pub fn add_waypoint(&mut self, p: Point) -> VertexId {
        let id = self.alloc(Some(p));
        self.waypoints.entry(p.grid_key()).or_default().insert(id);
        id
    }

    /// Lowest-id waypoint within `EPS` of `p`.
    pub fn find_waypoint(&self, p: Point) -> Option<VertexId> {
        self.waypoints_near(p).into_iter().next()
    }

    fn waypoints_near(&self, p: Point) -> BTreeSet<VertexId> {
        p.grid_key()
            .neighborhood()
            .filter_map(|k| self.waypoints.get(&k))
            .flatten()
            .copied()
            .filter(|id| self.coords(*id).is_some_and(|q| q.approx_eq(p)))
            .collect()
    }

    /// `true` if `v` is in the graph.
    pub fn contains(&self, v: VertexId) -> bool {
        self.vertices.contains_key(&v)
    }

    /// Vertex by handle.
    pub fn vertex(&self, v: VertexId) -> Option<&Vertex> {
        self.vertices.get(&v)
    }

    /// Vertex handles in ascending order.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.keys().copied()
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges (an undirected edge counts once).
    pub fn edge_count(&self) -> usize {
        let stored: usize = self.vertices.values().map(|v| v.edges.len()).sum();
        if self.directed {
            stored
        } else {
            stored / 2
        }
    }

    /// Coordinates of `v`, `None` for abstract or unknown vertices.
    pub fn coords(&self, v: VertexId) -> Option<Point> {
        self.vertices.get(&v).and_then(|x| x.coords)
    }

    /// Coordinates of `v`.
    ///
    /// # Errors
    /// [`GraphError::VertexNotFound`] or [`GraphError::MissingCoordinates`].
    pub fn require_coords(&self, v: VertexId) -> Result<Point, GraphError> {
        self.vertices
            .get(&v)
            .ok_or(GraphError::VertexNotFound(v))?
            .coords
            .ok_or(GraphError::MissingCoordinates(v))
    }

    /// Euclidean distance between two waypoints.
    ///
    /// # Errors
    /// As [`Graph::require_coords`].
    pub fn distance(&self, a: VertexId, b: VertexId) -> Result<f64, GraphError> {
        Ok(self.require_coords(a)?.distance(self.require_coords(b)?))
    }

    fn check(&self, v: VertexId) -> Result<(), GraphError> {
        if self.contains(v) {
            Ok(())
        } else {
            Err(GraphError::VertexNotFound(v))
        }
    }

    /// Adds (or overwrites) the edge `v1 → v2`, plus `v2 → v1` when
    /// undirected.
    ///
    /// # Errors
    /// [`GraphError::VertexNotFound`], [`GraphError::SelfLoop`], or
    /// [`GraphError::InvalidCost`] for negative or non-finite costs.
    pub fn add_edge(&mut self, v1: VertexId, v2: VertexId, cost: f64) -> Result<(), GraphError> {
        self.check(v1)?;
        self.check(v2)?;
        if v1 == v2 {
            return Err(GraphError::SelfLoop(v1));
        }
        if !cost.is_finite() || cost < 0.0 {
            return Err(GraphError::InvalidCost(cost));
        }
        if let Some(v) = self.vertices.get_mut(&v1) {
            v.edges.insert(v2, cost);
        }
        if !self.directed {
            if let Some(v) = self.vertices.get_mut(&v2) {
                v.edges.insert(v1, cost);
            }
        }
        Ok(())
    }

    /// Alias of [`Graph::add_edge`] for call sites holding two vertices.
    ///
    /// # Errors
    /// As [`Graph::add_edge`].
    pub fn add_edge_by_vertices(
        &mut self,
        v1: VertexId,
        v2: VertexId,
        cost: f64,
    ) -> Result<(), GraphError> {
        self.add_edge(v1, v2, cost)
    }

    /// Adds an edge described by an [`Edge`] value.
    ///
    /// # Errors
    /// As [`Graph::add_edge`].
    pub fn add_edge_object(&mut self, edge: &Edge) -> Result<(), GraphError> {
        self.add_edge(edge.v1, edge.v2, edge.cost)
    }

    /// Removes `v1 → v2` (and the reverse when undirected). Returns `false`
    /// if there was no such edge.
    pub fn remove_edge(&mut self, v1: VertexId, v2: VertexId) -> bool {
        let removed = self
            .vertices
            .get_mut(&v1)
            .is_some_and(|v| v.edges.remove(&v2).is_some());
        if removed && !self.directed {
            if let Some(v) = self.vertices.get_mut(&v2) {
                v.edges.remove(&v1);
            }
        }
        removed
    }

    /// `true` if `v1 → v2` exists.
    pub fn has_edge(&self, v1: VertexId, v2: VertexId) -> bool {
        self.vertices
            .get(&v1)
            .is_some_and(|v| v.edges.contains_key(&v2))
    }

    /// Cost of `v1 → v2`, `f64::INFINITY` when absent.
    pub fn cost(&self, v1: VertexId, v2: VertexId) -> f64 {
        self.vertices
            .get(&v1)
            .map_or(f64::INFINITY, |v| v.cost(v2))
    }

    /// Outgoing neighbours of `v` with edge costs, in handle order.
    pub fn neighbors(&self, v: VertexId) -> impl Iterator<Item = (VertexId, f64)> + '_ {
        self.vertices
            .get(&v)
            .into_iter()
            .flat_map(|x| x.edges.iter().map(|(id, c)| (*id, *c)))
    }

    /// Edges pointing at `v`, as `(source, cost)`.
    pub fn incoming(&self, v: VertexId) -> Vec<(VertexId, f64)> {
        if !self.directed {
            return self.neighbors(v).collect();
        }
        self.vertices
            .iter()
            .filter_map(|(id, x)| x.edges.get(&v).map(|c| (*id, *c)))
            .collect()
    }

    /// Every edge once; undirected edges are reported with `v1 < v2`.
    pub fn edges(&self) -> Vec<Edge> {
        self.vertices
            .iter()
            .flat_map(|(a, x)| x.edges.iter().map(move |(b, c)| Edge::new(*a, *b, *c)))
            .filter(|e| self.directed || e.v1 < e.v2)
            .collect()
    }

    /// Removes `v` and every edge touching it.
    ///
    /// # Errors
    /// [`GraphError::VertexNotFound`].
    pub fn remove_vertex(&mut self, v: VertexId) -> Result<(), GraphError> {
        let vertex = self
            .vertices
            .remove(&v)
            .ok_or(GraphError::VertexNotFound(v))?;
        if self.directed {
            for other in self.vertices.values_mut() {
                other.edges.remove(&v);
            }
        } else {
            for u in vertex.edges.keys() {
                if let Some(other) = self.vertices.get_mut(u) {
                    other.edges.remove(&v);
                }
            }
        }
        if let Some(p) = vertex.coords {
            let key = p.grid_key();
            if let Some(bucket) = self.waypoints.get_mut(&key) {
                bucket.remove(&v);
                if bucket.is_empty() {
                    self.waypoints.remove(&key);
                }
            }
        }
        Ok(())
    }

    /// Folds `duplicate` into `keep`: every edge of `duplicate` is re-homed
    /// onto `keep` (keeping the cheaper cost on conflicts), then
    /// `duplicate` is removed.
    ///
    /// # Errors
    /// [`GraphError::VertexNotFound`] or [`GraphError::SelfLoop`] when both
    /// handles are the same vertex.
    pub fn merge_vertices(&mut self, keep: VertexId, duplicate: VertexId) -> Result<(), GraphError> {
        self.check(keep)?;
        self.check(duplicate)?;
        if keep == duplicate {
            return Err(GraphError::SelfLoop(keep));
        }
        let outgoing: Vec<(VertexId, f64)> = self.neighbors(duplicate).collect();
        let incoming = self.incoming(duplicate);
        self.remove_vertex(duplicate)?;
        for (u, c) in outgoing {
            if u != keep && c < self.cost(keep, u) {
                self.add_edge(keep, u, c)?;
            }
        }
        for (u, c) in incoming {
            if u != keep && c < self.cost(u, keep) {
                self.add_edge(u, keep, c)?;
            }
        }
        Ok(())
    }

    /// Merges every group of coordinate-equal waypoints into its lowest
    /// handle.
    ///
    /// Returns the `duplicate → kept` mapping so callers can rewrite any
    /// handles they hold.
    pub fn dedup_waypoints(&mut self) -> Result<BTreeMap<VertexId, VertexId>, GraphError> {
        let mut remap = BTreeMap::new();
        let ids: Vec<VertexId> = self.waypoints.values().flatten().copied().collect();
        let ids: BTreeSet<VertexId> = ids.into_iter().collect();
        for id in ids {
            if remap.contains_key(&id) {
                continue;
            }
            let Some(p) = self.coords(id) else { continue };
            let dups: Vec<VertexId> = self
                .waypoints_near(p)
                .into_iter()
                .filter(|other| *other > id)
                .collect();
            for dup in dups {
                self.merge_vertices(id, dup)?;
                remap.insert(dup, id);
            }
        }
        debug!(merged = remap.len(), remaining = self.vertices.len(), "waypoints deduplicated");
        Ok(remap)
    }
}
