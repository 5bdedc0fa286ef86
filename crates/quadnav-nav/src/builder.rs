// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Waypoint graph construction over a quadtree.
//!
//! Waypoints come from two sources: samples of every node's square (chosen
//! by [`VertexMode`]) and samples hugging every obstacle. Each waypoint is
//! filed under the deepest node containing it. Edges are only attempted
//! between a waypoint and the waypoints of its own node, the nodes adjacent
//! to it, and its ancestors; an edge exists when the segment between the
//! two is clear, at Euclidean cost.

use core::f64::consts::PI;
use std::collections::{BTreeMap, BTreeSet};

use quadnav_geom::{Figure, Point, Rectangle};
use quadnav_space::{Direction, NodeId, QuadTree, SpriteStore};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::error::GraphError;
use crate::graph::{Graph, VertexId};
use crate::sight::{LineOfSight, ObstacleSight};

/// Which points of each node square become waypoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VertexMode {
    /// The centre only.
    Center,
    /// The four corners.
    #[default]
    Corners,
    /// The four edge midpoints.
    Edges,
    /// Corners and edge midpoints.
    Both,
    /// Corners, edge midpoints and the centre.
    All,
}

impl VertexMode {
    /// Sample points of `rect` for this mode.
    pub fn samples(self, rect: &Rectangle) -> Vec<Point> {
        let mut out = Vec::with_capacity(9);
        if matches!(self, Self::Corners | Self::Both | Self::All) {
            out.extend(rect.corners());
        }
        if matches!(self, Self::Edges | Self::Both | Self::All) {
            out.extend(rect.edge_midpoints());
        }
        if matches!(self, Self::Center | Self::All) {
            out.push(rect.center());
        }
        out
    }
}

/// Knobs for [`build_graph_on_quadtree`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Node-square sampling.
    pub vertex_mode: VertexMode,
    /// Samples around each circular obstacle.
    pub sampling_quality: usize,
    /// Outward offset of obstacle-hugging waypoints.
    pub clearance: f64,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            vertex_mode: VertexMode::Corners,
            sampling_quality: 10,
            clearance: 0.05,
        }
    }
}

/// Builder output: the graph plus the waypoints filed under each node.
#[derive(Debug, Clone, Default)]
pub struct NavGraph {
    graph: Graph,
    waypoints: BTreeMap<NodeId, Vec<VertexId>>,
}

impl NavGraph {
    /// The waypoint graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub(crate) fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    /// Waypoints filed under `node` (empty if none).
    pub fn waypoints_in(&self, node: NodeId) -> &[VertexId] {
        self.waypoints.get(&node).map(Vec::as_slice).unwrap_or_default()
    }

    /// All `(node, waypoints)` entries in node order.
    pub fn waypoints(&self) -> &BTreeMap<NodeId, Vec<VertexId>> {
        &self.waypoints
    }

    /// Splits into the graph and the per-node waypoint table.
    pub fn into_parts(self) -> (Graph, BTreeMap<NodeId, Vec<VertexId>>) {
        (self.graph, self.waypoints)
    }
}

/// Points hugging `shape`, pushed `clearance` outwards.
///
/// Circles are sampled on the circumscribed polygon of the inflated disk so
/// consecutive samples see each other past the obstacle. Other shapes move
/// each defining point away from the shape's mass centre.
pub fn obstacle_samples(shape: &Figure, quality: usize, clearance: f64) -> Vec<Point> {
    match shape {
        Figure::Circle(c) => {
            let inflated = c.radius() + clearance;
            let reach = if quality >= 3 {
                inflated / (PI / quality as f64).cos()
            } else {
                inflated
            };
            Figure::Circle(*c)
                .vertexes(quality)
                .into_iter()
                .map(|p| match (p - c.center()).normalized() {
                    Some(dir) => c.center() + dir * reach,
                    None => c.center() + Point::new(reach, 0.0),
                })
                .collect()
        }
        Figure::FigArray(members) => members
            .iter()
            .flat_map(|m| obstacle_samples(m, quality, clearance))
            .collect(),
        _ => {
            let Some(center) = shape.mass_center() else {
                return Vec::new();
            };
            shape
                .vertexes(quality)
                .into_iter()
                .map(|p| match (p - center).normalized() {
                    Some(dir) => p + dir * clearance,
                    None => p,
                })
                .collect()
        }
    }
}

/// Builds the navigation graph for the obstacles indexed by `tree`.
///
/// # Errors
/// Only on internal graph inconsistencies; a well-formed tree always
/// yields a graph.
#[instrument(skip(tree, store, options), fields(nodes = tree.node_count(), sprites = tree.sprite_count()))]
pub fn build_graph_on_quadtree(
    tree: &QuadTree,
    store: &SpriteStore,
    options: &BuildOptions,
) -> Result<NavGraph, GraphError> {
    let sight = ObstacleSight::new(tree, store);
    let mut graph = Graph::new();
    let mut waypoints: BTreeMap<NodeId, Vec<VertexId>> = BTreeMap::new();

    for node in tree.dfs() {
        let Some(rect) = tree.node(node).map(|n| *n.rect()) else {
            continue;
        };
        for p in options.vertex_mode.samples(&rect) {
            if sight.point_is_free(p) {
                waypoints.entry(node).or_default().push(graph.add_waypoint(p));
            }
        }
    }

    let bounds = tree.bounds();
    for sprite in tree.sprites() {
        let Some(shape) = store.collision_shape(sprite) else {
            continue;
        };
        for p in obstacle_samples(shape, options.sampling_quality, options.clearance) {
            if !bounds.contains_point(p) || !sight.point_is_free(p) {
                continue;
            }
            if let Some(node) = tree.get_quad_tree(&Figure::Point(p)) {
                waypoints.entry(node).or_default().push(graph.add_waypoint(p));
            }
        }
    }

    let remap = graph.dedup_waypoints()?;
    for list in waypoints.values_mut() {
        let mut seen = BTreeSet::new();
        list.retain_mut(|v| {
            if let Some(kept) = remap.get(v) {
                *v = *kept;
            }
            seen.insert(*v)
        });
    }

    let mut attempted = 0usize;
    for node in tree.dfs() {
        let Some(own) = waypoints.get(&node) else {
            continue;
        };
        let mut reach: BTreeSet<VertexId> = BTreeSet::new();
        let neighbourhood = core::iter::once(node)
            .chain(tree.find_adjacent(node, Direction::All))
            .chain(tree.recursive_parents(node));
        for other in neighbourhood {
            if let Some(list) = waypoints.get(&other) {
                reach.extend(list.iter().copied());
            }
        }
        for &w in own {
            let from = graph.require_coords(w)?;
            for &u in &reach {
                if u == w || graph.has_edge(w, u) {
                    continue;
                }
                attempted += 1;
                let to = graph.require_coords(u)?;
                if sight.visible(from, to) {
                    graph.add_edge(w, u, from.distance(to))?;
                }
            }
        }
        trace!(%node, waypoints = own.len(), candidates = reach.len(), "node connected");
    }

    debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        merged = remap.len(),
        attempted,
        "navigation graph built"
    );
    Ok(NavGraph { graph, waypoints })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use quadnav_geom::{Circle, EPS};
    use quadnav_space::{QuadTreeConfig, Sprite};

    fn world(obstacles: Vec<Figure>) -> (QuadTree, SpriteStore) {
        let mut store = SpriteStore::new();
        let mut tree = QuadTree::new(
            Rectangle::square(Point::ORIGIN, 16.0).unwrap(),
            QuadTreeConfig::default(),
        )
        .unwrap();
        let ids: Vec<_> = obstacles
            .into_iter()
            .map(|f| store.insert(Sprite::obstacle(f)))
            .collect();
        assert!(tree.add_sprites(&store, ids).is_empty());
        (tree, store)
    }

    #[test]
    fn vertex_modes_pick_the_documented_points() {
        let r = Rectangle::square(Point::ORIGIN, 2.0).unwrap();
        assert_eq!(VertexMode::Center.samples(&r), vec![Point::new(1.0, 1.0)]);
        assert_eq!(VertexMode::Corners.samples(&r).len(), 4);
        assert_eq!(VertexMode::Edges.samples(&r)[0], Point::new(0.0, 1.0));
        assert_eq!(VertexMode::Both.samples(&r).len(), 8);
        assert_eq!(VertexMode::All.samples(&r).len(), 9);
    }

    #[test]
    fn circle_samples_clear_the_disk() {
        let disk = Circle::new(Point::new(5.0, 5.0), 2.0).unwrap();
        let samples = obstacle_samples(&Figure::Circle(disk), 10, 0.05);
        assert_eq!(samples.len(), 10);
        for (i, p) in samples.iter().enumerate() {
            assert!(p.distance(disk.center()) > 2.05);
            let q = samples[(i + 1) % samples.len()];
            let chord = Figure::Line(quadnav_geom::Line::new(*p, q).unwrap());
            assert!(!chord.has_intersect(&Figure::Circle(disk)));
        }
    }

    #[test]
    fn polygon_samples_move_outwards() {
        let r = Rectangle::new(Point::new(2.0, 2.0), Point::new(4.0, 4.0)).unwrap();
        let samples = obstacle_samples(&Figure::Rectangle(r), 10, 0.1);
        assert_eq!(samples.len(), 4);
        for p in samples {
            assert!(!Figure::Rectangle(r).contains_point(p));
        }
    }

    #[test]
    fn empty_tree_is_a_single_clique() {
        let (tree, store) = world(Vec::new());
        let nav = build_graph_on_quadtree(&tree, &store, &BuildOptions::default()).unwrap();
        assert_eq!(nav.graph().vertex_count(), 4);
        assert_eq!(nav.graph().edge_count(), 6);
        assert_eq!(nav.waypoints_in(tree.root()).len(), 4);
    }

    #[test]
    fn waypoints_avoid_obstacles_and_edges_are_clear() {
        let disk = Circle::new(Point::new(3.0, 3.0), 1.0).unwrap();
        let (tree, store) = world(vec![disk.into()]);
        assert!(tree.node_count() > 1);
        let options = BuildOptions {
            vertex_mode: VertexMode::All,
            ..BuildOptions::default()
        };
        let nav = build_graph_on_quadtree(&tree, &store, &options).unwrap();
        let g = nav.graph();
        let obstacle = Figure::Circle(disk);
        for v in g.vertex_ids() {
            let p = g.coords(v).unwrap();
            assert!(!obstacle.contains_point(p), "{p}");
        }
        for e in g.edges() {
            let a = g.coords(e.v1).unwrap();
            let b = g.coords(e.v2).unwrap();
            assert!((e.cost - a.distance(b)).abs() < 1e-9);
            let seg = Figure::Line(quadnav_geom::Line::new(a, b).unwrap());
            assert!(!seg.has_intersect(&obstacle));
        }
    }

    #[test]
    fn shared_corners_are_merged() {
        let disk = Circle::new(Point::new(3.0, 3.0), 1.0).unwrap();
        let (tree, store) = world(vec![disk.into()]);
        let nav = build_graph_on_quadtree(&tree, &store, &BuildOptions::default()).unwrap();
        let g = nav.graph();
        let points: Vec<Point> = g.vertex_ids().filter_map(|v| g.coords(v)).collect();
        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                assert!(a.distance(*b) >= EPS, "{a} and {b} were not merged");
            }
        }
        for list in nav.waypoints().values() {
            for v in list {
                assert!(g.contains(*v));
            }
        }
    }
}
