// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Point-to-point routing over a quadtree navigation graph.

use core::fmt;
use core::str::FromStr;
use std::collections::BTreeMap;

use quadnav_geom::{Figure, GeomError, Point};
use quadnav_space::{QuadTree, SpriteStore};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::builder::{build_graph_on_quadtree, BuildOptions, NavGraph};
use crate::error::PathError;
use crate::graph::{Graph, VertexId};
use crate::pathfinding::{AStar, Dijkstra, Floyd, Pathfinder, ThetaStar};
use crate::sight::{LineOfSight, ObstacleSight};

/// Search algorithm behind a [`QuadPathfinder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Algorithm {
    /// Dijkstra with early exit.
    #[default]
    Dijkstra,
    /// Floyd–Warshall with incremental splicing.
    Floyd,
    /// A* with a Euclidean heuristic.
    AStar,
    /// Any-angle Theta*.
    ThetaStar,
}

impl Algorithm {
    /// Every algorithm, in declaration order.
    pub const ALL: [Self; 4] = [Self::Dijkstra, Self::Floyd, Self::AStar, Self::ThetaStar];

    /// Canonical name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dijkstra => "dijkstra",
            Self::Floyd => "floyd",
            Self::AStar => "A*",
            Self::ThetaStar => "Theta*",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dijkstra" => Ok(Self::Dijkstra),
            "floyd" | "floyd-warshall" => Ok(Self::Floyd),
            "a*" | "astar" => Ok(Self::AStar),
            "theta*" | "thetastar" => Ok(Self::ThetaStar),
            _ => Err(PathError::UnknownAlgorithm(s.to_owned())),
        }
    }
}

impl TryFrom<String> for Algorithm {
    type Error = PathError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Algorithm> for String {
    fn from(a: Algorithm) -> Self {
        a.name().to_owned()
    }
}

/// Length of a polyline.
pub fn polyline_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Routes between arbitrary free points.
///
/// Owns the navigation graph built over `tree`. Each query splices the
/// start and goal into the graph as temporary waypoints, searches, and
/// removes them again, so repeated queries always see the same graph.
#[derive(Debug)]
pub struct QuadPathfinder<'w> {
    tree: &'w QuadTree,
    store: &'w SpriteStore,
    nav: NavGraph,
    algorithm: Algorithm,
    floyd: Option<Floyd>,
}

impl<'w> QuadPathfinder<'w> {
    /// Builds the navigation graph for `tree` and prepares `algorithm`.
    pub fn new(
        tree: &'w QuadTree,
        store: &'w SpriteStore,
        algorithm: Algorithm,
        options: &BuildOptions,
    ) -> Result<Self, PathError> {
        let nav = build_graph_on_quadtree(tree, store, options)?;
        Ok(Self::with_nav_graph(tree, store, nav, algorithm))
    }

    /// Uses an already-built navigation graph.
    pub fn with_nav_graph(
        tree: &'w QuadTree,
        store: &'w SpriteStore,
        nav: NavGraph,
        algorithm: Algorithm,
    ) -> Self {
        let mut this = Self {
            tree,
            store,
            nav,
            algorithm: Algorithm::Dijkstra,
            floyd: None,
        };
        this.set_algorithm(algorithm);
        this
    }

    /// Switches algorithm. Selecting Floyd preprocesses the graph once.
    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = algorithm;
        if algorithm == Algorithm::Floyd && self.floyd.is_none() {
            let mut floyd = Floyd::new();
            floyd.preprocess_paths(self.nav.graph());
            self.floyd = Some(floyd);
        }
    }

    /// Current algorithm.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// The navigation graph.
    pub fn nav_graph(&self) -> &NavGraph {
        &self.nav
    }

    /// The waypoint graph.
    pub fn graph(&self) -> &Graph {
        self.nav.graph()
    }

    /// Waypoints visible from `point`, with their distances.
    ///
    /// Scans the subtree of the deepest node containing `point`. A waypoint
    /// coinciding with `point` counts as visible.
    pub fn reachable_waypoints(&self, point: Point) -> BTreeMap<VertexId, f64> {
        let sight = ObstacleSight::new(self.tree, self.store);
        let mut out = BTreeMap::new();
        let Some(home) = self.tree.get_quad_tree(&Figure::Point(point)) else {
            return out;
        };
        let graph = self.nav.graph();
        for node in self.tree.dfs_from(home) {
            for &w in self.nav.waypoints_in(node) {
                let Some(at) = graph.coords(w) else { continue };
                if at.approx_eq(point) || sight.visible(point, at) {
                    out.insert(w, point.distance(at));
                }
            }
        }
        out
    }

    /// Route from `start` to `goal` as a point sequence beginning at
    /// `start` and ending at `goal`.
    ///
    /// Returns an empty route when either point is outside the map or
    /// inside an obstacle, when either sees no waypoint, or when the goal
    /// is unreachable. Coincident free endpoints give `[start, goal]`.
    ///
    /// # Errors
    /// [`GeomError::NonFinite`] when either point has a NaN or infinite
    /// coordinate. Graph errors only on internal inconsistencies.
    #[instrument(skip(self), fields(algorithm = %self.algorithm))]
    pub fn find_path(&mut self, start: Point, goal: Point) -> Result<Vec<Point>, PathError> {
        if !start.is_finite() || !goal.is_finite() {
            return Err(GeomError::NonFinite("route endpoint").into());
        }
        let sight = ObstacleSight::new(self.tree, self.store);
        let bounds = self.tree.bounds();
        for p in [start, goal] {
            if !bounds.contains_point(p) || !sight.point_is_free(p) {
                debug!(point = %p, "endpoint is blocked or off the map");
                return Ok(Vec::new());
            }
        }
        if start.approx_eq(goal) {
            return Ok(vec![start, goal]);
        }
        let start_links = self.reachable_waypoints(start);
        let goal_links = self.reachable_waypoints(goal);
        if start_links.is_empty() || goal_links.is_empty() {
            debug!(
                start_links = start_links.len(),
                goal_links = goal_links.len(),
                "endpoint sees no waypoint"
            );
            return Ok(Vec::new());
        }

        let snapshot = self.floyd.as_ref().map(Floyd::snapshot);
        let graph = self.nav.graph_mut();
        let s = graph.add_waypoint(start);
        let g = graph.add_waypoint(goal);
        let result = splice_and_search(
            graph,
            self.floyd.as_mut(),
            self.algorithm,
            sight,
            (s, &start_links),
            (g, &goal_links),
        );
        let cleanup = graph.remove_vertex(s).and(graph.remove_vertex(g));
        if let (Some(floyd), Some(snapshot)) = (self.floyd.as_mut(), snapshot) {
            floyd.restore(snapshot);
        }
        let route = result?;
        cleanup?;
        debug!(
            points = route.len(),
            length = polyline_length(&route),
            "route found"
        );
        Ok(route)
    }
}

fn splice_and_search(
    graph: &mut Graph,
    floyd: Option<&mut Floyd>,
    algorithm: Algorithm,
    sight: ObstacleSight<'_>,
    (s, start_links): (VertexId, &BTreeMap<VertexId, f64>),
    (g, goal_links): (VertexId, &BTreeMap<VertexId, f64>),
) -> Result<Vec<Point>, PathError> {
    for (&w, &cost) in start_links {
        graph.add_edge(s, w, cost)?;
    }
    for (&w, &cost) in goal_links {
        graph.add_edge(g, w, cost)?;
    }
    let graph: &Graph = graph;
    let ids = match (algorithm, floyd) {
        (Algorithm::Floyd, Some(floyd)) => {
            floyd.update_shortest_paths(graph, s)?;
            floyd.update_shortest_paths(graph, g)?;
            floyd.find_path(graph, s, g)?
        }
        (Algorithm::Floyd, None) => {
            let mut floyd = Floyd::new();
            floyd.preprocess_paths(graph);
            floyd.find_path(graph, s, g)?
        }
        (Algorithm::Dijkstra, _) => Dijkstra::new().find_path(graph, s, g)?,
        (Algorithm::AStar, _) => AStar::new().find_path(graph, s, g)?,
        (Algorithm::ThetaStar, _) => ThetaStar::new(sight).find_path(graph, s, g)?,
    };
    let mut route: Vec<Point> = Vec::with_capacity(ids.len());
    for id in ids {
        let p = graph.require_coords(id)?;
        if route.last().is_none_or(|last| !last.approx_eq(p)) {
            route.push(p);
        }
    }
    Ok(route)
}
