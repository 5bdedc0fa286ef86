// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![forbid(unsafe_code)]
#![doc = r"Navigation layer for quadnav.

This crate provides:
- `Graph`, an arena of vertices addressed by `VertexId`, undirected or
  directed, with coordinate-carrying waypoints and an explicit dedup pass.
- Shortest-path engines behind the `Pathfinder` trait: `Dijkstra`, `Floyd`
  (with incremental updates), `AStar` and the any-angle `ThetaStar`.
- `build_graph_on_quadtree`, which samples waypoints from quadtree nodes and
  around obstacles and links them by line of sight.
- `QuadPathfinder`, which answers point-to-point queries by splicing the
  endpoints into the prebuilt graph.
- `NavConfig`, the JSON configuration for all of the above.

An unreachable goal is an empty path, never an error.
"]

/// Waypoint graph construction.
pub mod builder;
/// Navigation configuration.
pub mod config;
/// Debug drawing of graphs.
pub mod debug;
/// Point-to-point routing.
pub mod facade;
/// Weighted graph.
pub mod graph;
/// Shortest-path engines.
pub mod pathfinding;
/// Addressable priority queue.
pub mod queue;
/// Line-of-sight oracles.
pub mod sight;

mod error;

pub use builder::{build_graph_on_quadtree, obstacle_samples, BuildOptions, NavGraph, VertexMode};
pub use config::{ConfigError, NavConfig};
pub use debug::{graph_figure, graph_sprite};
pub use error::{GraphError, PathError};
pub use facade::{polyline_length, Algorithm, QuadPathfinder};
pub use graph::{Edge, Graph, Vertex, VertexId};
pub use pathfinding::{path_cost, path_weight, AStar, Dijkstra, Floyd, FloydSnapshot, Pathfinder, ThetaStar};
pub use queue::PriorityQueue;
pub use sight::{LineOfSight, ObstacleSight};
