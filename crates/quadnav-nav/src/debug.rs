// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Drawable views of a graph for debug overlays.

use quadnav_geom::{FigArray, Figure, Line};
use quadnav_space::Sprite;

use crate::error::GraphError;
use crate::graph::Graph;

/// Points for every vertex followed by lines for every edge.
///
/// Edges whose endpoints coincide are drawn as points.
pub fn graph_figure(graph: &Graph) -> Result<FigArray, GraphError> {
    let mut figure = FigArray::new();
    for v in graph.vertex_ids() {
        figure.push(graph.require_coords(v)?);
    }
    for edge in graph.edges() {
        let a = graph.require_coords(edge.v1)?;
        let b = graph.require_coords(edge.v2)?;
        match Line::new(a, b) {
            Ok(line) => figure.push(line),
            Err(_) => figure.push(a),
        }
    }
    Ok(figure)
}

/// [`graph_figure`] wrapped in a decorative sprite (no collision shape), so
/// it can be drawn without affecting the simulation.
pub fn graph_sprite(graph: &Graph) -> Result<Sprite, GraphError> {
    Ok(Sprite::decorative(Figure::FigArray(graph_figure(graph)?)))
}
