// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(dead_code)]
//! Shared shape strategies for the geometry property tests.

use proptest::prelude::*;
use quadnav_geom::{Circle, Figure, Line, Path, Point, Rectangle, Triangle};

/// Seed shared by the pinned property runners.
pub const SEED_BYTES: [u8; 32] = [
    0x51, 0xad, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0,
];

pub fn coord() -> impl Strategy<Value = f64> {
    -20.0f64..20.0
}

pub fn point() -> impl Strategy<Value = Point> {
    (coord(), coord()).prop_map(|(x, y)| Point::new(x, y))
}

pub fn line() -> impl Strategy<Value = Line> {
    (point(), point()).prop_filter_map("distinct endpoints", |(a, b)| Line::new(a, b).ok())
}

pub fn circle() -> impl Strategy<Value = Circle> {
    (point(), 0.0f64..8.0).prop_filter_map("valid circle", |(c, r)| Circle::new(c, r).ok())
}

pub fn triangle() -> impl Strategy<Value = Triangle> {
    (point(), point(), point()).prop_map(|(a, b, c)| Triangle::new(a, b, c))
}

pub fn rectangle() -> impl Strategy<Value = Rectangle> {
    (point(), point()).prop_filter_map("finite corners", |(a, b)| {
        Rectangle::from_corners(a, b).ok()
    })
}

/// The five primitive variants.
pub fn primitive() -> impl Strategy<Value = Figure> {
    prop_oneof![
        point().prop_map(Figure::Point),
        line().prop_map(Figure::Line),
        circle().prop_map(Figure::Circle),
        triangle().prop_map(Figure::Triangle),
        rectangle().prop_map(Figure::Rectangle),
    ]
}

/// Primitives plus short polylines.
pub fn figure() -> impl Strategy<Value = Figure> {
    prop_oneof![
        4 => primitive(),
        1 => prop::collection::vec(point(), 0..5).prop_map(|pts| Figure::Path(Path::new(pts))),
    ]
}

pub fn same_shape(a: &Figure, b: &Figure) -> bool {
    let (va, vb) = (a.vertexes(8), b.vertexes(8));
    va.len() == vb.len() && va.iter().zip(&vb).all(|(p, q)| p.approx_eq(*q))
}
