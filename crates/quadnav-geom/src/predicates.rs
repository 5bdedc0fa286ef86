// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Point-level predicates.
//!
//! These work on bare `Point`s instead of shape types so degenerate inputs
//! (zero-length edges of a collapsed triangle, single-point paths) stay
//! usable without constructing an invalid `Line`.

use crate::scalar::{is_close, sign, EPS};
use crate::Point;

/// Turn direction of an ordered point triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// The three points lie on one line (within `EPS`).
    Collinear,
    /// `p → q → r` turns clockwise.
    Clockwise,
    /// `p → q → r` turns counter-clockwise.
    CounterClockwise,
}

/// Orientation of `p → q → r`.
pub fn orientation(p: Point, q: Point, r: Point) -> Orientation {
    let val = (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y);
    if is_close(val, 0.0) {
        Orientation::Collinear
    } else if val > 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::CounterClockwise
    }
}

/// `true` if `q` lies inside the EPS-widened bounding box of segment `pr`.
///
/// Only meaningful for points already known to be collinear with `pr`.
pub fn in_segment_box(p: Point, q: Point, r: Point) -> bool {
    p.x.min(r.x) - EPS <= q.x
        && q.x <= p.x.max(r.x) + EPS
        && p.y.min(r.y) - EPS <= q.y
        && q.y <= p.y.max(r.y) + EPS
}

/// Closed segment intersection with collinear-overlap handling.
///
/// Degenerate segments (coincident endpoints) behave as points.
pub fn segments_intersect(p1: Point, q1: Point, p2: Point, q2: Point) -> bool {
    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    (o1 == Orientation::Collinear && in_segment_box(p1, p2, q1))
        || (o2 == Orientation::Collinear && in_segment_box(p1, q2, q1))
        || (o3 == Orientation::Collinear && in_segment_box(p2, p1, q2))
        || (o4 == Orientation::Collinear && in_segment_box(p2, q1, q2))
}

/// Distance from `p` to the closed segment `ab`.
pub fn point_segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.dot(ab);
    if len_sq < EPS * EPS {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Signed distance from `p` to the infinite line through `a → b`.
///
/// Positive on the left of the direction of travel, negative on the right,
/// `0.0` when `a` and `b` coincide.
pub fn signed_line_distance(p: Point, a: Point, b: Point) -> f64 {
    let dir = b - a;
    let len = dir.length();
    if len > EPS {
        dir.cross(p - a) / len
    } else {
        0.0
    }
}

/// `true` if `p` is within `EPS` of the closed segment `ab`.
pub fn point_on_segment(p: Point, a: Point, b: Point) -> bool {
    point_segment_distance(p, a, b) <= EPS
}

/// Twice the signed area of a closed polygon (positive when counter-clockwise).
pub fn signed_area2(poly: &[Point]) -> f64 {
    edges(poly).map(|(a, b)| a.cross(b)).sum()
}

/// Consecutive edge pairs of a closed polygon, wrapping last → first.
pub fn edges(poly: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    let n = poly.len();
    (0..n).map(move |i| (poly[i], poly[(i + 1) % n]))
}

/// Signed distances from `p` to every edge of a convex polygon, oriented so
/// that positive values are inside.
///
/// Returns `None` for a degenerate (zero-area) polygon.
pub fn inward_edge_distances(poly: &[Point], p: Point) -> Option<Vec<f64>> {
    let orient = sign(signed_area2(poly));
    if orient == 0 {
        return None;
    }
    let flip = f64::from(orient);
    Some(
        edges(poly)
            .map(|(a, b)| flip * signed_line_distance(p, a, b))
            .collect(),
    )
}

/// Closed containment of `p` in a convex polygon, EPS-widened.
///
/// Degenerate polygons contain exactly the points on their edges.
pub fn convex_contains_point(poly: &[Point], p: Point) -> bool {
    match inward_edge_distances(poly, p) {
        Some(ds) => ds.iter().all(|&d| d >= -EPS),
        None => edges(poly).any(|(a, b)| point_on_segment(p, a, b)),
    }
}

/// Closed overlap between segment `pq` and a convex polygon.
pub fn segment_intersects_convex(p: Point, q: Point, poly: &[Point]) -> bool {
    convex_contains_point(poly, p)
        || convex_contains_point(poly, q)
        || edges(poly).any(|(a, b)| segments_intersect(p, q, a, b))
}

/// Overlap between a disk and a convex polygon.
///
/// The centre-inside case is settled by per-edge signed distances; otherwise
/// the disk must reach at least one edge segment (this covers a disk that
/// straddles an edge as well as one that only swallows a corner).
pub fn disk_intersects_convex(center: Point, radius: f64, poly: &[Point]) -> bool {
    if let Some(ds) = inward_edge_distances(poly, center) {
        if ds.iter().all(|&d| d >= -EPS) {
            return true;
        }
    }
    edges(poly).any(|(a, b)| point_segment_distance(center, a, b) <= radius + EPS)
}

/// `true` if the disk lies inside the convex polygon (EPS-widened).
pub fn convex_contains_disk(poly: &[Point], center: Point, radius: f64) -> bool {
    match inward_edge_distances(poly, center) {
        Some(ds) => ds.iter().all(|&d| d >= radius - EPS),
        None => radius < EPS && convex_contains_point(poly, center),
    }
}

/// Closed overlap of two convex polygons.
pub fn convex_polygons_intersect(a: &[Point], b: &[Point]) -> bool {
    edges(a).any(|(p, q)| edges(b).any(|(r, s)| segments_intersect(p, q, r, s)))
        || a.iter().any(|&p| convex_contains_point(b, p))
        || b.iter().any(|&p| convex_contains_point(a, p))
}
