// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use crate::predicates;
use crate::scalar::{sign, EPS};
use crate::{GeomError, Point};

/// A filled triangle.
///
/// May be degenerate (zero area). Degenerate triangles behave as the union
/// of their edges: they still intersect and contain points on those edges.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Triangle {
    points: [Point; 3],
}

impl Triangle {
    /// Builds a triangle from three vertices in any winding.
    pub fn new(a: Point, b: Point, c: Point) -> Self {
        Self { points: [a, b, c] }
    }

    /// Vertices in construction order.
    pub fn points(&self) -> [Point; 3] {
        self.points
    }

    /// Signed area; positive for counter-clockwise winding.
    pub fn signed_area(&self) -> f64 {
        predicates::signed_area2(&self.points) / 2.0
    }

    /// Absolute area.
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// `true` when the vertices are collinear within `EPS`.
    pub fn is_degenerate(&self) -> bool {
        sign(self.signed_area()) == 0
    }

    /// Edges as raw point pairs `(a, b)`, `(b, c)`, `(c, a)`.
    ///
    /// Raw pairs rather than `Line`s so a collapsed edge is still reported.
    pub fn edges(&self) -> [(Point, Point); 3] {
        let [a, b, c] = self.points;
        [(a, b), (b, c), (c, a)]
    }

    /// Closed point containment with an `EPS` margin.
    pub fn contains_point(&self, p: Point) -> bool {
        predicates::convex_contains_point(&self.points, p)
    }

    /// Shortest distance from `p` to the boundary.
    pub fn boundary_distance(&self, p: Point) -> f64 {
        self.edges()
            .iter()
            .map(|&(a, b)| predicates::point_segment_distance(p, a, b))
            .fold(f64::INFINITY, f64::min)
    }

    /// Shifts every vertex by `delta`.
    pub fn translate(&mut self, delta: Point) {
        for p in &mut self.points {
            *p += delta;
        }
    }

    /// Rotates every vertex about `center`.
    pub fn rotate(&mut self, center: Point, angle: f64) {
        for p in &mut self.points {
            *p = p.rotated(center, angle);
        }
    }

    /// Replaces vertex `index` (0..3).
    ///
    /// # Errors
    /// [`GeomError::IndexOutOfRange`] for indices past 2.
    pub fn set_point(&mut self, index: usize, point: Point) -> Result<(), GeomError> {
        let slot = self
            .points
            .get_mut(index)
            .ok_or(GeomError::IndexOutOfRange { index, len: 3 })?;
        *slot = point;
        Ok(())
    }
}

impl core::fmt::Display for Triangle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let [a, b, c] = self.points;
        write!(f, "Triangle({a}, {b}, {c})")
    }
}
