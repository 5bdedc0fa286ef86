// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use crate::predicates;
use crate::scalar::EPS;
use crate::{GeomError, Point};

/// A line segment between two distinct points.
///
/// Invariant: `p1` and `p2` are further apart than `EPS`. Every mutator
/// re-checks it, so a `Line` value is never degenerate.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "[Point; 2]", into = "[Point; 2]")
)]
pub struct Line {
    p1: Point,
    p2: Point,
}

impl Line {
    /// Builds a segment from `p1` to `p2`.
    ///
    /// # Errors
    /// [`GeomError::DegenerateLine`] if the endpoints coincide within `EPS`,
    /// [`GeomError::NonFinite`] on NaN/infinite coordinates.
    pub fn new(p1: Point, p2: Point) -> Result<Self, GeomError> {
        if !p1.is_finite() || !p2.is_finite() {
            return Err(GeomError::NonFinite("line"));
        }
        if p1.distance(p2) < EPS {
            return Err(GeomError::DegenerateLine);
        }
        Ok(Self { p1, p2 })
    }

    /// Start point.
    pub fn p1(&self) -> Point {
        self.p1
    }

    /// End point.
    pub fn p2(&self) -> Point {
        self.p2
    }

    /// Both endpoints in order.
    pub fn points(&self) -> [Point; 2] {
        [self.p1, self.p2]
    }

    /// Vector from `p1` to `p2`.
    pub fn direction(&self) -> Point {
        self.p2 - self.p1
    }

    /// Segment length.
    pub fn length(&self) -> f64 {
        self.p1.distance(self.p2)
    }

    /// Midpoint of the segment.
    pub fn midpoint(&self) -> Point {
        (self.p1 + self.p2) / 2.0
    }

    /// Signed perpendicular distance from `p` to the supporting line.
    ///
    /// Positive when `p` is left of `p1 → p2`.
    pub fn distance(&self, p: Point) -> f64 {
        predicates::signed_line_distance(p, self.p1, self.p2)
    }

    /// Unsigned distance from `p` to the closed segment.
    pub fn segment_distance(&self, p: Point) -> f64 {
        predicates::point_segment_distance(p, self.p1, self.p2)
    }

    /// Closed segment/segment intersection, collinear overlap included.
    pub fn has_intersect(&self, other: &Self) -> bool {
        predicates::segments_intersect(self.p1, self.p2, other.p1, other.p2)
    }

    /// Shifts both endpoints by `delta`.
    pub fn translate(&mut self, delta: Point) {
        self.p1 += delta;
        self.p2 += delta;
    }

    /// Rotates both endpoints about `center`; see [`Point::rotated`].
    pub fn rotate(&mut self, center: Point, angle: f64) {
        self.p1 = self.p1.rotated(center, angle);
        self.p2 = self.p2.rotated(center, angle);
    }

    /// Replaces endpoint `index` (0 or 1).
    ///
    /// # Errors
    /// [`GeomError::IndexOutOfRange`] for other indices and
    /// [`GeomError::DegenerateLine`] if the result would collapse. On error
    /// the segment is unchanged.
    pub fn set_point(&mut self, index: usize, point: Point) -> Result<(), GeomError> {
        let next = match index {
            0 => Self::new(point, self.p2)?,
            1 => Self::new(self.p1, point)?,
            _ => return Err(GeomError::IndexOutOfRange { index, len: 2 }),
        };
        *self = next;
        Ok(())
    }
}

impl TryFrom<[Point; 2]> for Line {
    type Error = GeomError;

    fn try_from([p1, p2]: [Point; 2]) -> Result<Self, Self::Error> {
        Self::new(p1, p2)
    }
}

impl From<Line> for [Point; 2] {
    fn from(line: Line) -> Self {
        line.points()
    }
}

impl core::fmt::Display for Line {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Line({} -> {})", self.p1, self.p2)
    }
}
