// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use crate::scalar::EPS;
use crate::{GeomError, Point};

/// An axis-aligned, filled rectangle.
///
/// Invariant: `bottom_left.x <= top_right.x` and
/// `bottom_left.y <= top_right.y`. Zero width or height is allowed.
/// Rectangles cannot be rotated; `Figure::rotate` reports
/// [`GeomError::Unsupported`] instead of producing a non-axis-aligned shape.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "[Point; 2]", into = "[Point; 2]")
)]
pub struct Rectangle {
    bottom_left: Point,
    top_right: Point,
}

impl Rectangle {
    /// Builds a rectangle from already-ordered corners.
    ///
    /// # Errors
    /// [`GeomError::InvalidRectangle`] if the corners are inverted on either
    /// axis, [`GeomError::NonFinite`] on NaN/infinite coordinates.
    pub fn new(bottom_left: Point, top_right: Point) -> Result<Self, GeomError> {
        if !bottom_left.is_finite() || !top_right.is_finite() {
            return Err(GeomError::NonFinite("rectangle"));
        }
        if bottom_left.x > top_right.x || bottom_left.y > top_right.y {
            return Err(GeomError::InvalidRectangle);
        }
        Ok(Self {
            bottom_left,
            top_right,
        })
    }

    /// Builds the rectangle spanned by two opposite corners in any order.
    ///
    /// # Errors
    /// [`GeomError::NonFinite`] on NaN/infinite coordinates.
    pub fn from_corners(a: Point, b: Point) -> Result<Self, GeomError> {
        Self::new(
            Point::new(a.x.min(b.x), a.y.min(b.y)),
            Point::new(a.x.max(b.x), a.y.max(b.y)),
        )
    }

    /// Square with bottom-left corner `origin` and side `size`.
    ///
    /// # Errors
    /// [`GeomError::InvalidRectangle`] for a negative size.
    pub fn square(origin: Point, size: f64) -> Result<Self, GeomError> {
        Self::new(origin, origin + Point::new(size, size))
    }

    /// Bottom-left (minimum) corner.
    pub fn bottom_left(&self) -> Point {
        self.bottom_left
    }

    /// Top-right (maximum) corner.
    pub fn top_right(&self) -> Point {
        self.top_right
    }

    /// Extent along x.
    pub fn width(&self) -> f64 {
        self.top_right.x - self.bottom_left.x
    }

    /// Extent along y.
    pub fn height(&self) -> f64 {
        self.top_right.y - self.bottom_left.y
    }

    /// Centre point.
    pub fn center(&self) -> Point {
        (self.bottom_left + self.top_right) / 2.0
    }

    /// Corners: bottom-left, top-left, top-right, bottom-right.
    pub fn corners(&self) -> [Point; 4] {
        let (bl, tr) = (self.bottom_left, self.top_right);
        [bl, Point::new(bl.x, tr.y), tr, Point::new(tr.x, bl.y)]
    }

    /// Midpoints of the left, top, right and bottom edges.
    pub fn edge_midpoints(&self) -> [Point; 4] {
        let c = self.corners();
        [
            (c[0] + c[1]) / 2.0,
            (c[1] + c[2]) / 2.0,
            (c[2] + c[3]) / 2.0,
            (c[3] + c[0]) / 2.0,
        ]
    }

    /// The four equal quadrants in bottom-left, bottom-right, top-left,
    /// top-right order.
    pub fn quadrants(&self) -> [Self; 4] {
        let (bl, tr, c) = (self.bottom_left, self.top_right, self.center());
        [
            Self { bottom_left: bl, top_right: c },
            Self {
                bottom_left: Point::new(c.x, bl.y),
                top_right: Point::new(tr.x, c.y),
            },
            Self {
                bottom_left: Point::new(bl.x, c.y),
                top_right: Point::new(c.x, tr.y),
            },
            Self { bottom_left: c, top_right: tr },
        ]
    }

    /// Closed point containment, widened by `EPS`.
    pub fn contains_point(&self, p: Point) -> bool {
        self.bottom_left.x - EPS <= p.x
            && p.x <= self.top_right.x + EPS
            && self.bottom_left.y - EPS <= p.y
            && p.y <= self.top_right.y + EPS
    }

    /// `true` if the disk fits inside (EPS-widened).
    pub fn contains_disk(&self, center: Point, radius: f64) -> bool {
        self.bottom_left.x - EPS <= center.x - radius
            && center.x + radius <= self.top_right.x + EPS
            && self.bottom_left.y - EPS <= center.y - radius
            && center.y + radius <= self.top_right.y + EPS
    }

    /// `true` if `other` lies entirely inside `self` (EPS-widened).
    pub fn contains_rect(&self, other: &Self) -> bool {
        self.contains_point(other.bottom_left) && self.contains_point(other.top_right)
    }

    /// Inclusive overlap test; touching edges count.
    pub fn overlaps(&self, other: &Self) -> bool {
        !(self.top_right.x + EPS < other.bottom_left.x
            || other.top_right.x + EPS < self.bottom_left.x
            || self.top_right.y + EPS < other.bottom_left.y
            || other.top_right.y + EPS < self.bottom_left.y)
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            bottom_left: Point::new(
                self.bottom_left.x.min(other.bottom_left.x),
                self.bottom_left.y.min(other.bottom_left.y),
            ),
            top_right: Point::new(
                self.top_right.x.max(other.top_right.x),
                self.top_right.y.max(other.top_right.y),
            ),
        }
    }

    /// Shifts both corners by `delta`.
    pub fn translate(&mut self, delta: Point) {
        self.bottom_left += delta;
        self.top_right += delta;
    }
}

impl TryFrom<[Point; 2]> for Rectangle {
    type Error = GeomError;

    fn try_from([bl, tr]: [Point; 2]) -> Result<Self, Self::Error> {
        Self::new(bl, tr)
    }
}

impl From<Rectangle> for [Point; 2] {
    fn from(r: Rectangle) -> Self {
        [r.bottom_left, r.top_right]
    }
}

impl core::fmt::Display for Rectangle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Rectangle({} .. {})", self.bottom_left, self.top_right)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn inverted_corners_are_rejected_but_normalizable() {
        let a = Point::new(4.0, 1.0);
        let b = Point::new(1.0, 3.0);
        assert_eq!(Rectangle::new(a, b), Err(GeomError::InvalidRectangle));
        let r = Rectangle::from_corners(a, b).unwrap();
        assert_eq!(r.bottom_left(), Point::new(1.0, 1.0));
        assert_eq!(r.top_right(), Point::new(4.0, 3.0));
    }

    #[test]
    fn quadrants_tile_the_parent() {
        let r = Rectangle::square(Point::ORIGIN, 8.0).unwrap();
        let [bl, br, tl, tr] = r.quadrants();
        assert_eq!(bl.top_right(), Point::new(4.0, 4.0));
        assert_eq!(br.bottom_left(), Point::new(4.0, 0.0));
        assert_eq!(tl.bottom_left(), Point::new(0.0, 4.0));
        assert_eq!(tr.top_right(), Point::new(8.0, 8.0));
        for q in r.quadrants() {
            assert!(r.contains_rect(&q));
            assert!((q.width() - 4.0).abs() < EPS);
        }
    }

    #[test]
    fn corners_start_bottom_left_and_turn_through_top() {
        let r = Rectangle::new(Point::ORIGIN, Point::new(2.0, 1.0)).unwrap();
        assert_eq!(
            r.corners(),
            [
                Point::new(0.0, 0.0),
                Point::new(0.0, 1.0),
                Point::new(2.0, 1.0),
                Point::new(2.0, 0.0)
            ]
        );
        assert_eq!(r.edge_midpoints()[1], Point::new(1.0, 1.0));
    }

    #[test]
    fn touching_rectangles_overlap() {
        let a = Rectangle::square(Point::ORIGIN, 1.0).unwrap();
        let b = Rectangle::square(Point::new(1.0, 0.0), 1.0).unwrap();
        let c = Rectangle::square(Point::new(1.1, 0.0), 1.0).unwrap();
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }
}
