// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use crate::{GeomError, Point};

/// An open polyline, typically a route returned by a pathfinder.
///
/// Consecutive points may coincide; such zero-length pieces act as points
/// in intersection tests. The route cursor is positional: `start_point` is
/// where the follower currently is and `current_point` is its next target.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    points: Vec<Point>,
}

impl Path {
    /// Builds a path through `points` in order.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Points in order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// `true` when the path has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consecutive point pairs.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    /// Total polyline length.
    pub fn length(&self) -> f64 {
        self.segments().map(|(a, b)| a.distance(b)).sum()
    }

    /// Inserts `point` at `index`, or appends when `index` is `None`.
    ///
    /// # Errors
    /// [`GeomError::IndexOutOfRange`] when `index > len`.
    pub fn add_point(&mut self, point: Point, index: Option<usize>) -> Result<(), GeomError> {
        let len = self.points.len();
        let index = index.unwrap_or(len);
        if index > len {
            return Err(GeomError::IndexOutOfRange { index, len });
        }
        self.points.insert(index, point);
        Ok(())
    }

    /// Removes and returns the point at `index`.
    ///
    /// # Errors
    /// [`GeomError::IndexOutOfRange`] when `index >= len`.
    pub fn remove_point(&mut self, index: usize) -> Result<Point, GeomError> {
        let len = self.points.len();
        if index >= len {
            return Err(GeomError::IndexOutOfRange { index, len });
        }
        Ok(self.points.remove(index))
    }

    /// Replaces the point at `index`.
    ///
    /// # Errors
    /// [`GeomError::IndexOutOfRange`] when `index >= len`.
    pub fn update_point(&mut self, index: usize, point: Point) -> Result<(), GeomError> {
        let len = self.points.len();
        let slot = self
            .points
            .get_mut(index)
            .ok_or(GeomError::IndexOutOfRange { index, len })?;
        *slot = point;
        Ok(())
    }

    /// First point, if any.
    pub fn start_point(&self) -> Option<Point> {
        self.points.first().copied()
    }

    /// Next target after the start, if the path has at least two points.
    pub fn current_point(&self) -> Option<Point> {
        self.points.get(1).copied()
    }

    /// Drops the start (when a target remains) and returns the new target.
    pub fn advance(&mut self) -> Option<Point> {
        if self.points.len() >= 2 {
            self.points.remove(0);
        }
        self.current_point()
    }

    /// Shifts every point by `delta`.
    pub fn translate(&mut self, delta: Point) {
        for p in &mut self.points {
            *p += delta;
        }
    }

    /// Rotates every point about `center`.
    pub fn rotate(&mut self, center: Point, angle: f64) {
        for p in &mut self.points {
            *p = p.rotated(center, angle);
        }
    }
}

impl FromIterator<Point> for Path {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
