// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use crate::scalar::{is_close, GridKey};

/// A 2D point or vector.
///
/// Value type. Equality is tolerance-based through [`Point::approx_eq`];
/// the derived `PartialEq` is exact and only meant for tests and
/// serialization round trips. Use [`Point::grid_key`] when a point must act
/// as a map key.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// The origin.
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Creates a point from components.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns `(x, y)`.
    pub fn coords(self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// `true` when both coordinates are finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Vector magnitude.
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Dot product.
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product.
    pub fn cross(self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Signed angle from `self` to `other` in radians, in `(-π, π]`.
    pub fn angle_to(self, other: Self) -> f64 {
        self.cross(other).atan2(self.dot(other))
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Self) -> f64 {
        (other - self).length()
    }

    /// Unit vector in the same direction, or `None` for a zero vector.
    pub fn normalized(self) -> Option<Self> {
        let len = self.length();
        if is_close(len, 0.0) {
            None
        } else {
            Some(self / len)
        }
    }

    /// Tolerance equality: both coordinates within `EPS`.
    pub fn approx_eq(self, other: Self) -> bool {
        is_close(self.x, other.x) && is_close(self.y, other.y)
    }

    /// Rotates `self` about `center`.
    ///
    /// Uses the matrix `[[cos θ, sin θ], [-sin θ, cos θ]]`, so positive
    /// angles turn clockwise in a y-up frame (counter-clockwise on a y-down
    /// display).
    pub fn rotated(self, center: Self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        let d = self - center;
        Self::new(
            center.x + cos * d.x + sin * d.y,
            center.y - sin * d.x + cos * d.y,
        )
    }

    /// Snapped key for hashing; see [`GridKey`].
    pub fn grid_key(self) -> GridKey {
        GridKey::from_coords(self.x, self.y)
    }

    /// Arithmetic mean of `points`, or `None` when empty.
    pub fn mean<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        let mut sum = Self::ORIGIN;
        let mut n = 0usize;
        for p in points {
            sum += p;
            n += 1;
        }
        (n > 0).then(|| sum / n as f64)
    }
}

impl core::fmt::Display for Point {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "[{:.3}, {:.3}]", self.x, self.y)
    }
}

impl Add for Point {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Point {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Point {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Point {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::FRAC_PI_2;

    #[test]
    fn rotation_is_clockwise_positive() {
        let p = Point::new(1.0, 0.0).rotated(Point::ORIGIN, FRAC_PI_2);
        assert!(p.approx_eq(Point::new(0.0, -1.0)), "got {p}");
    }

    #[test]
    fn angle_to_is_signed() {
        let x = Point::new(1.0, 0.0);
        let y = Point::new(0.0, 1.0);
        assert!((x.angle_to(y) - FRAC_PI_2).abs() < 1e-12);
        assert!((y.angle_to(x) + FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn mean_of_nothing_is_none() {
        assert!(Point::mean(core::iter::empty()).is_none());
        let m = Point::mean([Point::new(0.0, 0.0), Point::new(2.0, 4.0)]);
        assert_eq!(m, Some(Point::new(1.0, 2.0)));
    }
}
