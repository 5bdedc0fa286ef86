// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::f64::consts::TAU;

use crate::{GeomError, Point};

/// A solid disk.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "CircleRepr", into = "CircleRepr")
)]
pub struct Circle {
    center: Point,
    radius: f64,
}

impl Circle {
    /// Builds a circle.
    ///
    /// # Errors
    /// [`GeomError::NegativeRadius`] when `radius < 0`, and
    /// [`GeomError::NonFinite`] on NaN/infinite inputs.
    pub fn new(center: Point, radius: f64) -> Result<Self, GeomError> {
        if !center.is_finite() || !radius.is_finite() {
            return Err(GeomError::NonFinite("circle"));
        }
        if radius < 0.0 {
            return Err(GeomError::NegativeRadius);
        }
        Ok(Self { center, radius })
    }

    /// Centre point.
    pub fn center(&self) -> Point {
        self.center
    }

    /// Radius (always `>= 0`).
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// `quality` evenly spaced boundary samples, starting at angle 0 and
    /// going counter-clockwise.
    pub fn vertexes(&self, quality: usize) -> Vec<Point> {
        (0..quality)
            .map(|i| {
                let a = TAU * i as f64 / quality as f64;
                self.center + Point::new(a.cos(), a.sin()) * self.radius
            })
            .collect()
    }

    /// Shifts the centre by `delta`.
    pub fn translate(&mut self, delta: Point) {
        self.center += delta;
    }

    /// Rotates the centre about `pivot`.
    pub fn rotate(&mut self, pivot: Point, angle: f64) {
        self.center = self.center.rotated(pivot, angle);
    }
}

/// Wire shape for serde so deserialization goes through [`Circle::new`].
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct CircleRepr {
    center: Point,
    radius: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<CircleRepr> for Circle {
    type Error = GeomError;

    fn try_from(repr: CircleRepr) -> Result<Self, Self::Error> {
        Self::new(repr.center, repr.radius)
    }
}

#[cfg(feature = "serde")]
impl From<Circle> for CircleRepr {
    fn from(c: Circle) -> Self {
        Self {
            center: c.center,
            radius: c.radius,
        }
    }
}
