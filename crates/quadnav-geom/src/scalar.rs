// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Tolerance policy.
//!
//! No predicate in this crate compares floats with raw `==` or `<`; they go
//! through [`is_close`] or [`sign`] so the EPS margin is applied uniformly.

/// Global tolerance for coordinate comparisons.
pub const EPS: f64 = 1e-5;

/// Returns `true` when `a` and `b` differ by less than `EPS`.
#[inline]
pub fn is_close(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}

/// Returns `-1`, `0` or `+1` with an `EPS` dead zone around zero.
#[inline]
pub fn sign(a: f64) -> i8 {
    if a > EPS {
        1
    } else if a < -EPS {
        -1
    } else {
        0
    }
}

/// Quantized point key used for hashing and ordered lookups.
///
/// Each coordinate is snapped to `floor(c / EPS)`. Two points that are
/// `approx_eq` land in the same cell or in one of the eight surrounding
/// cells, so lookups must scan [`GridKey::neighborhood`] and confirm with
/// `Point::approx_eq`. Equality of keys alone is never used as point
/// equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GridKey {
    /// Snapped X cell.
    pub x: i64,
    /// Snapped Y cell.
    pub y: i64,
}

impl GridKey {
    /// Snaps raw coordinates to a key.
    pub fn from_coords(x: f64, y: f64) -> Self {
        Self {
            x: snap(x),
            y: snap(y),
        }
    }

    /// The 3×3 block of keys centred on `self` (including `self`).
    pub fn neighborhood(self) -> impl Iterator<Item = Self> {
        (-1..=1).flat_map(move |dx| {
            (-1..=1).map(move |dy| Self {
                x: self.x.saturating_add(dx),
                y: self.y.saturating_add(dy),
            })
        })
    }
}

fn snap(c: f64) -> i64 {
    // `as` saturates for out-of-range floats and maps NaN to 0.
    (c / EPS).floor() as i64
}
