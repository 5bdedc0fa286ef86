// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![forbid(unsafe_code)]
#![doc = r"Geometry kernel for quadnav.

This crate provides:
- Tolerance helpers (`EPS`, `is_close`, `sign`) and a snapping key for points.
- Primitive shapes: `Point`, `Line`, `Circle`, `Triangle`, `Rectangle`,
  `Path`, and the heterogeneous `FigArray`.
- `Figure`, a closed enum over every shape with exhaustive pairwise
  `has_intersect` / `contains` dispatch.

Design notes:
- Shapes are solid. Circles are disks; triangles and rectangles are filled.
- Every comparison goes through `EPS`. Touching counts as intersecting.
- `f64` throughout; no ambient RNG; all results are deterministic.
"]

/// Tolerance helpers shared by every predicate.
pub mod scalar;
/// Raw point-level predicates (orientation, segment tests, distances).
pub mod predicates;
/// Foundational shape types.
pub mod types;

mod error;
mod figure;

pub use error::GeomError;
pub use figure::Figure;
pub use scalar::{is_close, sign, GridKey, EPS};
pub use types::circle::Circle;
pub use types::fig_array::FigArray;
pub use types::line::Line;
pub use types::path::Path;
pub use types::point::Point;
pub use types::rectangle::Rectangle;
pub use types::triangle::Triangle;
