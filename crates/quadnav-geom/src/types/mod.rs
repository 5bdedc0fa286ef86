// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Primitive shape types.
//!
//! Invariants enforced at construction:
//! - `Line` endpoints are distinct (further apart than `EPS`).
//! - `Circle` radius is finite and non-negative.
//! - `Rectangle` corners satisfy `bottom_left <= top_right` componentwise.
//!
//! `Triangle` may be degenerate; this is detectable (`is_degenerate`) but
//! never rejected.

#[doc = "Circles (solid disks)."]
pub mod circle;
#[doc = "Heterogeneous shape collections."]
pub mod fig_array;
#[doc = "Line segments."]
pub mod line;
#[doc = "Polylines used as routes."]
pub mod path;
#[doc = "Points and 2D vectors."]
pub mod point;
#[doc = "Axis-aligned rectangles."]
pub mod rectangle;
#[doc = "Filled triangles."]
pub mod triangle;
