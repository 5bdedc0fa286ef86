// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Errors for the sprite store, quadtree and world.

use quadnav_geom::GeomError;
use thiserror::Error;

use crate::sprite::SpriteId;

/// Errors raised by the spatial layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpaceError {
    /// The sprite handle does not resolve in the store.
    #[error("unknown sprite {0}")]
    UnknownSprite(SpriteId),
    /// The sprite's collision shape does not fit inside the root square.
    #[error("sprite {0} does not fit inside the world bounds")]
    OutsideRoot(SpriteId),
    /// The root region is not a square with positive side.
    #[error("quadtree root must be a square with positive side")]
    InvalidRoot,
    /// A shape operation failed (for example rotating a rectangle).
    #[error(transparent)]
    Geometry(#[from] GeomError),
    /// The tree self-check found a broken structural invariant.
    #[error("quadtree invariant violated: {0}")]
    InvariantViolation(String),
}
