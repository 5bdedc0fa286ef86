// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![forbid(unsafe_code)]
#![doc = r"Spatial layer for quadnav.

This crate provides:
- `Sprite` and its single owner `SpriteStore`, addressed by `SpriteId`.
- `QuadTree`, an arena-backed dynamic index that stores each sprite at the
  shallowest node fully containing its collision shape, answers broad-phase
  queries, and finds neighbouring nodes across branch boundaries.
- `World`, which advances agents and sprites in discrete ticks.

Everything is single-threaded and deterministic: ordered maps only, no
interior mutability, no ambient randomness.
"]

mod error;
/// Dynamic quadtree index.
pub mod quadtree;
/// Sprites and the sprite store.
pub mod sprite;
/// Simulation world and agents.
pub mod world;

pub use error::SpaceError;
pub use quadtree::{Direction, NodeId, QuadNode, QuadTree, QuadTreeConfig, Quadrant};
pub use sprite::{Sprite, SpriteId, SpriteStore};
pub use world::{Agent, TickReport, World};
