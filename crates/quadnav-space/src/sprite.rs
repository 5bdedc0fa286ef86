// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Sprites and their owning store.
//!
//! A [`Sprite`] pairs a render mesh with an optional collision shape and
//! carries motion queued by agents until the next tick applies it. Sprites
//! are owned by exactly one [`SpriteStore`]; everything else (the quadtree,
//! renderers, agents) refers to them through the `Copy` handle
//! [`SpriteId`]. `Sprite` deliberately implements neither `Clone` nor
//! `Copy`, so collision authority cannot be duplicated.

use std::collections::BTreeMap;

use quadnav_geom::{is_close, Figure, GeomError, Point};

/// Stable handle to a sprite in a [`SpriteStore`].
///
/// Handles are allocated monotonically and never reused within a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpriteId(u64);

impl SpriteId {
    /// Raw handle value.
    pub fn index(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for SpriteId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A simulated entity: mesh, collision shape, and pending motion.
#[derive(Debug)]
pub struct Sprite {
    mesh: Figure,
    collision: Option<Figure>,
    mass_center: Point,
    is_static: bool,
    blocked: bool,
    movement: Point,
    rotation: f64,
}

impl Sprite {
    /// Dynamic sprite with separate mesh and collision shapes.
    pub fn new(mesh: Figure, collision: Option<Figure>) -> Self {
        let mass_center = center_of(&mesh, collision.as_ref());
        Self {
            mesh,
            collision,
            mass_center,
            is_static: false,
            blocked: false,
            movement: Point::ORIGIN,
            rotation: 0.0,
        }
    }

    /// Static obstacle whose mesh is also its collision shape.
    pub fn obstacle(shape: Figure) -> Self {
        let mut s = Self::new(shape.clone(), Some(shape));
        s.is_static = true;
        s
    }

    /// Static, render-only sprite. It is never indexed and never collides.
    pub fn decorative(mesh: Figure) -> Self {
        let mut s = Self::new(mesh, None);
        s.is_static = true;
        s
    }

    /// Render shape.
    pub fn mesh(&self) -> &Figure {
        &self.mesh
    }

    /// Collision shape, if the sprite takes part in collisions.
    pub fn collision_shape(&self) -> Option<&Figure> {
        self.collision.as_ref()
    }

    /// Cached pivot for rotations (mean of the collision shape's samples).
    pub fn mass_center(&self) -> Point {
        self.mass_center
    }

    /// `true` for sprites that never move.
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// `true` when the last collision pass vetoed this sprite's motion.
    pub fn blocked(&self) -> bool {
        self.blocked
    }

    /// Sets the collision veto for the next [`Sprite::update`].
    pub fn set_blocked(&mut self, blocked: bool) {
        self.blocked = blocked;
    }

    /// Translation queued for the next update.
    pub fn movement(&self) -> Point {
        self.movement
    }

    /// Rotation (radians) queued for the next update.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Adds `delta` to the queued translation.
    pub fn queue_move(&mut self, delta: Point) {
        self.movement += delta;
    }

    /// Adds `angle` to the queued rotation.
    pub fn queue_rotation(&mut self, angle: f64) {
        self.rotation += angle;
    }

    /// `true` when some motion is queued.
    pub fn has_pending_motion(&self) -> bool {
        !is_close(self.rotation, 0.0) || !self.movement.approx_eq(Point::ORIGIN)
    }

    /// The collision shape as it would be after applying the queued motion.
    ///
    /// # Errors
    /// Propagates [`GeomError::Unsupported`] when the shape cannot rotate.
    pub fn projected_collision(&self) -> Result<Option<Figure>, GeomError> {
        let Some(shape) = &self.collision else {
            return Ok(None);
        };
        let mut shape = shape.clone();
        self.apply_motion(&mut shape)?;
        Ok(Some(shape))
    }

    /// The mesh as it would be after applying the queued motion.
    ///
    /// # Errors
    /// Propagates [`GeomError::Unsupported`] when the mesh cannot rotate.
    pub fn projected_mesh(&self) -> Result<Figure, GeomError> {
        let mut mesh = self.mesh.clone();
        self.apply_motion(&mut mesh)?;
        Ok(mesh)
    }

    /// Applies the queued motion unless blocked, then clears the queue.
    ///
    /// Rotation happens about the cached mass centre before translation.
    /// Returns the `(rotation, movement)` actually applied; a blocked sprite
    /// reports `(0.0, ORIGIN)` and its queue is dropped.
    ///
    /// # Errors
    /// [`GeomError::Unsupported`] if a rotation is queued on a shape that
    /// cannot rotate. The sprite and its queue are left unchanged.
    pub fn update(&mut self) -> Result<(f64, Point), GeomError> {
        if self.blocked {
            self.clear_motion();
            return Ok((0.0, Point::ORIGIN));
        }
        let (rotation, movement) = (self.rotation, self.movement);
        let mesh = self.projected_mesh()?;
        let collision = self.projected_collision()?;
        self.mesh = mesh;
        self.collision = collision;
        self.mass_center = center_of(&self.mesh, self.collision.as_ref());
        self.clear_motion();
        Ok((rotation, movement))
    }

    fn apply_motion(&self, shape: &mut Figure) -> Result<(), GeomError> {
        if !is_close(self.rotation, 0.0) {
            shape.rotate(self.mass_center, self.rotation)?;
        }
        shape.translate(self.movement);
        Ok(())
    }

    fn clear_motion(&mut self) {
        self.movement = Point::ORIGIN;
        self.rotation = 0.0;
    }
}

fn center_of(mesh: &Figure, collision: Option<&Figure>) -> Point {
    collision
        .and_then(Figure::mass_center)
        .or_else(|| mesh.mass_center())
        .unwrap_or(Point::ORIGIN)
}

/// Single owner of every sprite in a simulation.
#[derive(Debug, Default)]
pub struct SpriteStore {
    sprites: BTreeMap<SpriteId, Sprite>,
    next_id: u64,
}

impl SpriteStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of `sprite` and returns its new handle.
    pub fn insert(&mut self, sprite: Sprite) -> SpriteId {
        let id = SpriteId(self.next_id);
        self.next_id += 1;
        self.sprites.insert(id, sprite);
        id
    }

    /// Shared access by handle.
    pub fn get(&self, id: SpriteId) -> Option<&Sprite> {
        self.sprites.get(&id)
    }

    /// Exclusive access by handle.
    pub fn get_mut(&mut self, id: SpriteId) -> Option<&mut Sprite> {
        self.sprites.get_mut(&id)
    }

    /// Removes and returns the sprite.
    pub fn remove(&mut self, id: SpriteId) -> Option<Sprite> {
        self.sprites.remove(&id)
    }

    /// `true` if the handle resolves.
    pub fn contains(&self, id: SpriteId) -> bool {
        self.sprites.contains_key(&id)
    }

    /// Collision shape of `id`, if the sprite exists and has one.
    pub fn collision_shape(&self, id: SpriteId) -> Option<&Figure> {
        self.get(id).and_then(Sprite::collision_shape)
    }

    /// Sprites in handle order.
    pub fn iter(&self) -> impl Iterator<Item = (SpriteId, &Sprite)> + '_ {
        self.sprites.iter().map(|(id, s)| (*id, s))
    }

    /// Mutable sprites in handle order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (SpriteId, &mut Sprite)> + '_ {
        self.sprites.iter_mut().map(|(id, s)| (*id, s))
    }

    /// Number of sprites.
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    /// `true` when empty.
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}
