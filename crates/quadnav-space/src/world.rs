// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Simulation world: sprite store, quadtree index and agents, advanced by
//! discrete ticks.

use quadnav_geom::{Point, Rectangle};
use tracing::{debug, instrument};

use crate::error::SpaceError;
use crate::quadtree::{QuadTree, QuadTreeConfig};
use crate::sprite::{Sprite, SpriteId, SpriteStore};

/// Something that steers a sprite by queueing motion on it each tick.
pub trait Agent {
    /// Sprite this agent drives.
    fn sprite(&self) -> SpriteId;

    /// Current position of the agent; defaults to the sprite's mass centre.
    fn pos(&self, sprite: &Sprite) -> Point {
        sprite.mass_center()
    }

    /// Queues motion for the coming tick.
    fn update(&mut self, deltatime: f64, sprite: &mut Sprite);
}

/// Summary of one [`World::tick`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Sprites whose queued motion was applied.
    pub moved: Vec<SpriteId>,
    /// Sprites whose queued motion was vetoed by a collision.
    pub blocked: Vec<SpriteId>,
    /// Sprites that left the world bounds and were dropped from the index.
    pub lost: Vec<SpriteId>,
}

/// Owns every sprite and keeps the quadtree in step with their motion.
pub struct World {
    store: SpriteStore,
    tree: QuadTree,
    agents: Vec<Box<dyn Agent>>,
}

impl core::fmt::Debug for World {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("World")
            .field("sprites", &self.store.len())
            .field("nodes", &self.tree.node_count())
            .field("agents", &self.agents.len())
            .finish()
    }
}

impl World {
    /// Empty world over the square `bounds`.
    ///
    /// # Errors
    /// [`SpaceError::InvalidRoot`] if `bounds` is not a square.
    pub fn new(bounds: Rectangle, config: QuadTreeConfig) -> Result<Self, SpaceError> {
        Ok(Self {
            store: SpriteStore::new(),
            tree: QuadTree::new(bounds, config)?,
            agents: Vec::new(),
        })
    }

    /// Sprite store (read-only; mutate through ticks and agents).
    pub fn store(&self) -> &SpriteStore {
        &self.store
    }

    /// Spatial index.
    pub fn tree(&self) -> &QuadTree {
        &self.tree
    }

    /// Adds a sprite and indexes it when it has a collision shape.
    ///
    /// # Errors
    /// [`SpaceError::OutsideRoot`] if the collision shape does not fit the
    /// world bounds; the sprite is not kept.
    pub fn add_sprite(&mut self, sprite: Sprite) -> Result<SpriteId, SpaceError> {
        let indexed = sprite.collision_shape().is_some();
        let id = self.store.insert(sprite);
        if indexed && !self.tree.add_sprites(&self.store, [id]).is_empty() {
            self.store.remove(id);
            return Err(SpaceError::OutsideRoot(id));
        }
        Ok(id)
    }

    /// Removes a sprite, its index entry and any agent driving it.
    pub fn remove_sprite(&mut self, id: SpriteId) -> Option<Sprite> {
        self.tree.remove_sprite(id);
        self.agents.retain(|a| a.sprite() != id);
        self.store.remove(id)
    }

    /// Registers an agent.
    ///
    /// # Errors
    /// [`SpaceError::UnknownSprite`] if its sprite is not in the world.
    pub fn add_agent(&mut self, agent: Box<dyn Agent>) -> Result<(), SpaceError> {
        let id = agent.sprite();
        if !self.store.contains(id) {
            return Err(SpaceError::UnknownSprite(id));
        }
        self.agents.push(agent);
        Ok(())
    }

    /// Registered agents in insertion order.
    pub fn agents(&self) -> impl Iterator<Item = &dyn Agent> + '_ {
        self.agents.iter().map(AsRef::as_ref)
    }

    /// Position of every agent.
    pub fn agent_positions(&self) -> Vec<(SpriteId, Point)> {
        self.agents
            .iter()
            .filter_map(|a| {
                let id = a.sprite();
                self.store.get(id).map(|s| (id, a.pos(s)))
            })
            .collect()
    }

    /// Advances the simulation by one step.
    ///
    /// 1. Agents queue motion on their sprites.
    /// 2. Each dynamic sprite with queued motion is blocked if its moved
    ///    collision shape would touch another sprite (quadtree broad phase,
    ///    then exact test). All sprites are tested against pre-tick
    ///    positions.
    /// 3. Unblocked motion is applied.
    /// 4. The quadtree is rebalanced; sprites that left the bounds are
    ///    reported as lost.
    ///
    /// # Errors
    /// [`SpaceError::Geometry`] when queued rotation hits a shape that
    /// cannot rotate. Every move is checked before any is applied, so on
    /// error no sprite has moved, queued motion stays queued and the index
    /// is unchanged.
    #[instrument(skip(self), fields(sprites = self.store.len(), agents = self.agents.len()))]
    pub fn tick(&mut self, deltatime: f64) -> Result<TickReport, SpaceError> {
        for agent in &mut self.agents {
            let id = agent.sprite();
            if let Some(sprite) = self.store.get_mut(id) {
                agent.update(deltatime, sprite);
            }
        }

        let mut report = TickReport::default();
        let mut verdicts = Vec::new();
        for (id, sprite) in self.store.iter() {
            if sprite.is_static() || !sprite.has_pending_motion() {
                continue;
            }
            let blocked = match sprite.projected_collision()? {
                Some(shape) => self
                    .tree
                    .colliding(&self.store, &shape)
                    .into_iter()
                    .any(|other| other != id),
                None => false,
            };
            if !blocked {
                sprite.projected_mesh()?;
            }
            verdicts.push((id, blocked));
        }

        for (id, blocked) in verdicts {
            let Some(sprite) = self.store.get_mut(id) else {
                continue;
            };
            sprite.set_blocked(blocked);
            sprite.update()?;
            sprite.set_blocked(false);
            if blocked {
                report.blocked.push(id);
            } else {
                report.moved.push(id);
            }
        }

        report.lost = self.tree.optimize_tree(&self.store);
        debug!(
            moved = report.moved.len(),
            blocked = report.blocked.len(),
            lost = report.lost.len(),
            "tick complete"
        );
        Ok(report)
    }
}
