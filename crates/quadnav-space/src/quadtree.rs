// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Dynamic quadtree over sprite collision shapes.
//!
//! Nodes live in an arena keyed by [`NodeId`]; each node stores its parent
//! and up to four child ids, so walking up for neighbour lookup is O(1) and
//! there are no ownership cycles.
//!
//! Placement invariant: a sprite sits at the shallowest node whose square
//! fully contains its collision shape and none of whose quadrants does
//! (or at `max_depth`, where subdivision stops). Children are materialized
//! lazily on the first insertion that needs them and pruned once they hold
//! no sprites and have no children.
//!
//! Determinism: nodes, sprites and query results are kept in ordered
//! collections; ties between overlapping quadrants (a shape lying exactly
//! on a split line) resolve to the first quadrant in [`Quadrant::ALL`] order.

use std::collections::{BTreeMap, BTreeSet};

use quadnav_geom::{Figure, Rectangle};
use tracing::{debug, instrument, trace};

use crate::error::SpaceError;
use crate::sprite::{SpriteId, SpriteStore};

/// Subdivision limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct QuadTreeConfig {
    /// Deepest level children may be created at (root is depth 0).
    pub max_depth: u32,
}

impl Default for QuadTreeConfig {
    fn default() -> Self {
        Self { max_depth: 8 }
    }
}

/// Arena handle of a quadtree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u64);

impl NodeId {
    /// Raw handle value.
    pub fn index(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for NodeId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "node{}", self.0)
    }
}

/// Child slot of a node (y axis points up).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Quadrant {
    /// Lower-left quarter.
    BottomLeft = 0,
    /// Lower-right quarter.
    BottomRight = 1,
    /// Upper-left quarter.
    TopLeft = 2,
    /// Upper-right quarter.
    TopRight = 3,
}

impl Quadrant {
    /// Slot order used for children and traversal.
    pub const ALL: [Self; 4] = [
        Self::BottomLeft,
        Self::BottomRight,
        Self::TopLeft,
        Self::TopRight,
    ];

    /// Slot index (bit 0 = right column, bit 1 = top row).
    pub fn index(self) -> usize {
        self as usize
    }

    fn from_index(i: usize) -> Self {
        Self::ALL[i & 3]
    }

    fn is_right(self) -> bool {
        self.index() & 1 == 1
    }

    fn is_top(self) -> bool {
        self.index() & 2 == 2
    }
}

/// Side used by [`QuadTree::find_adjacent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards negative x.
    Left,
    /// Towards positive x.
    Right,
    /// Towards positive y.
    Top,
    /// Towards negative y.
    Bottom,
    /// All four sides.
    All,
}

impl Direction {
    const SIDES: [Self; 4] = [Self::Left, Self::Right, Self::Top, Self::Bottom];

    /// `true` when a child in `q` has its sibling on this side.
    fn sibling_side(self, q: Quadrant) -> bool {
        match self {
            Self::Left => q.is_right(),
            Self::Right => !q.is_right(),
            Self::Top => !q.is_top(),
            Self::Bottom => q.is_top(),
            Self::All => false,
        }
    }

    /// Mirror of `q` across the split line perpendicular to this side.
    fn mirror(self, q: Quadrant) -> Quadrant {
        match self {
            Self::Left | Self::Right => Quadrant::from_index(q.index() ^ 1),
            Self::Top | Self::Bottom | Self::All => Quadrant::from_index(q.index() ^ 2),
        }
    }

    /// Children of a neighbour on this side that face back toward us.
    fn facing(self) -> [Quadrant; 2] {
        match self {
            Self::Left => [Quadrant::BottomRight, Quadrant::TopRight],
            Self::Right => [Quadrant::BottomLeft, Quadrant::TopLeft],
            Self::Top | Self::All => [Quadrant::BottomLeft, Quadrant::BottomRight],
            Self::Bottom => [Quadrant::TopLeft, Quadrant::TopRight],
        }
    }
}

/// One square region of the tree.
#[derive(Debug, Clone)]
pub struct QuadNode {
    rect: Rectangle,
    sprites: BTreeSet<SpriteId>,
    children: [Option<NodeId>; 4],
    parent: Option<NodeId>,
    quadrant: Option<Quadrant>,
    depth: u32,
}

impl QuadNode {
    /// Square covered by this node.
    pub fn rect(&self) -> &Rectangle {
        &self.rect
    }

    /// Sprites stored exactly at this node.
    pub fn sprites(&self) -> &BTreeSet<SpriteId> {
        &self.sprites
    }

    /// Child slots in [`Quadrant::ALL`] order.
    pub fn children(&self) -> [Option<NodeId>; 4] {
        self.children
    }

    /// Parent node, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Slot this node occupies in its parent.
    pub fn quadrant(&self) -> Option<Quadrant> {
        self.quadrant
    }

    /// Distance from the root.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// `true` when no child slot is populated.
    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }
}

/// Arena-backed quadtree indexing sprites by collision shape.
#[derive(Debug, Clone)]
pub struct QuadTree {
    nodes: BTreeMap<NodeId, QuadNode>,
    located: BTreeMap<SpriteId, NodeId>,
    root: NodeId,
    next_id: u64,
    config: QuadTreeConfig,
}

impl QuadTree {
    /// Creates an empty tree over `root`, which must be a square with
    /// positive side.
    ///
    /// # Errors
    /// [`SpaceError::InvalidRoot`] otherwise.
    pub fn new(root: Rectangle, config: QuadTreeConfig) -> Result<Self, SpaceError> {
        if root.width() <= 0.0 || !quadnav_geom::is_close(root.width(), root.height()) {
            return Err(SpaceError::InvalidRoot);
        }
        let root_id = NodeId(0);
        let mut nodes = BTreeMap::new();
        nodes.insert(
            root_id,
            QuadNode {
                rect: root,
                sprites: BTreeSet::new(),
                children: [None; 4],
                parent: None,
                quadrant: None,
                depth: 0,
            },
        );
        Ok(Self {
            nodes,
            located: BTreeMap::new(),
            root: root_id,
            next_id: 1,
            config,
        })
    }

    /// Root node handle.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Square covered by the whole tree.
    pub fn bounds(&self) -> Rectangle {
        self.nodes[&self.root].rect
    }

    /// Subdivision limits.
    pub fn config(&self) -> QuadTreeConfig {
        self.config
    }

    /// Node by handle.
    pub fn node(&self, id: NodeId) -> Option<&QuadNode> {
        self.nodes.get(&id)
    }

    /// Number of materialized nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of indexed sprites.
    pub fn sprite_count(&self) -> usize {
        self.located.len()
    }

    /// Node currently storing `sprite`.
    pub fn node_of(&self, sprite: SpriteId) -> Option<NodeId> {
        self.located.get(&sprite).copied()
    }

    /// Every indexed sprite, in pre-order of the nodes storing them.
    pub fn sprites(&self) -> Vec<SpriteId> {
        self.dfs()
            .into_iter()
            .flat_map(|n| self.nodes[&n].sprites.iter().copied())
            .collect()
    }

    /// Inserts sprites, descending each to the deepest node that fully
    /// contains its collision shape.
    ///
    /// Returns the sprites that were not inserted: unknown handles, sprites
    /// without a collision shape, and shapes that do not fit the root.
    /// Already-indexed sprites are re-placed.
    pub fn add_sprites<I>(&mut self, store: &SpriteStore, sprites: I) -> Vec<SpriteId>
    where
        I: IntoIterator<Item = SpriteId>,
    {
        let mut rejected = Vec::new();
        for id in sprites {
            let Some(shape) = store.collision_shape(id) else {
                rejected.push(id);
                continue;
            };
            if !Figure::Rectangle(self.bounds()).contains(shape) {
                rejected.push(id);
                continue;
            }
            self.detach(id);
            self.insert_from(self.root, id, shape);
        }
        self.clear_children(self.root);
        if !rejected.is_empty() {
            debug!(rejected = rejected.len(), "sprites left out of the quadtree");
        }
        rejected
    }

    /// Removes a sprite from the index. Returns `false` if it was not there.
    pub fn remove_sprite(&mut self, sprite: SpriteId) -> bool {
        let removed = self.detach(sprite);
        if removed {
            self.clear_children(self.root);
        }
        removed
    }

    fn detach(&mut self, sprite: SpriteId) -> bool {
        match self.located.remove(&sprite) {
            Some(node) => {
                if let Some(n) = self.nodes.get_mut(&node) {
                    n.sprites.remove(&sprite);
                }
                true
            }
            None => false,
        }
    }

    /// Places `sprite` at or below `start`; the caller has checked that
    /// `start` contains `shape`.
    fn insert_from(&mut self, start: NodeId, sprite: SpriteId, shape: &Figure) {
        let mut node = start;
        loop {
            let (rect, depth) = {
                let n = &self.nodes[&node];
                (n.rect, n.depth)
            };
            if depth >= self.config.max_depth {
                break;
            }
            let slot = rect
                .quadrants()
                .iter()
                .position(|q| Figure::Rectangle(*q).contains(shape));
            match slot {
                Some(i) => node = self.ensure_child(node, Quadrant::from_index(i)),
                None => break,
            }
        }
        if let Some(n) = self.nodes.get_mut(&node) {
            n.sprites.insert(sprite);
        }
        self.located.insert(sprite, node);
    }

    fn ensure_child(&mut self, parent: NodeId, quadrant: Quadrant) -> NodeId {
        let (existing, rect, depth) = {
            let p = &self.nodes[&parent];
            (
                p.children[quadrant.index()],
                p.rect.quadrants()[quadrant.index()],
                p.depth,
            )
        };
        if let Some(child) = existing {
            return child;
        }
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            id,
            QuadNode {
                rect,
                sprites: BTreeSet::new(),
                children: [None; 4],
                parent: Some(parent),
                quadrant: Some(quadrant),
                depth: depth + 1,
            },
        );
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children[quadrant.index()] = Some(id);
        }
        trace!(%parent, child = %id, ?quadrant, "materialized quadrant");
        id
    }

    /// Recursively removes descendants of `node` that hold no sprites and
    /// have no children.
    pub fn clear_children(&mut self, node: NodeId) {
        let Some(children) = self.nodes.get(&node).map(|n| n.children) else {
            return;
        };
        for (slot, child) in children.iter().enumerate() {
            let Some(child) = *child else { continue };
            self.clear_children(child);
            let dead = self
                .nodes
                .get(&child)
                .is_some_and(|c| c.sprites.is_empty() && c.is_leaf());
            if dead {
                self.nodes.remove(&child);
                if let Some(n) = self.nodes.get_mut(&node) {
                    n.children[slot] = None;
                }
            }
        }
    }

    /// Broad phase: sprites stored at the root plus every descendant whose
    /// square intersects `query`.
    ///
    /// Conservative; callers confirm with an exact `has_intersect`.
    pub fn collision_candidates(&self, query: &Figure) -> BTreeSet<SpriteId> {
        let mut out = BTreeSet::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[&id];
            out.extend(node.sprites.iter().copied());
            for child in node.children.iter().rev().flatten() {
                if Figure::Rectangle(self.nodes[child].rect).has_intersect(query) {
                    stack.push(*child);
                }
            }
        }
        out
    }

    /// [`QuadTree::collision_candidates`] for a stored sprite's own shape,
    /// excluding the sprite itself.
    ///
    /// # Errors
    /// [`SpaceError::UnknownSprite`] if the sprite has no collision shape.
    pub fn collision_candidates_for(
        &self,
        store: &SpriteStore,
        sprite: SpriteId,
    ) -> Result<BTreeSet<SpriteId>, SpaceError> {
        let shape = store
            .collision_shape(sprite)
            .ok_or(SpaceError::UnknownSprite(sprite))?;
        let mut out = self.collision_candidates(shape);
        out.remove(&sprite);
        Ok(out)
    }

    /// Sprites whose collision shape exactly intersects `query`.
    pub fn colliding(&self, store: &SpriteStore, query: &Figure) -> BTreeSet<SpriteId> {
        self.collision_candidates(query)
            .into_iter()
            .filter(|id| {
                store
                    .collision_shape(*id)
                    .is_some_and(|s| s.has_intersect(query))
            })
            .collect()
    }

    /// `true` when `query` touches no indexed sprite.
    pub fn is_free(&self, store: &SpriteStore, query: &Figure) -> bool {
        self.collision_candidates(query).into_iter().all(|id| {
            store
                .collision_shape(id)
                .is_none_or(|s| !s.has_intersect(query))
        })
    }

    /// Re-places every sprite after movement.
    ///
    /// Works bottom-up: children hand back sprites that escaped their
    /// square, each node re-descends its own and reclaimed sprites, and
    /// dead children are pruned. Sprites that no longer fit the root (or
    /// lost their shape or store entry) are dropped from the index and
    /// returned.
    #[instrument(skip(self, store), fields(nodes = self.nodes.len()))]
    pub fn optimize_tree(&mut self, store: &SpriteStore) -> Vec<SpriteId> {
        let lost = self.optimize_node(store, self.root);
        for id in &lost {
            self.located.remove(id);
        }
        debug!(
            lost = lost.len(),
            nodes = self.nodes.len(),
            "quadtree rebalanced"
        );
        lost
    }

    fn optimize_node(&mut self, store: &SpriteStore, node: NodeId) -> Vec<SpriteId> {
        let children = self.nodes[&node].children;
        let mut pending: Vec<SpriteId> = Vec::new();
        for child in children.into_iter().flatten() {
            pending.extend(self.optimize_node(store, child));
        }
        let (rect, own) = match self.nodes.get_mut(&node) {
            Some(n) => (n.rect, core::mem::take(&mut n.sprites)),
            None => return pending,
        };
        pending.extend(own);

        let mut lost = Vec::new();
        for id in pending {
            match store.collision_shape(id) {
                Some(shape) if Figure::Rectangle(rect).contains(shape) => {
                    self.insert_from(node, id, shape);
                }
                _ => lost.push(id),
            }
        }
        self.clear_children(node);
        lost
    }

    /// Deepest existing node whose square fully contains `shape`, or `None`
    /// when it does not fit the root.
    pub fn get_quad_tree(&self, shape: &Figure) -> Option<NodeId> {
        let mut node = self.root;
        if !Figure::Rectangle(self.nodes[&node].rect).contains(shape) {
            return None;
        }
        'descend: loop {
            for child in self.nodes[&node].children.into_iter().flatten() {
                if Figure::Rectangle(self.nodes[&child].rect).contains(shape) {
                    node = child;
                    continue 'descend;
                }
            }
            return Some(node);
        }
    }

    /// Pre-order traversal of the whole tree.
    pub fn dfs(&self) -> Vec<NodeId> {
        self.dfs_from(self.root)
    }

    /// Pre-order traversal of the subtree rooted at `start`.
    pub fn dfs_from(&self, start: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.nodes.contains_key(&start) {
            return out;
        }
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.nodes[&id].children.iter().rev().flatten());
        }
        out
    }

    /// Ancestors of `node`, nearest first, ending at the root.
    pub fn recursive_parents(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cur = self.nodes.get(&node).and_then(|n| n.parent);
        while let Some(p) = cur {
            out.push(p);
            cur = self.nodes[&p].parent;
        }
        out
    }

    /// Nodes bordering `node` on `direction`.
    ///
    /// Finds the equal-or-larger neighbour on that side by walking up until
    /// the side is crossed inside a common ancestor, then mirroring back
    /// down. The result is that neighbour followed by its descendants that
    /// touch `node`. Returns nothing for the root or at the tree border.
    pub fn find_adjacent(&self, node: NodeId, direction: Direction) -> Vec<NodeId> {
        let mut out = Vec::new();
        let sides: &[Direction] = match direction {
            Direction::All => &Direction::SIDES,
            _ => core::slice::from_ref(&direction),
        };
        let Some(rect) = self.nodes.get(&node).map(|n| n.rect) else {
            return out;
        };
        for &side in sides {
            if let Some(n) = self.neighbor_of(node, side) {
                self.collect_facing(n, side, &rect, &mut out);
            }
        }
        let mut seen = BTreeSet::new();
        out.retain(|n| seen.insert(*n));
        out
    }

    fn neighbor_of(&self, node: NodeId, side: Direction) -> Option<NodeId> {
        let n = self.nodes.get(&node)?;
        let (parent, quadrant) = (n.parent?, n.quadrant?);
        let mirrored = side.mirror(quadrant).index();
        if side.sibling_side(quadrant) {
            return self.nodes[&parent].children[mirrored];
        }
        let uncle = self.neighbor_of(parent, side)?;
        let u = &self.nodes[&uncle];
        // A neighbour larger than our parent has no child aligned with us.
        if u.depth < self.nodes[&parent].depth {
            return Some(uncle);
        }
        Some(u.children[mirrored].unwrap_or(uncle))
    }

    fn collect_facing(
        &self,
        node: NodeId,
        side: Direction,
        target: &Rectangle,
        out: &mut Vec<NodeId>,
    ) {
        out.push(node);
        for q in side.facing() {
            if let Some(child) = self.nodes[&node].children[q.index()] {
                if self.nodes[&child].rect.overlaps(target) {
                    self.collect_facing(child, side, target, out);
                }
            }
        }
    }

    /// Verifies arena links and the placement invariant for every sprite.
    ///
    /// # Errors
    /// [`SpaceError::InvariantViolation`] describing the first problem found.
    pub fn check_invariants(&self, store: &SpriteStore) -> Result<(), SpaceError> {
        let fail = |msg: String| Err(SpaceError::InvariantViolation(msg));
        for (&id, node) in &self.nodes {
            for (slot, child) in node.children.iter().enumerate() {
                let Some(child) = child else { continue };
                let Some(c) = self.nodes.get(child) else {
                    return fail(format!("{id} points at missing child {child}"));
                };
                if c.parent != Some(id) || c.quadrant.map(Quadrant::index) != Some(slot) {
                    return fail(format!("{child} has a stale parent link"));
                }
                if c.depth != node.depth + 1 || c.rect != node.rect.quadrants()[slot] {
                    return fail(format!("{child} geometry does not match its slot"));
                }
            }
            for &sprite in &node.sprites {
                if self.located.get(&sprite) != Some(&id) {
                    return fail(format!("sprite {sprite} missing from location index"));
                }
                let Some(shape) = store.collision_shape(sprite) else {
                    return fail(format!("sprite {sprite} has no collision shape"));
                };
                if !Figure::Rectangle(node.rect).contains(shape) {
                    return fail(format!("sprite {sprite} escapes {id}"));
                }
                let deeper = node.depth < self.config.max_depth
                    && node
                        .rect
                        .quadrants()
                        .iter()
                        .any(|q| Figure::Rectangle(*q).contains(shape));
                if deeper {
                    return fail(format!("sprite {sprite} could sit below {id}"));
                }
            }
        }
        let stored: usize = self.nodes.values().map(|n| n.sprites.len()).sum();
        if stored != self.located.len() {
            return fail(format!(
                "location index has {} entries, nodes hold {stored}",
                self.located.len()
            ));
        }
        Ok(())
    }
}
