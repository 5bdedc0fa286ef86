// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Line-of-sight oracles.

use quadnav_geom::{Figure, Line, Point};
use quadnav_space::{QuadTree, SpriteStore};

/// Answers whether the straight segment between two points is clear.
pub trait LineOfSight {
    /// `true` if nothing blocks the closed segment `from → to`.
    fn visible(&self, from: Point, to: Point) -> bool;
}

impl<F> LineOfSight for F
where
    F: Fn(Point, Point) -> bool,
{
    fn visible(&self, from: Point, to: Point) -> bool {
        self(from, to)
    }
}

/// Segment (or point, for coincident endpoints) as a query figure.
pub fn sight_figure(from: Point, to: Point) -> Figure {
    match Line::new(from, to) {
        Ok(line) => Figure::Line(line),
        Err(_) => Figure::Point(from),
    }
}

/// Line of sight against the collision shapes indexed by a quadtree.
///
/// Uses the quadtree broad phase, so only sprites in nodes the segment
/// crosses are tested exactly. Touching an obstacle blocks sight.
#[derive(Debug, Clone, Copy)]
pub struct ObstacleSight<'w> {
    tree: &'w QuadTree,
    store: &'w SpriteStore,
}

impl<'w> ObstacleSight<'w> {
    /// Oracle over `tree`, resolving shapes through `store`.
    pub fn new(tree: &'w QuadTree, store: &'w SpriteStore) -> Self {
        Self { tree, store }
    }

    /// `true` if `point` is outside every obstacle.
    pub fn point_is_free(&self, point: Point) -> bool {
        self.tree.is_free(self.store, &Figure::Point(point))
    }
}

impl LineOfSight for ObstacleSight<'_> {
    fn visible(&self, from: Point, to: Point) -> bool {
        self.tree.is_free(self.store, &sight_figure(from, to))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use quadnav_geom::{Circle, Rectangle};
    use quadnav_space::{QuadTreeConfig, Sprite};

    #[test]
    fn circle_blocks_the_straight_line() {
        let mut store = SpriteStore::new();
        let mut tree =
            QuadTree::new(Rectangle::square(Point::ORIGIN, 10.0).unwrap(), QuadTreeConfig::default())
                .unwrap();
        let disk = Circle::new(Point::new(5.0, 5.0), 2.0).unwrap();
        let id = store.insert(Sprite::obstacle(disk.into()));
        assert!(tree.add_sprites(&store, [id]).is_empty());

        let sight = ObstacleSight::new(&tree, &store);
        assert!(!sight.visible(Point::new(0.0, 5.0), Point::new(10.0, 5.0)));
        assert!(sight.visible(Point::new(0.0, 8.0), Point::new(10.0, 8.0)));
        // Grazing the disk counts as blocked.
        assert!(!sight.visible(Point::new(0.0, 7.0), Point::new(10.0, 7.0)));
        assert!(!sight.point_is_free(Point::new(5.0, 5.0)));
        assert!(sight.visible(Point::new(1.0, 1.0), Point::new(1.0, 1.0)));
    }

    #[test]
    fn closures_are_oracles() {
        let right_only = |a: Point, b: Point| a.x <= b.x;
        assert!(right_only.visible(Point::ORIGIN, Point::new(1.0, 0.0)));
        assert!(!right_only.visible(Point::new(1.0, 0.0), Point::ORIGIN));
    }
}
