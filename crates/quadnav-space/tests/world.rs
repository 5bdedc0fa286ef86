// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Tick loop: agents, collision veto and rebalancing.

use quadnav_geom::{Circle, Figure, GeomError, Point, Rectangle};
use quadnav_space::{Agent, QuadTreeConfig, SpaceError, Sprite, SpriteId, World};

/// Pushes its sprite by a constant velocity.
struct Drifter {
    sprite: SpriteId,
    velocity: Point,
}

impl Agent for Drifter {
    fn sprite(&self) -> SpriteId {
        self.sprite
    }

    fn update(&mut self, deltatime: f64, sprite: &mut Sprite) {
        sprite.queue_move(self.velocity * deltatime);
    }
}

/// Turns its sprite a fixed angle per tick.
struct Spinner {
    sprite: SpriteId,
    angle: f64,
}

impl Agent for Spinner {
    fn sprite(&self) -> SpriteId {
        self.sprite
    }

    fn update(&mut self, _deltatime: f64, sprite: &mut Sprite) {
        sprite.queue_rotation(self.angle);
    }
}

fn world() -> World {
    World::new(
        Rectangle::square(Point::ORIGIN, 20.0).unwrap(),
        QuadTreeConfig::default(),
    )
    .unwrap()
}

fn disk(x: f64, y: f64, r: f64) -> Figure {
    Circle::new(Point::new(x, y), r).unwrap().into()
}

#[test]
fn agent_moves_until_an_obstacle_blocks_it() {
    let mut w = world();
    w.add_sprite(Sprite::obstacle(
        Rectangle::new(Point::new(8.0, 0.0), Point::new(9.0, 20.0))
            .unwrap()
            .into(),
    ))
    .unwrap();
    let car = w
        .add_sprite(Sprite::new(disk(2.0, 10.0, 1.0), Some(disk(2.0, 10.0, 1.0))))
        .unwrap();
    w.add_agent(Box::new(Drifter {
        sprite: car,
        velocity: Point::new(2.0, 0.0),
    }))
    .unwrap();

    let mut blocked_at = None;
    for step in 0..10 {
        let report = w.tick(1.0).unwrap();
        if report.blocked.contains(&car) {
            blocked_at = Some(step);
            break;
        }
        assert_eq!(report.moved, vec![car]);
    }
    // Centres 4, 6 are free; moving to 8 would overlap the wall.
    assert_eq!(blocked_at, Some(2));
    let pos = w.agent_positions()[0].1;
    assert!(pos.approx_eq(Point::new(6.0, 10.0)), "got {pos}");
    w.tree().check_invariants(w.store()).unwrap();
}

#[test]
fn failed_rotation_leaves_every_sprite_in_place() {
    let mut w = world();
    let mover = w
        .add_sprite(Sprite::new(disk(3.0, 3.0, 1.0), Some(disk(3.0, 3.0, 1.0))))
        .unwrap();
    // Round collision shape, square mesh: only the mesh refuses to rotate.
    let square = Rectangle::new(Point::new(14.0, 14.0), Point::new(16.0, 16.0)).unwrap();
    let spinner = w
        .add_sprite(Sprite::new(square.into(), Some(disk(15.0, 15.0, 1.0))))
        .unwrap();
    w.add_agent(Box::new(Drifter {
        sprite: mover,
        velocity: Point::new(12.0, 0.0),
    }))
    .unwrap();
    w.add_agent(Box::new(Spinner {
        sprite: spinner,
        angle: 0.5,
    }))
    .unwrap();
    let home = w.tree().node_of(mover);

    let err = w.tick(1.0).unwrap_err();
    assert_eq!(
        err,
        SpaceError::Geometry(GeomError::Unsupported {
            op: "rotate",
            shape: "rectangle",
        })
    );
    let mover_sprite = w.store().get(mover).unwrap();
    assert!(mover_sprite.mass_center().approx_eq(Point::new(3.0, 3.0)));
    assert!(mover_sprite.has_pending_motion());
    assert_eq!(w.tree().node_of(mover), home);
    w.tree().check_invariants(w.store()).unwrap();
}

#[test]
fn leaving_the_map_is_reported_as_lost() {
    let mut w = world();
    let car = w
        .add_sprite(Sprite::new(disk(18.0, 10.0, 1.0), Some(disk(18.0, 10.0, 1.0))))
        .unwrap();
    w.add_agent(Box::new(Drifter {
        sprite: car,
        velocity: Point::new(5.0, 0.0),
    }))
    .unwrap();
    let report = w.tick(1.0).unwrap();
    assert_eq!(report.lost, vec![car]);
    assert_eq!(w.tree().node_of(car), None);
    assert!(w.store().contains(car));
}

#[test]
fn registration_errors() {
    let mut w = world();
    let err = w
        .add_sprite(Sprite::obstacle(disk(25.0, 5.0, 1.0)))
        .unwrap_err();
    assert!(matches!(err, SpaceError::OutsideRoot(_)));
    assert!(w.store().is_empty());

    let ghost = w.add_sprite(Sprite::decorative(disk(25.0, 5.0, 1.0))).unwrap();
    assert_eq!(w.tree().sprite_count(), 0);
    w.remove_sprite(ghost);
    assert_eq!(
        w.add_agent(Box::new(Drifter {
            sprite: ghost,
            velocity: Point::ORIGIN,
        })),
        Err(SpaceError::UnknownSprite(ghost))
    );
}

#[test]
fn non_square_bounds_are_rejected() {
    let r = Rectangle::new(Point::ORIGIN, Point::new(10.0, 5.0)).unwrap();
    assert_eq!(
        World::new(r, QuadTreeConfig::default()).unwrap_err(),
        SpaceError::InvalidRoot
    );
}
