// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Random placements and moves keep the quadtree invariants.
//!
//! The runner is seeded explicitly so a failure reproduces on every machine.

use proptest::prelude::*;
use proptest::test_runner::{Config, RngAlgorithm, TestRng, TestRunner};
use quadnav_geom::{Circle, Figure, Point, Rectangle};
use quadnav_space::{QuadTree, QuadTreeConfig, Sprite, SpriteStore};

const SIZE: f64 = 64.0;
const SEED_BYTES: [u8; 32] = [
    0x51, 0x75, 0x61, 0x64, 0x6e, 0x61, 0x76, 0x21, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06,
    0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f, 0x10, 0x11, 0x12, 0x13, 0x14, 0x15,
    0x16, 0x17,
];

fn runner() -> TestRunner {
    TestRunner::new_with_rng(
        Config {
            cases: 96,
            failure_persistence: None,
            ..Config::default()
        },
        TestRng::from_seed(RngAlgorithm::ChaCha, &SEED_BYTES),
    )
}

fn disks() -> impl Strategy<Value = Vec<(f64, f64, f64)>> {
    prop::collection::vec((0.0..SIZE, 0.0..SIZE, 0.1f64..6.0), 1..40)
}

fn disk(x: f64, y: f64, r: f64) -> Figure {
    Circle::new(Point::new(x, y), r).unwrap().into()
}

fn tree() -> QuadTree {
    QuadTree::new(
        Rectangle::square(Point::ORIGIN, SIZE).unwrap(),
        QuadTreeConfig { max_depth: 6 },
    )
    .unwrap()
}

#[test]
fn insertion_keeps_placement_invariant() {
    runner()
        .run(&disks(), |disks| {
            let mut store = SpriteStore::new();
            let mut t = tree();
            let ids: Vec<_> = disks
                .iter()
                .map(|&(x, y, r)| store.insert(Sprite::obstacle(disk(x, y, r))))
                .collect();
            let rejected = t.add_sprites(&store, ids.iter().copied());

            let root = Figure::Rectangle(t.bounds());
            for id in &ids {
                let shape = store.collision_shape(*id).unwrap();
                prop_assert_eq!(rejected.contains(id), !root.contains(shape));
            }
            prop_assert_eq!(t.sprite_count(), ids.len() - rejected.len());
            prop_assert!(t.check_invariants(&store).is_ok());
            Ok(())
        })
        .unwrap();
}

#[test]
fn moves_then_rebalance_keep_placement_invariant() {
    let strategy = (disks(), -8.0f64..8.0, -8.0f64..8.0);
    runner()
        .run(&strategy, |(disks, dx, dy)| {
            let mut store = SpriteStore::new();
            let mut t = tree();
            let ids: Vec<_> = disks
                .iter()
                .map(|&(x, y, r)| {
                    let shape = disk(x, y, r);
                    store.insert(Sprite::new(shape.clone(), Some(shape)))
                })
                .collect();
            let placed: Vec<_> = {
                let rejected = t.add_sprites(&store, ids.iter().copied());
                ids.iter().copied().filter(|id| !rejected.contains(id)).collect()
            };

            for id in &placed {
                let sprite = store.get_mut(*id).unwrap();
                sprite.queue_move(Point::new(dx, dy));
                sprite.update().unwrap();
            }
            let lost = t.optimize_tree(&store);

            let root = Figure::Rectangle(t.bounds());
            for id in &placed {
                let shape = store.collision_shape(*id).unwrap();
                prop_assert_eq!(lost.contains(id), !root.contains(shape));
                prop_assert_eq!(t.node_of(*id).is_some(), !lost.contains(id));
            }
            prop_assert!(t.check_invariants(&store).is_ok());
            Ok(())
        })
        .unwrap();
}
