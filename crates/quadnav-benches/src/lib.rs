// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared fixtures for the quadnav benchmarks.

use quadnav_geom::{Circle, Point, Rectangle};
use quadnav_space::{QuadTreeConfig, SpaceError, Sprite, World};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Square world of side `size` with up to `n` random disks, seeded for
/// repeatable runs. Disks reaching past the map edge are left out.
pub fn disk_field(size: f64, n: usize, seed: u64) -> Result<World, SpaceError> {
    let bounds = Rectangle::square(Point::ORIGIN, size).map_err(SpaceError::from)?;
    let mut world = World::new(bounds, QuadTreeConfig::default())?;
    let mut rng = StdRng::seed_from_u64(seed);
    let max_r = (size / 40.0).max(0.5);
    for _ in 0..n {
        let center = Point::new(rng.gen_range(0.0..size), rng.gen_range(0.0..size));
        let disk = Circle::new(center, rng.gen_range(0.25..max_r)).map_err(SpaceError::from)?;
        match world.add_sprite(Sprite::obstacle(disk.into())) {
            Ok(_) | Err(SpaceError::OutsideRoot(_)) => {}
            Err(e) => return Err(e),
        }
    }
    Ok(world)
}

/// Corner-to-corner queries across both diagonals, inset by `margin`.
pub fn corner_queries(size: f64, margin: f64) -> [(Point, Point); 2] {
    let lo = margin;
    let hi = size - margin;
    [
        (Point::new(lo, lo), Point::new(hi, hi)),
        (Point::new(lo, hi), Point::new(hi, lo)),
    ]
}
