// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! JSON scenario files: a square map, obstacles, config and route queries.

use std::path::Path;

use anyhow::{Context, Result};
use quadnav_geom::{Figure, Point, Rectangle};
use quadnav_nav::NavConfig;
use quadnav_space::{Sprite, World};
use serde::{Deserialize, Serialize};

/// One route request.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Query {
    /// Route origin `[x, y]`.
    pub start: [f64; 2],
    /// Route destination `[x, y]`.
    pub goal: [f64; 2],
}

/// Scenario document.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Bottom-left corner of the root square.
    #[serde(default)]
    pub origin: [f64; 2],
    /// Side length of the root square.
    pub size: f64,
    /// Tree, builder and algorithm settings.
    #[serde(default)]
    pub config: NavConfig,
    /// Static obstacle shapes.
    #[serde(default)]
    pub obstacles: Vec<Figure>,
    /// Route requests answered by `quadnav route`.
    #[serde(default)]
    pub queries: Vec<Query>,
}

impl Scenario {
    /// Parses a scenario and validates its config.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let scenario: Self = serde_json::from_str(text).context("parse scenario")?;
        scenario.config.validate().context("scenario config")?;
        Ok(scenario)
    }

    /// Reads and parses a scenario file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read scenario {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("load scenario {}", path.display()))
    }

    /// The root square.
    pub fn bounds(&self) -> Result<Rectangle> {
        Rectangle::square(Point::from(self.origin), self.size).context("scenario root square")
    }

    /// World holding every obstacle as a static sprite.
    pub fn world(&self) -> Result<World> {
        let mut world = World::new(self.bounds()?, self.config.tree).context("create world")?;
        for (i, shape) in self.obstacles.iter().enumerate() {
            world
                .add_sprite(Sprite::obstacle(shape.clone()))
                .with_context(|| format!("obstacle #{i} ({})", shape.kind()))?;
        }
        Ok(world)
    }
}
