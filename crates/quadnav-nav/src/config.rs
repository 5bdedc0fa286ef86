// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Navigation configuration, stored as JSON.

use std::path::Path;

use quadnav_space::QuadTreeConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::builder::BuildOptions;
use crate::facade::Algorithm;

/// Error type for loading and validating [`NavConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error while reading a config file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed JSON or unknown field values.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// Well-formed but unusable values.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Everything needed to index a map and route on it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Quadtree subdivision limits.
    pub tree: QuadTreeConfig,
    /// Waypoint graph construction.
    pub build: BuildOptions,
    /// Search algorithm.
    pub algorithm: Algorithm,
}

impl NavConfig {
    /// Parses and validates a JSON document. Missing fields take defaults.
    ///
    /// # Errors
    /// [`ConfigError::Json`] for malformed documents, [`ConfigError::Invalid`]
    /// when [`NavConfig::validate`] rejects the values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads [`NavConfig::from_json_str`] from a file.
    ///
    /// # Errors
    /// [`ConfigError::Io`] when the file cannot be read, otherwise as
    /// [`NavConfig::from_json_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Pretty JSON rendering.
    ///
    /// # Errors
    /// [`ConfigError::Json`] if serialization fails.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rejects values the builder cannot work with.
    ///
    /// # Errors
    /// [`ConfigError::Invalid`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.build.sampling_quality == 0 {
            return Err(ConfigError::Invalid(
                "build.sampling_quality must be at least 1".into(),
            ));
        }
        let clearance = self.build.clearance;
        if !clearance.is_finite() || clearance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "build.clearance must be finite and non-negative, got {clearance}"
            )));
        }
        Ok(())
    }
}
