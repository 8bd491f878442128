// SPDX-License-Identifier: MIT OR Apache-2.0
//! Engine configuration, stored as RON.

use nodeflow_graph::ValidationOptions;
use nodeflow_layout::{CollisionOptions, LayoutOptions};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// All engine options. Missing sections and fields take their defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Layered layout settings
    pub layout: LayoutOptions,
    /// Collision resolver settings
    pub collision: CollisionOptions,
    /// Connection validation policy
    pub validation: ValidationOptions,
}

impl EngineConfig {
    /// Parse and check a RON document
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig =
            ron::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.check()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_ron(&content)?;
        tracing::debug!(path = %path.display(), "loaded engine config");
        Ok(config)
    }

    /// Render as pretty RON
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::default()
            .struct_names(true)
            .enumerate_arrays(false);
        ron::ser::to_string_pretty(self, pretty).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Save to a configuration file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_ron()?)?;
        Ok(())
    }

    /// Reject values the layout cannot work with
    pub fn check(&self) -> Result<(), ConfigError> {
        let layout = &self.layout;
        let lengths = [
            ("layout.node_spacing", layout.node_spacing),
            ("layout.rank_spacing", layout.rank_spacing),
            ("layout.grid_snap", layout.grid_snap),
            ("collision.gap", self.collision.gap),
            ("collision.grid_snap", self.collision.grid_snap),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a finite, non-negative number (got {value})"
                )));
            }
        }
        let margins = [
            ("layout.margin_x", layout.margin_x),
            ("layout.margin_y", layout.margin_y),
        ];
        for (name, value) in margins {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!("{name} must be finite")));
            }
        }
        if self.collision.max_iterations == 0 {
            return Err(ConfigError::Invalid(
                "collision.max_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Error loading or saving an [`EngineConfig`]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read or written
    #[error("config I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Text is not a valid configuration
    #[error("invalid config syntax: {0}")]
    Parse(String),

    /// Configuration could not be rendered
    #[error("failed to serialize config: {0}")]
    Serialize(String),

    /// A value is out of range
    #[error("invalid config value: {0}")]
    Invalid(String),
}
