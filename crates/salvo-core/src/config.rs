//! Scenario configuration: paths, enemy roster and the wave list.
//!
//! Scenarios are plain JSON. Loading checks cross references (paths and
//! kinds named by waves must exist) so that a bad file is rejected before
//! any sequencer starts.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{EnemyKind, PathId, WaveDefinition};

/// Waypoints relative to a path origin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathDescriptor {
    /// Offset added to every waypoint.
    #[serde(default)]
    pub origin: DVec2,
    pub waypoints: Vec<DVec2>,
}

impl PathDescriptor {
    pub fn new(waypoints: Vec<DVec2>) -> Self {
        Self {
            origin: DVec2::ZERO,
            waypoints,
        }
    }

    pub fn with_origin(mut self, origin: DVec2) -> Self {
        self.origin = origin;
        self
    }

    /// World-space waypoints in traversal order.
    pub fn world_points(&self) -> Vec<DVec2> {
        self.waypoints.iter().map(|p| self.origin + *p).collect()
    }
}

/// A complete, loadable scenario.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub paths: BTreeMap<PathId, PathDescriptor>,
    pub kinds: Vec<EnemyKind>,
    pub waves: Vec<WaveDefinition>,
    /// Pause after each wave's last spawn interval (seconds).
    #[serde(default)]
    pub time_between_waves: f64,
    /// Restart from the first wave after the last one.
    #[serde(default)]
    pub looping: bool,
}

impl ScenarioConfig {
    /// Parse and validate a scenario from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: ScenarioConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a scenario file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every invariant that does not need a running sequencer.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.waves.is_empty() {
            return Err(ConfigError::EmptyWaveList);
        }
        if !(self.time_between_waves >= 0.0 && self.time_between_waves.is_finite()) {
            return Err(ConfigError::NegativeDelay(self.time_between_waves));
        }

        for (id, descriptor) in &self.paths {
            if descriptor.waypoints.is_empty() {
                return Err(ConfigError::EmptyPath(id.clone()));
            }
        }

        let mut kind_ids = HashSet::new();
        for kind in &self.kinds {
            kind.validate()?;
            if !kind_ids.insert(kind.id.as_str()) {
                return Err(ConfigError::DuplicateEnemyKind(kind.id.clone()));
            }
        }

        for (index, wave) in self.waves.iter().enumerate() {
            wave.validate(index)?;
            if !self.paths.contains_key(&wave.path) {
                return Err(ConfigError::UnknownPath {
                    wave: index,
                    path: wave.path.clone(),
                });
            }
            for (slot, kind) in wave.enemies.iter().enumerate() {
                if !kind_ids.contains(kind.as_str()) {
                    return Err(ConfigError::UnknownEnemyKind {
                        wave: index,
                        slot,
                        kind: kind.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
