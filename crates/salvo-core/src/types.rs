//! Fundamental data types: waves, paths, timing and enemy kinds.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::Behavior;
use crate::error::ConfigError;

/// Identifier of a registered waypoint path.
pub type PathId = String;

/// Identifier of an enemy kind in the roster.
pub type EnemyKindId = String;

/// Opaque handle issued by the external entity host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityHandle(pub u64);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of ticks advanced so far.
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Bounded-random interval parameters (seconds).
///
/// Used for the gap between spawns within a wave and for the firing
/// cadence of armed enemies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnTiming {
    pub base: f64,
    pub variance: f64,
    pub minimum: f64,
}

impl Default for SpawnTiming {
    fn default() -> Self {
        Self {
            base: DEFAULT_SPAWN_INTERVAL,
            variance: DEFAULT_SPAWN_VARIANCE,
            minimum: DEFAULT_MINIMUM_SPAWN_INTERVAL,
        }
    }
}

impl SpawnTiming {
    pub fn new(base: f64, variance: f64, minimum: f64) -> Self {
        Self {
            base,
            variance,
            minimum,
        }
    }

    /// Lower edge of the raw draw, before the minimum is applied.
    pub fn low(&self) -> f64 {
        self.base - self.variance
    }

    /// Upper edge of the raw draw.
    pub fn high(&self) -> f64 {
        self.base + self.variance
    }

    /// Check that all values are finite, non-negative and `minimum <= base`.
    pub fn validate(&self, context: &str) -> Result<(), ConfigError> {
        let invalid = |reason: &'static str| ConfigError::InvalidTiming {
            context: context.to_string(),
            reason,
        };
        if !(self.base.is_finite() && self.variance.is_finite() && self.minimum.is_finite()) {
            return Err(invalid("values must be finite"));
        }
        if self.base < 0.0 || self.variance < 0.0 || self.minimum < 0.0 {
            return Err(invalid("values must be non-negative"));
        }
        if self.minimum > self.base {
            return Err(invalid("minimum must not exceed base"));
        }
        Ok(())
    }
}

/// One reusable wave: which enemies, in what order, along which path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveDefinition {
    /// Enemy kinds in slot order. Repeats are allowed.
    pub enemies: Vec<EnemyKindId>,
    /// Path every enemy of this wave follows.
    pub path: PathId,
    /// Movement speed shared by all path followers of this wave (units/s).
    #[serde(default = "default_move_speed")]
    pub move_speed: f64,
    #[serde(default)]
    pub timing: SpawnTiming,
}

fn default_move_speed() -> f64 {
    DEFAULT_MOVE_SPEED
}

impl WaveDefinition {
    pub fn new(
        enemies: Vec<EnemyKindId>,
        path: impl Into<PathId>,
        move_speed: f64,
        timing: SpawnTiming,
    ) -> Self {
        Self {
            enemies,
            path: path.into(),
            move_speed,
            timing,
        }
    }

    /// Number of slots (spawn events per pass).
    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    /// Kind spawned at `slot`. Panics when `slot` is out of range.
    pub fn enemy_kind(&self, slot: usize) -> &EnemyKindId {
        assert!(
            slot < self.enemies.len(),
            "slot {slot} out of range for wave with {} enemies",
            self.enemies.len()
        );
        &self.enemies[slot]
    }

    /// Check the scalar invariants of wave `index`.
    /// Path and kind references are checked by whoever owns the tables.
    pub fn validate(&self, index: usize) -> Result<(), ConfigError> {
        if !(self.move_speed > 0.0 && self.move_speed.is_finite()) {
            return Err(ConfigError::NonPositiveSpeed {
                wave: index,
                speed: self.move_speed,
            });
        }
        self.timing.validate(&format!("wave {index}"))
    }
}

/// Ordered waypoint sequence. Insertion order is traversal order.
///
/// Never empty, including when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<DVec2>", into = "Vec<DVec2>")]
pub struct WaypointPath {
    points: Vec<DVec2>,
}

impl WaypointPath {
    /// Build a path, rejecting an empty point list.
    pub fn new(id: &str, points: Vec<DVec2>) -> Result<Self, ConfigError> {
        if points.is_empty() {
            return Err(ConfigError::EmptyPath(id.to_string()));
        }
        Ok(Self { points })
    }

    /// Spawn anchor of the path.
    pub fn first(&self) -> DVec2 {
        self.points[0]
    }

    pub fn last(&self) -> DVec2 {
        self.points[self.points.len() - 1]
    }

    pub fn get(&self, index: usize) -> Option<DVec2> {
        self.points.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[DVec2] {
        &self.points
    }
}

impl TryFrom<Vec<DVec2>> for WaypointPath {
    type Error = ConfigError;

    fn try_from(points: Vec<DVec2>) -> Result<Self, Self::Error> {
        Self::new("<inline>", points)
    }
}

impl From<WaypointPath> for Vec<DVec2> {
    fn from(path: WaypointPath) -> Self {
        path.points
    }
}

/// Axis-aligned play area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl Bounds {
    pub fn new(min: DVec2, max: DVec2) -> Self {
        Self { min, max }
    }

    /// Whether `point` lies inside the bounds grown by `margin` on every side.
    pub fn contains_with_margin(&self, point: DVec2, margin: f64) -> bool {
        point.x >= self.min.x - margin
            && point.x <= self.max.x + margin
            && point.y >= self.min.y - margin
            && point.y <= self.max.y + margin
    }
}

/// Firing cadence and projectile parameters of an armed enemy kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FiringProfile {
    /// Seconds between shots, drawn like a spawn interval.
    #[serde(default = "default_cadence")]
    pub cadence: SpawnTiming,
    #[serde(default = "default_projectile_speed")]
    pub projectile_speed: f64,
}

fn default_cadence() -> SpawnTiming {
    SpawnTiming::new(
        DEFAULT_FIRING_INTERVAL,
        DEFAULT_FIRING_VARIANCE,
        DEFAULT_MINIMUM_FIRING_INTERVAL,
    )
}

fn default_projectile_speed() -> f64 {
    DEFAULT_PROJECTILE_SPEED
}

impl Default for FiringProfile {
    fn default() -> Self {
        Self {
            cadence: default_cadence(),
            projectile_speed: default_projectile_speed(),
        }
    }
}

/// One entry of the enemy roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyKind {
    pub id: EnemyKindId,
    #[serde(default)]
    pub behavior: Behavior,
    /// `Some` for kinds that fire continuously once spawned.
    #[serde(default)]
    pub firing: Option<FiringProfile>,
    #[serde(default = "default_max_health")]
    pub max_health: i32,
    #[serde(default = "default_score_value")]
    pub score_value: u32,
}

fn default_max_health() -> i32 {
    DEFAULT_MAX_HEALTH
}

fn default_score_value() -> u32 {
    DEFAULT_SCORE_VALUE
}

impl EnemyKind {
    /// A path-following kind with default health and no weapon.
    pub fn follower(id: impl Into<EnemyKindId>) -> Self {
        Self {
            id: id.into(),
            behavior: Behavior::FollowPath,
            firing: None,
            max_health: DEFAULT_MAX_HEALTH,
            score_value: DEFAULT_SCORE_VALUE,
        }
    }

    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn with_firing(mut self, profile: FiringProfile) -> Self {
        self.firing = Some(profile);
        self
    }

    pub fn with_health(mut self, max_health: i32, score_value: u32) -> Self {
        self.max_health = max_health;
        self.score_value = score_value;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_health <= 0 {
            return Err(ConfigError::NonPositiveHealth {
                kind: self.id.clone(),
                health: self.max_health,
            });
        }
        if let Behavior::Track { speed } = self.behavior {
            if !(speed > 0.0 && speed.is_finite()) {
                return Err(ConfigError::NonPositiveTrackSpeed {
                    kind: self.id.clone(),
                    speed,
                });
            }
        }
        if let Some(profile) = &self.firing {
            profile.cadence.validate(&format!("firing cadence of `{}`", self.id))?;
        }
        Ok(())
    }
}
