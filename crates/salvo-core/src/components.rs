//! ECS components for hecs entities.
//!
//! Components are plain data structs with no game logic.
//! Movement and firing live in the simulation systems.

use std::fmt;
use std::sync::Arc;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::FollowState;
use crate::host::SharedTargetProvider;
use crate::types::{EnemyKindId, EntityHandle, FiringProfile, WaypointPath};

/// Marks an entity as a wave-spawned enemy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKindId,
    /// Index of the wave in the running list.
    pub wave_index: usize,
    pub slot: usize,
}

/// World position (units).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub DVec2);

/// Cosmetic facing in degrees, counter-clockwise from +X.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    pub degrees: f64,
}

/// Handle the external host issued for this entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostHandle(pub EntityHandle);

/// Walks a shared waypoint path at a fixed speed.
#[derive(Debug, Clone)]
pub struct PathFollower {
    pub path: Arc<WaypointPath>,
    pub speed: f64,
    pub state: FollowState,
    /// Step length for the spawn tick: the part of the tick after the
    /// slot's scheduled time. Cleared after the first step.
    pub first_step_secs: Option<f64>,
}

impl PathFollower {
    pub fn new(path: Arc<WaypointPath>, speed: f64) -> Self {
        Self {
            path,
            speed,
            state: FollowState::default(),
            first_step_secs: None,
        }
    }
}

/// Chases the provider's current target.
#[derive(Clone)]
pub struct Tracker {
    pub speed: f64,
    pub target: SharedTargetProvider,
}

impl fmt::Debug for Tracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracker")
            .field("speed", &self.speed)
            .field("target", &self.target.current_target())
            .finish()
    }
}

/// Continuous firing state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shooter {
    pub profile: FiringProfile,
    /// Whether the shooter is currently firing.
    pub armed: bool,
    /// Seconds until the next shot. Zero fires on the next firing pass.
    pub cooldown_secs: f64,
}

impl Shooter {
    /// An armed shooter that fires on its first tick.
    pub fn armed(profile: FiringProfile) -> Self {
        Self {
            profile,
            armed: true,
            cooldown_secs: 0.0,
        }
    }
}

/// Hit points and the score paid out on a kill.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
    pub max: i32,
    pub score_value: u32,
}
