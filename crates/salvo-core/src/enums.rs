//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// How a spawned enemy moves once alive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Behavior {
    /// Walk the wave's waypoint path and retire at its end.
    #[default]
    FollowPath,
    /// Chase the current target at a fixed speed, ignoring the path.
    Track { speed: f64 },
}

/// Path follower state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FollowState {
    /// Heading for the waypoint at this index.
    Advancing(usize),
    /// Path complete. Terminal.
    Retired,
}

impl Default for FollowState {
    fn default() -> Self {
        FollowState::Advancing(0)
    }
}

/// Why an enemy left the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RetireReason {
    /// Walked past the last waypoint.
    PathComplete,
    /// Health reached zero.
    Killed,
    /// Drifted outside the play bounds.
    OutOfBounds,
    /// Destroyed by a collaborator outside the simulation.
    External,
}

/// Wave sequencer lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequencerStatus {
    /// No wave list has been started.
    #[default]
    Idle,
    Running,
    /// Halted by a stop request.
    Stopped,
    /// Completed its single pass.
    Finished,
}

/// Built-in scenarios.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScenarioId {
    /// Two short waves of unarmed drifters.
    #[default]
    Training,
    /// Five mixed waves with gunners and a chaser.
    Gauntlet,
    /// The gauntlet roster on a loop.
    Endless,
}
