//! Simulation snapshot — the complete visible state after each tick.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::SequencerStatus;
use crate::events::SimEvent;
use crate::types::{EnemyKindId, EntityHandle, SimTime};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub paused: bool,
    pub sequencer: SequencerView,
    pub enemies: Vec<EnemyView>,
    pub events: Vec<SimEvent>,
    pub score: ScoreView,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SequencerView {
    pub status: SequencerStatus,
    pub wave_index: usize,
    pub slot: usize,
    /// Completed passes over the wave list.
    pub pass: u32,
    pub looping: bool,
    /// Seconds until the sequencer next wakes up.
    pub resume_in_secs: f64,
}

/// A live enemy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub handle: EntityHandle,
    pub kind: EnemyKindId,
    pub position: DVec2,
    pub heading: f64,
    /// Target waypoint for path followers, `None` for trackers.
    pub waypoint_index: Option<usize>,
    pub health: i32,
    pub firing: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub spawned: u32,
    pub path_completed: u32,
    pub killed: u32,
    pub out_of_bounds: u32,
    pub destroyed_externally: u32,
    pub score: u64,
}
