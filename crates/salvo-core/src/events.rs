//! Events emitted by the simulation for presentation and scoring.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::RetireReason;
use crate::types::{EnemyKindId, EntityHandle};

/// Everything observable that happened during one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// The sequencer began a wave.
    WaveStarted { wave_index: usize, pass: u32 },
    /// An enemy was materialized for a wave slot.
    EnemySpawned {
        handle: EntityHandle,
        kind: EnemyKindId,
        wave_index: usize,
        slot: usize,
        position: DVec2,
        /// Sequencer time the slot was due, in seconds since start.
        scheduled_at: f64,
    },
    /// An enemy left the registry.
    EnemyRetired {
        handle: EntityHandle,
        kind: EnemyKindId,
        reason: RetireReason,
    },
    /// An armed enemy fired a projectile.
    ShotFired {
        handle: EntityHandle,
        origin: DVec2,
        direction: DVec2,
        speed: f64,
    },
    /// An enemy took damage and survived.
    EnemyDamaged { handle: EntityHandle, remaining: i32 },
    /// A non-looping wave list completed.
    SequencerFinished { passes: u32 },
    /// The sequencer was halted before finishing.
    SequencerStopped { wave_index: usize, slot: usize },
}
