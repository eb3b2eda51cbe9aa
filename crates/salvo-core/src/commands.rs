//! Commands sent to the simulation from outside the tick loop.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::types::EntityHandle;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimCommand {
    /// Halt the wave sequencer. Live enemies keep moving.
    StopWaves,
    /// Apply damage to an enemy. Zero health retires it.
    Damage { handle: EntityHandle, amount: i32 },
    /// Destroy an enemy immediately.
    Destroy { handle: EntityHandle },
    /// Arm or disarm an enemy's weapon.
    SetFiring { handle: EntityHandle, firing: bool },
    /// Set time scale (1.0 = normal, 0.0 = frozen).
    SetTimeScale { scale: f64 },
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
}
