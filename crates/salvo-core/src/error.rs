//! Configuration error taxonomy.
//!
//! These are reported to the caller at load or start time. Programming
//! errors (slot out of range, unregistered path lookups) panic instead.

use thiserror::Error;

use crate::types::{EnemyKindId, PathId};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("wave list is empty")]
    EmptyWaveList,

    #[error("path `{0}` has no waypoints")]
    EmptyPath(PathId),

    #[error("wave {wave} references unknown path `{path}`")]
    UnknownPath { wave: usize, path: PathId },

    #[error("wave {wave} slot {slot} references unknown enemy kind `{kind}`")]
    UnknownEnemyKind {
        wave: usize,
        slot: usize,
        kind: EnemyKindId,
    },

    #[error("enemy kind `{0}` is defined more than once")]
    DuplicateEnemyKind(EnemyKindId),

    #[error("wave {wave} move speed must be positive, got {speed}")]
    NonPositiveSpeed { wave: usize, speed: f64 },

    #[error("enemy kind `{kind}` tracking speed must be positive, got {speed}")]
    NonPositiveTrackSpeed { kind: EnemyKindId, speed: f64 },

    #[error("enemy kind `{kind}` max health must be positive, got {health}")]
    NonPositiveHealth { kind: EnemyKindId, health: i32 },

    #[error("invalid timing for {context}: {reason}")]
    InvalidTiming {
        context: String,
        reason: &'static str,
    },

    #[error("time between waves must be a non-negative number, got {0}")]
    NegativeDelay(f64),

    #[error("looping wave list never waits between passes")]
    ZeroLengthLoop,

    #[error("failed to parse scenario: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
}
