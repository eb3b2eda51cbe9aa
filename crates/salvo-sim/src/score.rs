//! Running tally of spawns and retirements.
//!
//! Lives in `SimulationEngine`, NOT as ECS state.

use salvo_core::enums::RetireReason;
use salvo_core::state::ScoreView;

#[derive(Debug, Clone, Default)]
pub struct ScoreState {
    pub spawned: u32,
    pub path_completed: u32,
    pub killed: u32,
    pub out_of_bounds: u32,
    pub destroyed_externally: u32,
    /// Sum of `score_value` over killed enemies.
    pub score: u64,
}

impl ScoreState {
    /// Count one retirement. Only kills pay out.
    pub fn record(&mut self, reason: RetireReason, score_value: u32) {
        match reason {
            RetireReason::PathComplete => self.path_completed += 1,
            RetireReason::Killed => {
                self.killed += 1;
                self.score += u64::from(score_value);
            }
            RetireReason::OutOfBounds => self.out_of_bounds += 1,
            RetireReason::External => self.destroyed_externally += 1,
        }
    }

    /// Enemies retired for any reason.
    pub fn retired(&self) -> u32 {
        self.path_completed + self.killed + self.out_of_bounds + self.destroyed_externally
    }

    pub fn view(&self) -> ScoreView {
        ScoreView {
            spawned: self.spawned,
            path_completed: self.path_completed,
            killed: self.killed,
            out_of_bounds: self.out_of_bounds,
            destroyed_externally: self.destroyed_externally,
            score: self.score,
        }
    }
}
