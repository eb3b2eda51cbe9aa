//! Path follower finite state machine.
//!
//! Pure functions that advance one entity along a waypoint path.
//! No ECS dependency — operates on plain data.

use glam::DVec2;

use salvo_core::constants::WAYPOINT_EPSILON;
use salvo_core::enums::FollowState;
use salvo_core::types::WaypointPath;

/// Input to the follower FSM for a single entity.
pub struct FollowContext<'a> {
    pub position: DVec2,
    pub path: &'a WaypointPath,
    pub speed: f64,
    pub state: FollowState,
    pub dt: f64,
}

/// Output from the follower FSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowUpdate {
    pub position: DVec2,
    pub state: FollowState,
    /// The waypoint index moved forward this step.
    pub advanced: bool,
    /// The follower entered `Retired` this step.
    pub retired: bool,
}

/// Evaluate one tick of path following.
pub fn step(ctx: &FollowContext) -> FollowUpdate {
    let index = match ctx.state {
        FollowState::Retired => {
            return FollowUpdate {
                position: ctx.position,
                state: FollowState::Retired,
                advanced: false,
                retired: false,
            }
        }
        FollowState::Advancing(index) => index,
    };

    // An index past the end can only come from a hand-built state.
    let Some(target) = ctx.path.get(index) else {
        return FollowUpdate {
            position: ctx.position,
            state: FollowState::Retired,
            advanced: false,
            retired: true,
        };
    };

    let position = move_towards(ctx.position, target, ctx.speed * ctx.dt.max(0.0));

    if position.distance(target) >= WAYPOINT_EPSILON {
        return FollowUpdate {
            position,
            state: ctx.state,
            advanced: false,
            retired: false,
        };
    }

    let next = index + 1;
    if next >= ctx.path.len() {
        FollowUpdate {
            position,
            state: FollowState::Retired,
            advanced: true,
            retired: true,
        }
    } else {
        FollowUpdate {
            position,
            state: FollowState::Advancing(next),
            advanced: true,
            retired: false,
        }
    }
}

/// Move `current` toward `target` by at most `max_delta`, never past it.
pub fn move_towards(current: DVec2, target: DVec2, max_delta: f64) -> DVec2 {
    let offset = target - current;
    let distance = offset.length();
    if distance <= max_delta || distance == 0.0 {
        target
    } else {
        current + offset / distance * max_delta
    }
}
