//! Snapshot system: queries the ECS world and builds a complete SimSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use salvo_core::components::*;
use salvo_core::enums::FollowState;
use salvo_core::events::SimEvent;
use salvo_core::state::*;
use salvo_core::types::SimTime;

use crate::score::ScoreState;

/// Build a complete SimSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    paused: bool,
    sequencer: SequencerView,
    events: Vec<SimEvent>,
    score: &ScoreState,
) -> SimSnapshot {
    SimSnapshot {
        time: *time,
        paused,
        sequencer,
        enemies: build_enemies(world),
        events,
        score: score.view(),
    }
}

/// Build EnemyView list, sorted by handle.
fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(
            &Enemy,
            &HostHandle,
            &Position,
            &Heading,
            Option<&PathFollower>,
            Option<&Health>,
            Option<&Shooter>,
        )>()
        .iter()
        .map(
            |(_, (enemy, handle, pos, heading, follower, health, shooter))| EnemyView {
                handle: handle.0,
                kind: enemy.kind.clone(),
                position: pos.0,
                heading: heading.degrees,
                waypoint_index: follower.and_then(|f| match f.state {
                    FollowState::Advancing(index) => Some(index),
                    FollowState::Retired => None,
                }),
                health: health.map_or(0, |h| h.current),
                firing: shooter.is_some_and(|s| s.armed),
            },
        )
        .collect();

    enemies.sort_by_key(|e| e.handle);
    enemies
}
