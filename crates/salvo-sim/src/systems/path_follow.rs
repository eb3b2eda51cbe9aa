//! Path-follow system — advances every `PathFollower` one tick.
//!
//! Calls the follower FSM from salvo-pathing, then writes the result back
//! into the entity's components.

use hecs::{Entity, World};

use salvo_core::components::{Heading, PathFollower, Position};
use salvo_core::enums::RetireReason;

use salvo_pathing::follower::{step, FollowContext};
use salvo_pathing::steering::facing_degrees;

/// Run the path-follow system. Followers that finish their path this tick
/// are pushed to `retire`. A follower spawned this tick moves only for the
/// time left after its scheduled spawn.
pub fn run(world: &mut World, dt: f64, retire: &mut Vec<(Entity, RetireReason)>) {
    for (entity, (pos, heading, follower)) in
        world.query_mut::<(&mut Position, &mut Heading, &mut PathFollower)>()
    {
        let step_secs = follower.first_step_secs.take().unwrap_or(dt);
        let update = step(&FollowContext {
            position: pos.0,
            path: &follower.path,
            speed: follower.speed,
            state: follower.state,
            dt: step_secs,
        });

        heading.degrees = facing_degrees(update.position - pos.0, heading.degrees);
        pos.0 = update.position;
        follower.state = update.state;

        if update.retired {
            retire.push((entity, RetireReason::PathComplete));
        }
    }
}
