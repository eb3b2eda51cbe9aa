//! Tracking system — moves every `Tracker` toward its target.

use hecs::World;

use salvo_core::components::{Heading, Position, Tracker};

use salvo_pathing::steering::{chase, facing_degrees};

pub fn run(world: &mut World, dt: f64) {
    for (_entity, (pos, heading, tracker)) in
        world.query_mut::<(&mut Position, &mut Heading, &Tracker)>()
    {
        let update = chase(pos.0, tracker.target.current_target(), tracker.speed, dt);
        pos.0 = update.position;
        heading.degrees = facing_degrees(update.direction, heading.degrees);
    }
}
