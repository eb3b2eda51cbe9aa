//! Cleanup system: flags trackers that have left the play area.

use hecs::{Entity, World};

use salvo_core::components::{Position, Tracker};
use salvo_core::constants::OUT_OF_BOUNDS_MARGIN;
use salvo_core::enums::RetireReason;
use salvo_core::types::Bounds;

/// Push every tracker outside `bounds` (plus margin) to `retire`.
/// Path followers retire at their last waypoint and are never flagged.
/// No bounds, no cleanup.
pub fn run(world: &mut World, bounds: Option<Bounds>, retire: &mut Vec<(Entity, RetireReason)>) {
    let Some(bounds) = bounds else {
        return;
    };

    for (entity, (pos, _tracker)) in world.query_mut::<(&Position, &Tracker)>() {
        if !bounds.contains_with_margin(pos.0, OUT_OF_BOUNDS_MARGIN) {
            retire.push((entity, RetireReason::OutOfBounds));
        }
    }
}
