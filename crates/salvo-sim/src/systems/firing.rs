//! Firing system — counts down armed shooters and reports each shot.
//!
//! Projectiles are not simulated here. Each expiry emits a `ShotFired`
//! event aimed at the current target, or straight down without one.

use glam::DVec2;
use hecs::World;
use rand_chacha::ChaCha8Rng;

use salvo_core::components::{HostHandle, Position, Shooter};
use salvo_core::events::SimEvent;
use salvo_core::host::TargetProvider;

use crate::spawn_timer::draw_interval;

/// Direction of a shot fired with no target.
pub const DEFAULT_SHOT_DIRECTION: DVec2 = DVec2::NEG_Y;

/// Run the firing system. At most one shot per shooter per tick.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    target: &dyn TargetProvider,
    dt: f64,
    events: &mut Vec<SimEvent>,
) {
    let target = target.current_target();

    for (_entity, (pos, handle, shooter)) in
        world.query_mut::<(&Position, &HostHandle, &mut Shooter)>()
    {
        if !shooter.armed {
            continue;
        }

        shooter.cooldown_secs -= dt;
        if shooter.cooldown_secs > 0.0 {
            continue;
        }

        let direction = target
            .map(|t| (t - pos.0).normalize_or_zero())
            .filter(|d| *d != DVec2::ZERO)
            .unwrap_or(DEFAULT_SHOT_DIRECTION);

        events.push(SimEvent::ShotFired {
            handle: handle.0,
            origin: pos.0,
            direction,
            speed: shooter.profile.projectile_speed,
        });
        shooter.cooldown_secs = draw_interval(rng, &shooter.profile.cadence);
    }
}
