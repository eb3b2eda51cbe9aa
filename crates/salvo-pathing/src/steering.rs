//! Chase steering and cosmetic facing.

use glam::DVec2;

/// Result of one chase step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteerUpdate {
    pub position: DVec2,
    /// Unit direction of travel, zero when holding position.
    pub direction: DVec2,
}

/// Move toward `target` at `speed` for `dt` seconds.
///
/// With no target the entity holds position. Unlike path following the
/// step is not clamped at the target, so a chaser circles a still target.
pub fn chase(position: DVec2, target: Option<DVec2>, speed: f64, dt: f64) -> SteerUpdate {
    let Some(target) = target else {
        return SteerUpdate {
            position,
            direction: DVec2::ZERO,
        };
    };
    let direction = (target - position).normalize_or_zero();
    SteerUpdate {
        position: position + direction * speed * dt.max(0.0),
        direction,
    }
}

/// Facing angle in degrees (counter-clockwise from +X) for a travel
/// direction. A zero direction keeps `previous`.
pub fn facing_degrees(direction: DVec2, previous: f64) -> f64 {
    if direction.length_squared() <= f64::EPSILON {
        previous
    } else {
        direction.y.atan2(direction.x).to_degrees()
    }
}
