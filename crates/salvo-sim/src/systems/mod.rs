//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are pure functions that take `&mut World` (or `&World` for read-only).
//! They do not own state; all state lives in components. Systems never
//! despawn: entities to retire go into the engine's retire buffer.

pub mod cleanup;
pub mod firing;
pub mod path_follow;
pub mod snapshot;
pub mod tracking;
