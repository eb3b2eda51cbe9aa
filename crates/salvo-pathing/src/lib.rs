//! Movement rules for Salvo enemies.
//!
//! Implements the path follower state machine and the chase steering used
//! by path-independent trackers.

pub mod follower;
pub mod steering;

pub use salvo_core as core;

#[cfg(test)]
mod tests;
