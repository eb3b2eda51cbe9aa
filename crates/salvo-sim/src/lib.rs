//! Simulation engine for Salvo.
//!
//! Owns the hecs entity registry, runs the wave sequencer and the
//! per-tick systems, and produces `SimSnapshot`s for the embedding
//! application.

pub mod engine;
pub mod path_table;
pub mod registry;
pub mod scenario;
pub mod score;
pub mod sequencer;
pub mod spawn_factory;
pub mod spawn_timer;
pub mod systems;

pub use engine::{Collaborators, SimConfig, SimulationEngine};
pub use salvo_core as core;
