//! Salvo headless runner.
//!
//! This crate wires the simulation to a fixed-rate game loop thread and
//! exposes it through a command channel and a shared latest snapshot.

pub mod game_loop;
pub mod logging;
pub mod state;

pub use salvo_core as core;
