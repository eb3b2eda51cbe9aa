//! Core types and definitions for the Salvo spawn orchestration.
//!
//! This crate defines the vocabulary shared across all other crates:
//! wave definitions, components, commands, snapshots, events, constants,
//! the collaborator traits and scenario configuration loading.
//! It has no dependency on the ECS or any runtime framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod host;
pub mod state;
pub mod types;

pub use error::ConfigError;

#[cfg(test)]
mod tests;
