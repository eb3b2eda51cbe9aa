//! Spawn factory — materializes one enemy per wave slot.
//!
//! Resolves the slot's kind, places it at the path's first waypoint plus a
//! small jitter, mirrors it into the host, and attaches the movement and
//! firing components its kind calls for.

use std::collections::HashMap;
use std::sync::Arc;

use glam::DVec2;
use hecs::{Entity, EntityBuilder};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use salvo_core::components::*;
use salvo_core::constants::SPAWN_JITTER;
use salvo_core::enums::Behavior;
use salvo_core::error::ConfigError;
use salvo_core::events::SimEvent;
use salvo_core::host::{EntityHost, SharedTargetProvider};
use salvo_core::types::{EnemyKind, EnemyKindId, WaveDefinition};
use salvo_pathing::steering::facing_degrees;

use crate::path_table::PathTable;
use crate::registry::EntityRegistry;
use crate::sequencer::SpawnEvent;

/// Everything a spawn writes to besides the factory itself.
pub struct SpawnTargets<'a> {
    pub registry: &'a mut EntityRegistry,
    pub host: &'a mut dyn EntityHost,
    pub target: &'a SharedTargetProvider,
    pub events: &'a mut Vec<SimEvent>,
}

pub struct SpawnFactory {
    kinds: HashMap<EnemyKindId, EnemyKind>,
    paths: PathTable,
    rng: ChaCha8Rng,
}

impl SpawnFactory {
    pub fn new(seed: u64) -> Self {
        Self {
            kinds: HashMap::new(),
            paths: PathTable::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Add or replace an enemy kind.
    pub fn register_kind(&mut self, kind: EnemyKind) -> Result<(), ConfigError> {
        kind.validate()?;
        self.kinds.insert(kind.id.clone(), kind);
        Ok(())
    }

    pub fn kind(&self, id: &str) -> Option<&EnemyKind> {
        self.kinds.get(id)
    }

    pub fn paths(&self) -> &PathTable {
        &self.paths
    }

    pub fn paths_mut(&mut self) -> &mut PathTable {
        &mut self.paths
    }

    /// Check that every path and kind a wave list names is registered.
    pub fn check_references(&self, waves: &[Arc<WaveDefinition>]) -> Result<(), ConfigError> {
        for (index, wave) in waves.iter().enumerate() {
            if !self.paths.contains(&wave.path) {
                return Err(ConfigError::UnknownPath {
                    wave: index,
                    path: wave.path.clone(),
                });
            }
            for (slot, kind) in wave.enemies.iter().enumerate() {
                if !self.kinds.contains_key(kind) {
                    return Err(ConfigError::UnknownEnemyKind {
                        wave: index,
                        slot,
                        kind: kind.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Uniform offset in `[-SPAWN_JITTER, SPAWN_JITTER]` on each axis.
    pub fn jitter(&mut self) -> DVec2 {
        DVec2::new(
            self.rng.gen_range(-SPAWN_JITTER..=SPAWN_JITTER),
            self.rng.gen_range(-SPAWN_JITTER..=SPAWN_JITTER),
        )
    }

    /// Materialize the enemy for `event`.
    ///
    /// # Panics
    /// If the slot is out of range or names an unregistered kind or path.
    pub fn spawn(&mut self, event: &SpawnEvent, out: SpawnTargets<'_>) -> Entity {
        let wave = &event.wave;
        let kind_id = wave.enemy_kind(event.slot);
        let kind = match self.kinds.get(kind_id) {
            Some(kind) => kind.clone(),
            None => panic!("enemy kind `{kind_id}` spawned before it was registered"),
        };
        let path = self.paths.resolve(&wave.path);

        let position = path.first() + self.jitter();
        let heading = match (kind.behavior, out.target.current_target()) {
            (Behavior::Track { .. }, Some(target)) => facing_degrees(target - position, 0.0),
            _ => path
                .get(1)
                .map_or(0.0, |next| facing_degrees(next - position, 0.0)),
        };

        let handle = out.host.create(kind_id, position, heading);

        let mut builder = EntityBuilder::new();
        builder
            .add(Enemy {
                kind: kind.id.clone(),
                wave_index: event.wave_index,
                slot: event.slot,
            })
            .add(Position(position))
            .add(Heading { degrees: heading })
            .add(HostHandle(handle))
            .add(Health {
                current: kind.max_health,
                max: kind.max_health,
                score_value: kind.score_value,
            });

        match kind.behavior {
            Behavior::FollowPath => {
                builder.add(PathFollower::new(path, wave.move_speed));
            }
            Behavior::Track { speed } => {
                builder.add(Tracker {
                    speed,
                    target: Arc::clone(out.target),
                });
            }
        }

        if let Some(profile) = kind.firing {
            builder.add(Shooter::armed(profile));
            out.host.set_firing(handle, true);
        }

        let entity = out.registry.insert(handle, builder.build());

        debug!(
            handle = handle.0,
            kind = %kind.id,
            wave = event.wave_index,
            slot = event.slot,
            "enemy spawned"
        );
        out.events.push(SimEvent::EnemySpawned {
            handle,
            kind: kind.id,
            wave_index: event.wave_index,
            slot: event.slot,
            position,
            scheduled_at: event.scheduled_at,
        });

        entity
    }
}
