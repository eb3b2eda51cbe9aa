//! Simulation engine — the core of the spawner.
//!
//! `SimulationEngine` owns the entity registry, the wave sequencer and the
//! spawn factory, processes queued commands, runs all systems, and produces
//! `SimSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;
use std::sync::Arc;

use hecs::{Entity, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use salvo_core::commands::SimCommand;
use salvo_core::components::{Health, PathFollower, Shooter};
use salvo_core::config::{PathDescriptor, ScenarioConfig};
use salvo_core::enums::RetireReason;
use salvo_core::error::ConfigError;
use salvo_core::events::SimEvent;
use salvo_core::host::{
    BoundsProvider, EntityHost, HeadlessHost, SharedTarget, SharedTargetProvider, StaticBounds,
};
use salvo_core::state::{SequencerView, SimSnapshot};
use salvo_core::types::{EnemyKind, EntityHandle, PathId, SimTime, WaveDefinition};

use crate::registry::EntityRegistry;
use crate::score::ScoreState;
use crate::sequencer::{SpawnEvent, SpawnSink, StopSignal, WaveSequencer};
use crate::spawn_factory::{SpawnFactory, SpawnTargets};
use crate::spawn_timer::SpawnTimer;
use crate::systems;

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
        }
    }
}

/// The outside world as seen by the engine.
pub struct Collaborators {
    pub host: Box<dyn EntityHost + Send>,
    pub target: SharedTargetProvider,
    pub bounds: Box<dyn BoundsProvider + Send>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            host: Box::new(HeadlessHost::new()),
            target: Arc::new(SharedTarget::default()),
            bounds: Box::new(StaticBounds(None)),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    registry: EntityRegistry,
    time: SimTime,
    paused: bool,
    time_scale: f64,
    rng: ChaCha8Rng,
    factory: SpawnFactory,
    sequencer: Option<WaveSequencer>,
    collaborators: Collaborators,
    command_queue: VecDeque<SimCommand>,
    retire_buffer: Vec<(Entity, RetireReason)>,
    events: Vec<SimEvent>,
    score: ScoreState,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig, collaborators: Collaborators) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let factory = SpawnFactory::new(rng.gen());
        Self {
            registry: EntityRegistry::new(),
            time: SimTime::default(),
            paused: false,
            time_scale: config.time_scale,
            rng,
            factory,
            sequencer: None,
            collaborators,
            command_queue: VecDeque::new(),
            retire_buffer: Vec::new(),
            events: Vec::new(),
            score: ScoreState::default(),
        }
    }

    /// Engine with a headless host and no target or bounds.
    pub fn headless(config: SimConfig) -> Self {
        Self::new(config, Collaborators::default())
    }

    // --- Setup ---

    pub fn register_path(
        &mut self,
        id: impl Into<PathId>,
        descriptor: &PathDescriptor,
    ) -> Result<(), ConfigError> {
        self.factory.paths_mut().register(id, descriptor)?;
        Ok(())
    }

    pub fn register_kind(&mut self, kind: EnemyKind) -> Result<(), ConfigError> {
        self.factory.register_kind(kind)
    }

    /// Validate `waves` against the registered paths and kinds and start a
    /// new sequencer. A sequencer that is still running is stopped first;
    /// its live enemies are left alone.
    pub fn start_waves(
        &mut self,
        waves: Vec<WaveDefinition>,
        time_between_waves: f64,
        looping: bool,
    ) -> Result<(), ConfigError> {
        let waves: Vec<Arc<WaveDefinition>> = waves.into_iter().map(Arc::new).collect();
        self.factory.check_references(&waves)?;

        let timer = SpawnTimer::seeded(self.rng.gen());
        let sequencer = WaveSequencer::start(waves, time_between_waves, looping, timer)?;

        if let Some(previous) = self.sequencer.replace(sequencer) {
            if previous.is_running() {
                info!("previous wave sequencer replaced");
                previous.stop();
            }
        }
        Ok(())
    }

    /// Register everything in `config` and start its waves.
    pub fn load_scenario(&mut self, config: &ScenarioConfig) -> Result<(), ConfigError> {
        config.validate()?;
        for (id, descriptor) in &config.paths {
            self.register_path(id.clone(), descriptor)?;
        }
        for kind in &config.kinds {
            self.register_kind(kind.clone())?;
        }
        self.start_waves(
            config.waves.clone(),
            config.time_between_waves,
            config.looping,
        )
    }

    // --- Commands ---

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: SimCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SimCommand>) {
        self.command_queue.extend(commands);
    }

    // --- Ticking ---

    /// Advance the simulation by one fixed tick and return the resulting snapshot.
    pub fn tick(&mut self) -> SimSnapshot {
        self.advance(salvo_core::constants::DT)
    }

    /// Advance the simulation by `dt` seconds (before time scaling).
    pub fn advance(&mut self, dt: f64) -> SimSnapshot {
        self.process_commands();

        let scaled = dt.max(0.0) * self.time_scale;
        if !self.paused && scaled > 0.0 {
            self.run_systems(scaled);
            self.time.advance(scaled);
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            self.registry.world(),
            &self.time,
            self.paused,
            self.sequencer_view(),
            events,
            &self.score,
        )
    }

    // --- Accessors ---

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current time scale.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        self.registry.world()
    }

    pub fn sequencer(&self) -> Option<&WaveSequencer> {
        self.sequencer.as_ref()
    }

    /// Stop handle for the current sequencer.
    pub fn stop_signal(&self) -> Option<StopSignal> {
        self.sequencer.as_ref().map(WaveSequencer::stop_signal)
    }

    pub fn sequencer_view(&self) -> SequencerView {
        self.sequencer
            .as_ref()
            .map(WaveSequencer::view)
            .unwrap_or_default()
    }

    /// Number of live enemies.
    pub fn live_count(&self) -> usize {
        self.registry.len()
    }

    pub fn entity_for(&self, handle: EntityHandle) -> Option<Entity> {
        self.registry.entity(handle)
    }

    /// No sequencer is running and no enemy is alive.
    pub fn is_idle(&self) -> bool {
        !self.sequencer.as_ref().is_some_and(WaveSequencer::is_running) && self.registry.is_empty()
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    // --- Internals ---

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single command.
    fn handle_command(&mut self, command: SimCommand) {
        match command {
            SimCommand::StopWaves => {
                if let Some(sequencer) = &self.sequencer {
                    sequencer.stop();
                }
            }
            SimCommand::Damage { handle, amount } => {
                let Some(entity) = self.live_entity(handle) else {
                    return;
                };
                let remaining = match self.registry.world_mut().get::<&mut Health>(entity) {
                    Ok(mut health) => {
                        health.current = health.current.saturating_sub(amount.max(0));
                        health.current
                    }
                    Err(_) => return,
                };
                if remaining <= 0 {
                    self.retire(entity, RetireReason::Killed);
                } else {
                    self.events
                        .push(SimEvent::EnemyDamaged { handle, remaining });
                }
            }
            SimCommand::Destroy { handle } => {
                if let Some(entity) = self.live_entity(handle) {
                    self.retire(entity, RetireReason::External);
                }
            }
            SimCommand::SetFiring { handle, firing } => {
                let Some(entity) = self.live_entity(handle) else {
                    return;
                };
                if let Ok(mut shooter) = self.registry.world_mut().get::<&mut Shooter>(entity) {
                    if firing && !shooter.armed {
                        shooter.cooldown_secs = 0.0;
                    }
                    shooter.armed = firing;
                    self.collaborators.host.set_firing(handle, firing);
                }
            }
            SimCommand::SetTimeScale { scale } => {
                self.time_scale = scale.clamp(0.0, 4.0);
            }
            SimCommand::Pause => {
                self.paused = true;
            }
            SimCommand::Resume => {
                self.paused = false;
            }
        }
    }

    fn live_entity(&self, handle: EntityHandle) -> Option<Entity> {
        let entity = self.registry.entity(handle);
        if entity.is_none() {
            warn!(handle = handle.0, "command for unknown handle ignored");
        }
        entity
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        // 1. Wave sequencing and spawning
        if let Some(sequencer) = self.sequencer.as_mut() {
            let mut sink = SpawnContext {
                tick_end: sequencer.clock() + dt.max(0.0),
                tick_secs: dt.max(0.0),
                factory: &mut self.factory,
                registry: &mut self.registry,
                host: &mut *self.collaborators.host,
                target: &self.collaborators.target,
                events: &mut self.events,
                score: &mut self.score,
            };
            sequencer.advance(dt, &mut sink);
        }
        // 2. Path following
        systems::path_follow::run(self.registry.world_mut(), dt, &mut self.retire_buffer);
        // 3. Tracking
        systems::tracking::run(self.registry.world_mut(), dt);
        // 4. Firing
        systems::firing::run(
            self.registry.world_mut(),
            &mut self.rng,
            &*self.collaborators.target,
            dt,
            &mut self.events,
        );
        // 5. Cleanup (out of bounds)
        systems::cleanup::run(
            self.registry.world_mut(),
            self.collaborators.bounds.bounds(),
            &mut self.retire_buffer,
        );
        // 6. Release everything flagged this tick
        let mut flagged = std::mem::take(&mut self.retire_buffer);
        for (entity, reason) in flagged.drain(..) {
            self.retire(entity, reason);
        }
        self.retire_buffer = flagged;
    }

    /// Release `entity` and count it. A second retire of the same entity
    /// does nothing.
    fn retire(&mut self, entity: Entity, reason: RetireReason) {
        let Some(released) = self
            .registry
            .release(entity, &mut *self.collaborators.host)
        else {
            return;
        };
        debug!(handle = released.handle.0, ?reason, "enemy retired");
        self.score.record(reason, released.score_value);
        self.events.push(SimEvent::EnemyRetired {
            handle: released.handle,
            kind: released.kind,
            reason,
        });
    }
}

/// Hands due spawns to the factory and turns sequencer notifications
/// into events.
struct SpawnContext<'a> {
    factory: &'a mut SpawnFactory,
    registry: &'a mut EntityRegistry,
    host: &'a mut dyn EntityHost,
    target: &'a SharedTargetProvider,
    events: &'a mut Vec<SimEvent>,
    score: &'a mut ScoreState,
    /// Sequencer clock at the end of this tick.
    tick_end: f64,
    tick_secs: f64,
}

impl SpawnSink for SpawnContext<'_> {
    fn spawn(&mut self, event: SpawnEvent) {
        let remaining = (self.tick_end - event.scheduled_at).clamp(0.0, self.tick_secs);
        let entity = self.factory.spawn(
            &event,
            SpawnTargets {
                registry: &mut *self.registry,
                host: &mut *self.host,
                target: self.target,
                events: &mut *self.events,
            },
        );
        if let Ok(mut follower) = self.registry.world_mut().get::<&mut PathFollower>(entity) {
            follower.first_step_secs = Some(remaining);
        }
        self.score.spawned += 1;
    }

    fn wave_started(&mut self, wave_index: usize, pass: u32) {
        self.events.push(SimEvent::WaveStarted { wave_index, pass });
    }

    fn finished(&mut self, passes: u32) {
        self.events.push(SimEvent::SequencerFinished { passes });
    }

    fn stopped(&mut self, wave_index: usize, slot: usize) {
        self.events
            .push(SimEvent::SequencerStopped { wave_index, slot });
    }
}
