//! Game loop thread — runs the simulation engine at 60Hz and publishes snapshots.
//!
//! The engine is created inside this thread because it's cleaner for ownership.
//! Commands arrive via `mpsc` channel. Snapshots are stored in shared state
//! for polling. The player target sweeps across the bottom of the play area
//! and destroys any enemy it touches.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use anyhow::Context;
use glam::DVec2;
use serde::Serialize;
use tracing::{debug, info};

use salvo_core::commands::SimCommand;
use salvo_core::config::ScenarioConfig;
use salvo_core::constants::TICK_RATE;
use salvo_core::enums::SequencerStatus;
use salvo_core::events::SimEvent;
use salvo_core::host::{HeadlessHost, SharedTarget, StaticBounds};
use salvo_core::state::{ScoreView, SimSnapshot};
use salvo_sim::scenario::play_bounds;
use salvo_sim::{Collaborators, SimConfig, SimulationEngine};

use crate::state::GameLoopCommand;

/// Nominal duration of one tick at 1x speed.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Seconds for the player to cross the play area and back.
const PLAYER_SWEEP_SECS: f64 = 8.0;

/// Enemies closer than this to the player are destroyed on contact.
const CONTACT_RADIUS: f64 = 0.75;

pub struct LoopSettings {
    pub seed: u64,
    /// Stop after this many ticks. `None` runs until idle or shutdown.
    pub max_ticks: Option<u64>,
    /// Sleep between ticks to hold the tick rate.
    pub realtime: bool,
    /// Queue a stop-waves command once this much simulated time has passed.
    pub stop_after: Option<f64>,
}

/// What the loop reports when it exits.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub elapsed_secs: f64,
    pub sequencer: SequencerStatus,
    pub passes: u32,
    pub shots_fired: u64,
    pub live_enemies: usize,
    pub score: ScoreView,
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the handle the summary is joined from.
pub fn spawn_game_loop(
    config: ScenarioConfig,
    settings: LoopSettings,
    latest_snapshot: Arc<Mutex<Option<SimSnapshot>>>,
) -> anyhow::Result<(
    mpsc::Sender<GameLoopCommand>,
    JoinHandle<anyhow::Result<RunSummary>>,
)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("salvo-game-loop".into())
        .spawn(move || run_game_loop(&config, &settings, cmd_rx, &latest_snapshot))
        .context("failed to spawn game loop thread")?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until idle, the tick cap, a Shutdown command or
/// channel disconnect.
fn run_game_loop(
    config: &ScenarioConfig,
    settings: &LoopSettings,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<SimSnapshot>>,
) -> anyhow::Result<RunSummary> {
    let target = SharedTarget::new(Some(player_position(0.0)));
    let mut engine = SimulationEngine::new(
        SimConfig {
            seed: settings.seed,
            ..Default::default()
        },
        Collaborators {
            host: Box::new(HeadlessHost::new()),
            target: Arc::new(target.clone()),
            bounds: Box::new(StaticBounds(Some(play_bounds()))),
        },
    );
    engine
        .load_scenario(config)
        .context("scenario rejected by the engine")?;

    let mut ticks = 0u64;
    let mut shots_fired = 0u64;
    let mut stop_pending = settings.stop_after;
    let mut next_tick_time = Instant::now();

    'run: loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Sim(cmd)) => {
                    debug!(?cmd, "command received");
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => {
                    info!("game loop shutdown requested");
                    break 'run;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => break 'run,
            }
        }

        // 2. Move the player, then advance one tick
        let player = player_position(engine.time().elapsed_secs);
        target.set(Some(player));
        let snapshot = engine.tick();
        ticks += 1;
        shots_fired += snapshot
            .events
            .iter()
            .filter(|e| matches!(e, SimEvent::ShotFired { .. }))
            .count() as u64;

        // 3. Contact with the player destroys the enemy next tick
        for enemy in &snapshot.enemies {
            if enemy.position.distance(player) < CONTACT_RADIUS {
                engine.queue_command(SimCommand::Destroy {
                    handle: enemy.handle,
                });
            }
        }

        // 4. Scheduled stop, applied at the start of the next tick
        if let Some(at) = stop_pending {
            if snapshot.time.elapsed_secs >= at {
                info!(at = snapshot.time.elapsed_secs, "stopping waves");
                engine.queue_command(SimCommand::StopWaves);
                stop_pending = None;
            }
        }

        // 5. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if engine.is_idle() {
            info!(ticks, "all waves done and no enemies left");
            break;
        }
        if settings.max_ticks.is_some_and(|max| ticks >= max) {
            info!(ticks, "tick limit reached");
            break;
        }

        // 6. Sleep until next tick, adjusting for time_scale
        if settings.realtime {
            let time_scale = engine.time_scale();
            let effective_tick_duration = if time_scale > 0.001 {
                TICK_DURATION.div_f64(time_scale)
            } else {
                TICK_DURATION
            };

            next_tick_time += effective_tick_duration;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > effective_tick_duration * 2 {
                // Too far behind; reset instead of catching up
                next_tick_time = now;
            }
        }
    }

    let view = engine.sequencer_view();
    Ok(RunSummary {
        ticks,
        elapsed_secs: engine.time().elapsed_secs,
        sequencer: view.status,
        passes: view.pass,
        shots_fired,
        live_enemies: engine.live_count(),
        score: engine.score().view(),
    })
}

/// Player position at `secs`: a triangle wave along the bottom edge.
pub fn player_position(secs: f64) -> DVec2 {
    let bounds = play_bounds();
    let phase = (secs / PLAYER_SWEEP_SECS).rem_euclid(1.0);
    let sweep = 1.0 - (2.0 * phase - 1.0).abs();
    DVec2::new(
        bounds.min.x + (bounds.max.x - bounds.min.x) * sweep,
        bounds.min.y + 2.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use salvo_core::enums::ScenarioId;
    use salvo_sim::scenario;

    fn fast(max_ticks: Option<u64>) -> LoopSettings {
        LoopSettings {
            seed: 7,
            max_ticks,
            realtime: false,
            stop_after: None,
        }
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::Sim(SimCommand::StopWaves)).unwrap();
        tx.send(GameLoopCommand::Sim(SimCommand::Pause)).unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::Sim(SimCommand::StopWaves)
        ));
        assert!(matches!(commands[1], GameLoopCommand::Sim(SimCommand::Pause)));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_training_runs_until_idle() {
        let latest = Arc::new(Mutex::new(None));
        let (_tx, handle) =
            spawn_game_loop(scenario::build(ScenarioId::Training), fast(None), latest.clone())
                .unwrap();

        let summary = handle.join().unwrap().unwrap();
        assert_eq!(summary.sequencer, SequencerStatus::Finished);
        assert_eq!(summary.live_enemies, 0);
        assert_eq!(summary.score.spawned, 6);
        assert_eq!(summary.shots_fired, 0);

        let snapshot = latest.lock().unwrap().clone().unwrap();
        assert_eq!(snapshot.time.tick, summary.ticks);
    }

    #[test]
    fn test_endless_stops_at_tick_limit() {
        let latest = Arc::new(Mutex::new(None));
        let (_tx, handle) =
            spawn_game_loop(scenario::build(ScenarioId::Endless), fast(Some(600)), latest)
                .unwrap();

        let summary = handle.join().unwrap().unwrap();
        assert_eq!(summary.ticks, 600);
        assert_eq!(summary.sequencer, SequencerStatus::Running);
        assert!(summary.score.spawned > 0);
    }

    #[test]
    fn test_shutdown_ends_endless_run() {
        let latest = Arc::new(Mutex::new(None));
        let (tx, handle) =
            spawn_game_loop(scenario::build(ScenarioId::Endless), fast(None), latest.clone())
                .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        // The loop may have ticked before the command arrived, but it exits.
        let summary = handle.join().unwrap().unwrap();
        assert_eq!(summary.sequencer, SequencerStatus::Running);
    }

    #[test]
    fn test_stop_after_is_measured_in_simulated_time() {
        // Training slots land at 0, ~1 and ~2s; the second wave cannot
        // start before 5.4s, so a stop at 4s always leaves three spawns.
        let run = || {
            let latest = Arc::new(Mutex::new(None));
            let settings = LoopSettings {
                stop_after: Some(4.0),
                ..fast(Some(36_000))
            };
            let (_tx, handle) =
                spawn_game_loop(scenario::build(ScenarioId::Training), settings, latest).unwrap();
            handle.join().unwrap().unwrap()
        };

        let first = run();
        assert_eq!(first.sequencer, SequencerStatus::Stopped);
        assert_eq!(first.score.spawned, 3);
        assert_eq!(first.live_enemies, 0);

        let second = run();
        assert_eq!(second.ticks, first.ticks);
        assert_eq!(second.score.spawned, 3);
    }

    #[test]
    fn test_invalid_scenario_is_reported() {
        let latest = Arc::new(Mutex::new(None));
        let (_tx, handle) =
            spawn_game_loop(ScenarioConfig::default(), fast(Some(10)), latest).unwrap();
        let err = handle.join().unwrap().unwrap_err();
        assert!(err.to_string().contains("scenario rejected"));
    }

    #[test]
    fn test_player_stays_in_bounds() {
        let bounds = play_bounds();
        for step in 0..400 {
            let pos = player_position(step as f64 * 0.05);
            assert!(bounds.contains_with_margin(pos, 0.0), "{pos:?}");
        }
        assert!((player_position(0.0).x - bounds.min.x).abs() < 1e-9);
        assert!((player_position(PLAYER_SWEEP_SECS / 2.0).x - bounds.max.x).abs() < 1e-9);
    }

    #[test]
    fn test_tick_duration_constant() {
        // 60Hz = 16.666ms per tick
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }
}
