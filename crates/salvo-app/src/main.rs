use std::path::PathBuf;

use anyhow::{ensure, Context};
use clap::{Parser, ValueEnum};
use tracing::info;

use salvo_app::game_loop::{self, LoopSettings};
use salvo_app::logging::setup_logging;
use salvo_app::state::AppState;
use salvo_core::config::ScenarioConfig;
use salvo_core::enums::ScenarioId;
use salvo_sim::scenario;

/// Run a wave scenario headless and print a JSON summary.
#[derive(Parser)]
#[clap(name = "salvo", version)]
struct Opt {
    /// Built-in scenario, ignored when --config is given.
    #[clap(short, long, value_enum, default_value = "training")]
    scenario: ScenarioArg,
    /// Scenario JSON file.
    #[clap(short, long)]
    config: Option<PathBuf>,
    #[clap(long, default_value_t = 42)]
    seed: u64,
    /// Stop after this many ticks (default: ten simulated minutes).
    #[clap(short, long, default_value_t = 36_000)]
    ticks: u64,
    /// Pace ticks at wall-clock rate instead of running flat out.
    #[clap(long)]
    realtime: bool,
    /// Send a stop-waves command after this many simulated seconds.
    #[clap(long)]
    stop_after: Option<f64>,
    /// Print the scenario as JSON and exit.
    #[clap(long)]
    print_scenario: bool,
    #[clap(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ScenarioArg {
    Training,
    Gauntlet,
    Endless,
}

impl From<ScenarioArg> for ScenarioId {
    fn from(arg: ScenarioArg) -> Self {
        match arg {
            ScenarioArg::Training => ScenarioId::Training,
            ScenarioArg::Gauntlet => ScenarioId::Gauntlet,
            ScenarioArg::Endless => ScenarioId::Endless,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let opt = Opt::parse();
    setup_logging(if opt.verbose { "debug" } else { "info" })?;

    let config = match &opt.config {
        Some(path) => ScenarioConfig::load(path)
            .with_context(|| format!("loading scenario {}", path.display()))?,
        None => scenario::build(opt.scenario.into()),
    };

    if opt.print_scenario {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    ensure!(opt.ticks > 0, "--ticks must be positive");

    info!(
        waves = config.waves.len(),
        kinds = config.kinds.len(),
        looping = config.looping,
        seed = opt.seed,
        "starting run"
    );

    let state = AppState::new();
    let (tx, handle) = game_loop::spawn_game_loop(
        config,
        LoopSettings {
            seed: opt.seed,
            max_ticks: Some(opt.ticks),
            realtime: opt.realtime,
            stop_after: opt.stop_after,
        },
        state.latest_snapshot.clone(),
    )?;
    state.attach(tx)?;

    let summary = handle
        .join()
        .map_err(|_| anyhow::anyhow!("game loop thread panicked"))??;
    info!(
        ticks = summary.ticks,
        spawned = summary.score.spawned,
        killed = summary.score.killed,
        "run complete"
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
