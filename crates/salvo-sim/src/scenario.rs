//! Scenario definitions — hardcoded wave rosters.
//!
//! Each scenario defines its paths, enemy kinds, wave composition and
//! timing. The play area is 20 x 24 units centred on the origin; enemies
//! enter from above and leave below.

use std::collections::BTreeMap;

use glam::DVec2;

use salvo_core::config::{PathDescriptor, ScenarioConfig};
use salvo_core::enums::{Behavior, ScenarioId};
use salvo_core::types::{Bounds, EnemyKind, FiringProfile, SpawnTiming, WaveDefinition};

/// Play area shared by the built-in scenarios.
pub fn play_bounds() -> Bounds {
    Bounds::new(DVec2::new(-10.0, -12.0), DVec2::new(10.0, 12.0))
}

/// Build the scenario config for a given scenario.
pub fn build(scenario: ScenarioId) -> ScenarioConfig {
    match scenario {
        ScenarioId::Training => build_training(),
        ScenarioId::Gauntlet => build_gauntlet(false),
        ScenarioId::Endless => build_gauntlet(true),
    }
}

/// Training: "Drifters"
/// 2 waves, 6 unarmed drifters, one sweep from each side, 3s spacing.
fn build_training() -> ScenarioConfig {
    let steady = SpawnTiming::new(1.0, 0.2, 0.5);

    ScenarioConfig {
        paths: paths(),
        kinds: vec![drifter()],
        waves: vec![
            // Wave 1: 3x drifter sweeping in from the left
            WaveDefinition::new(vec!["drifter".into(); 3], "left_sweep", 4.0, steady),
            // Wave 2: 3x drifter sweeping in from the right
            WaveDefinition::new(vec!["drifter".into(); 3], "right_sweep", 4.0, steady),
        ],
        time_between_waves: 3.0,
        looping: false,
    }
}

/// Gauntlet: "Crossfire"
/// 5 waves, 19 enemies. Gunners from wave 2, a chaser in wave 4,
/// tighter spawn intervals as it goes.
fn build_gauntlet(looping: bool) -> ScenarioConfig {
    let steady = SpawnTiming::new(1.0, 0.2, 0.5);
    let brisk = SpawnTiming::new(0.6, 0.2, 0.3);
    let swarm = SpawnTiming::new(0.3, 0.1, 0.2);

    ScenarioConfig {
        paths: paths(),
        kinds: vec![drifter(), gunner(), chaser()],
        waves: vec![
            // Wave 1: 4x drifter down the centre
            WaveDefinition::new(vec!["drifter".into(); 4], "dive", 5.0, steady),
            // Wave 2: drifters escorting a gunner from the left
            WaveDefinition::new(
                kinds(&["drifter", "gunner", "drifter"]),
                "left_sweep",
                4.0,
                steady,
            ),
            // Wave 3: 2x gunner weaving from the right
            WaveDefinition::new(vec!["gunner".into(); 2], "zigzag", 3.5, brisk),
            // Wave 4: chaser hidden in a drifter screen
            WaveDefinition::new(
                kinds(&["drifter", "drifter", "chaser", "drifter"]),
                "right_sweep",
                5.0,
                brisk,
            ),
            // Wave 5: 4x drifter swarm, 2x gunner closing
            WaveDefinition::new(
                kinds(&["drifter", "drifter", "drifter", "drifter", "gunner", "gunner"]),
                "dive",
                6.0,
                swarm,
            ),
        ],
        time_between_waves: 2.5,
        looping,
    }
}

fn paths() -> BTreeMap<String, PathDescriptor> {
    let mut paths = BTreeMap::new();
    paths.insert(
        "left_sweep".to_string(),
        PathDescriptor::new(points(&[(-8.0, 13.0), (-5.0, 6.0), (3.0, 0.0), (8.0, -13.0)])),
    );
    paths.insert(
        "right_sweep".to_string(),
        PathDescriptor::new(points(&[(8.0, 13.0), (5.0, 6.0), (-3.0, 0.0), (-8.0, -13.0)])),
    );
    paths.insert(
        "dive".to_string(),
        PathDescriptor::new(points(&[(0.0, 13.0), (0.0, -13.0)])),
    );
    // Zigzag is authored relative to its entry point.
    paths.insert(
        "zigzag".to_string(),
        PathDescriptor::new(points(&[
            (0.0, 0.0),
            (-6.0, -5.0),
            (0.0, -10.0),
            (-6.0, -15.0),
            (0.0, -20.0),
            (-6.0, -26.0),
        ]))
        .with_origin(DVec2::new(3.0, 13.0)),
    );
    paths
}

fn drifter() -> EnemyKind {
    EnemyKind::follower("drifter").with_health(50, 25)
}

fn gunner() -> EnemyKind {
    EnemyKind::follower("gunner")
        .with_firing(FiringProfile {
            cadence: SpawnTiming::new(1.2, 0.3, 0.6),
            projectile_speed: 8.0,
        })
        .with_health(150, 100)
}

fn chaser() -> EnemyKind {
    EnemyKind::follower("chaser")
        .with_behavior(Behavior::Track { speed: 3.0 })
        .with_health(80, 150)
}

fn points(raw: &[(f64, f64)]) -> Vec<DVec2> {
    raw.iter().map(|&(x, y)| DVec2::new(x, y)).collect()
}

fn kinds(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}
