#[cfg(test)]
mod tests {
    use glam::DVec2;

    use crate::commands::SimCommand;
    use crate::config::{PathDescriptor, ScenarioConfig};
    use crate::enums::*;
    use crate::error::ConfigError;
    use crate::events::SimEvent;
    use crate::host::{EntityHost, HeadlessHost, SharedTarget, TargetProvider};
    use crate::types::*;

    const SCENARIO_JSON: &str = r#"{
        "paths": {
            "zigzag": { "origin": [0.0, 10.0], "waypoints": [[0.0, 0.0], [4.0, -3.0], [-4.0, -6.0]] }
        },
        "kinds": [
            { "id": "drifter" },
            { "id": "gunner", "firing": { "projectile_speed": 12.0 }, "max_health": 40, "score_value": 150 },
            { "id": "chaser", "behavior": { "type": "Track", "speed": 3.0 } }
        ],
        "waves": [
            {
                "enemies": ["drifter", "gunner", "drifter"],
                "path": "zigzag",
                "move_speed": 4.0,
                "timing": { "base": 1.0, "variance": 0.2, "minimum": 0.5 }
            },
            { "enemies": ["chaser"], "path": "zigzag" }
        ],
        "time_between_waves": 3.0,
        "looping": true
    }"#;

    #[test]
    fn test_scenario_parses_with_defaults() {
        let config = ScenarioConfig::from_json_str(SCENARIO_JSON).unwrap();
        assert_eq!(config.waves.len(), 2);
        assert!(config.looping);
        assert!((config.time_between_waves - 3.0).abs() < 1e-12);

        // Second wave falls back to default speed and timing.
        let wave = &config.waves[1];
        assert!((wave.move_speed - crate::constants::DEFAULT_MOVE_SPEED).abs() < 1e-12);
        assert_eq!(wave.timing, SpawnTiming::default());

        let gunner = &config.kinds[1];
        let firing = gunner.firing.expect("gunner is armed");
        assert!((firing.projectile_speed - 12.0).abs() < 1e-12);
        assert_eq!(gunner.max_health, 40);
        assert_eq!(gunner.score_value, 150);

        assert_eq!(config.kinds[2].behavior, Behavior::Track { speed: 3.0 });
        assert_eq!(config.kinds[0].behavior, Behavior::FollowPath);
    }

    #[test]
    fn test_path_descriptor_applies_origin() {
        let config = ScenarioConfig::from_json_str(SCENARIO_JSON).unwrap();
        let points = config.paths["zigzag"].world_points();
        assert_eq!(
            points,
            vec![
                DVec2::new(0.0, 10.0),
                DVec2::new(4.0, 7.0),
                DVec2::new(-4.0, 4.0)
            ]
        );
    }

    #[test]
    fn test_scenario_rejects_unknown_kind() {
        let mut config = ScenarioConfig::from_json_str(SCENARIO_JSON).unwrap();
        config.waves[0].enemies.push("ghost".into());
        match config.validate() {
            Err(ConfigError::UnknownEnemyKind { wave, slot, kind }) => {
                assert_eq!(wave, 0);
                assert_eq!(slot, 3);
                assert_eq!(kind, "ghost");
            }
            other => panic!("expected UnknownEnemyKind, got {other:?}"),
        }
    }

    #[test]
    fn test_scenario_rejects_unknown_path() {
        let mut config = ScenarioConfig::from_json_str(SCENARIO_JSON).unwrap();
        config.waves[1].path = "nowhere".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownPath { wave: 1, .. })
        ));
    }

    #[test]
    fn test_scenario_rejects_empty_inputs() {
        let mut config = ScenarioConfig::from_json_str(SCENARIO_JSON).unwrap();
        config.waves.clear();
        assert!(matches!(config.validate(), Err(ConfigError::EmptyWaveList)));

        let mut config = ScenarioConfig::from_json_str(SCENARIO_JSON).unwrap();
        config
            .paths
            .insert("empty".into(), PathDescriptor::new(Vec::new()));
        assert!(matches!(config.validate(), Err(ConfigError::EmptyPath(id)) if id == "empty"));
    }

    #[test]
    fn test_scenario_rejects_bad_speed_and_delay() {
        let mut config = ScenarioConfig::from_json_str(SCENARIO_JSON).unwrap();
        config.waves[0].move_speed = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveSpeed { wave: 0, .. })
        ));

        let mut config = ScenarioConfig::from_json_str(SCENARIO_JSON).unwrap();
        config.time_between_waves = -1.0;
        assert!(matches!(config.validate(), Err(ConfigError::NegativeDelay(_))));

        let mut config = ScenarioConfig::from_json_str(SCENARIO_JSON).unwrap();
        config.kinds[2].behavior = Behavior::Track { speed: -2.0 };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveTrackSpeed { .. })
        ));
    }

    #[test]
    fn test_scenario_rejects_duplicate_kind() {
        let mut config = ScenarioConfig::from_json_str(SCENARIO_JSON).unwrap();
        config.kinds.push(EnemyKind::follower("drifter"));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateEnemyKind(id)) if id == "drifter"
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = ScenarioConfig::from_json_str("{ \"waves\": [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("failed to parse scenario"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ScenarioConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_scenario_json_round_trip() {
        let config = ScenarioConfig::from_json_str(SCENARIO_JSON).unwrap();
        let json = config.to_json_pretty().unwrap();
        let back = ScenarioConfig::from_json_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_timing_validation() {
        assert!(SpawnTiming::new(1.0, 0.2, 0.5).validate("t").is_ok());
        assert!(SpawnTiming::new(0.0, 0.0, 0.0).validate("t").is_ok());
        assert!(SpawnTiming::new(0.5, 0.2, 1.0).validate("t").is_err());
        assert!(SpawnTiming::new(1.0, -0.1, 0.5).validate("t").is_err());
        assert!(SpawnTiming::new(f64::NAN, 0.0, 0.0).validate("t").is_err());

        let timing = SpawnTiming::new(1.0, 0.2, 0.5);
        assert!((timing.low() - 0.8).abs() < 1e-12);
        assert!((timing.high() - 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_waypoint_path_requires_points() {
        assert!(matches!(
            WaypointPath::new("p", Vec::new()),
            Err(ConfigError::EmptyPath(_))
        ));

        let path = WaypointPath::new("p", vec![DVec2::new(1.0, 2.0), DVec2::new(3.0, 4.0)]).unwrap();
        assert_eq!(path.len(), 2);
        assert!(!path.is_empty());
        assert_eq!(path.first(), DVec2::new(1.0, 2.0));
        assert_eq!(path.last(), DVec2::new(3.0, 4.0));
        assert_eq!(path.get(2), None);
    }

    #[test]
    fn test_waypoint_path_deserialize_rejects_empty() {
        let path: WaypointPath = serde_json::from_str("[[1.0, 2.0], [3.0, 4.0]]").unwrap();
        assert_eq!(path.first(), DVec2::new(1.0, 2.0));
        assert_eq!(serde_json::to_string(&path).unwrap(), "[[1.0,2.0],[3.0,4.0]]");

        assert!(serde_json::from_str::<WaypointPath>("[]").is_err());
    }

    #[test]
    fn test_enemy_kind_rejects_non_positive_health() {
        assert!(EnemyKind::follower("ok").with_health(1, 0).validate().is_ok());
        for health in [0, -5, i32::MIN] {
            let err = EnemyKind::follower("husk").with_health(health, 10).validate();
            assert!(
                matches!(err, Err(ConfigError::NonPositiveHealth { health: h, .. }) if h == health),
                "health {health} accepted"
            );
        }
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_enemy_kind_slot_out_of_range_panics() {
        let wave = WaveDefinition::new(vec!["a".into()], "p", 1.0, SpawnTiming::default());
        wave.enemy_kind(1);
    }

    #[test]
    fn test_bounds_margin() {
        let bounds = Bounds::new(DVec2::new(-10.0, -5.0), DVec2::new(10.0, 5.0));
        assert!(bounds.contains_with_margin(DVec2::new(0.0, 0.0), 0.0));
        assert!(!bounds.contains_with_margin(DVec2::new(11.0, 0.0), 0.0));
        assert!(bounds.contains_with_margin(DVec2::new(11.0, 0.0), 2.0));
        assert!(!bounds.contains_with_margin(DVec2::new(0.0, -7.5), 2.0));
    }

    #[test]
    fn test_headless_host_counts_live_handles() {
        let mut host = HeadlessHost::new();
        let a = host.create(&"a".to_string(), DVec2::ZERO, 0.0);
        let b = host.create(&"b".to_string(), DVec2::ZERO, 0.0);
        assert_ne!(a, b);
        assert_eq!(host.live(), 2);
        host.destroy(a);
        assert_eq!(host.live(), 1);
    }

    #[test]
    fn test_shared_target_updates_are_visible_to_clones() {
        let target = SharedTarget::default();
        let reader = target.clone();
        assert_eq!(reader.current_target(), None);
        target.set(Some(DVec2::new(2.0, -8.0)));
        assert_eq!(reader.current_target(), Some(DVec2::new(2.0, -8.0)));
    }

    #[test]
    fn test_command_and_event_tags() {
        let json = serde_json::to_string(&SimCommand::Damage {
            handle: EntityHandle(7),
            amount: 25,
        })
        .unwrap();
        assert!(json.contains("\"type\":\"Damage\""));

        let event = SimEvent::EnemyRetired {
            handle: EntityHandle(3),
            kind: "drifter".into(),
            reason: RetireReason::PathComplete,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: SimEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
