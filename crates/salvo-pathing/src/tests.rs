#[cfg(test)]
mod tests {
    use glam::DVec2;

    use salvo_core::constants::WAYPOINT_EPSILON;
    use salvo_core::enums::FollowState;
    use salvo_core::types::WaypointPath;

    use crate::follower::{move_towards, step, FollowContext};
    use crate::steering::{chase, facing_degrees};

    fn three_point_path() -> WaypointPath {
        WaypointPath::new(
            "test",
            vec![
                DVec2::new(0.0, 0.0),
                DVec2::new(3.0, 0.0),
                DVec2::new(3.0, 4.0),
            ],
        )
        .unwrap()
    }

    /// Feed ticks until retirement; returns (index increments, final position, ticks).
    fn run_to_retirement(path: &WaypointPath, start: DVec2, speed: f64, dt: f64) -> (u32, DVec2, u32) {
        let mut position = start;
        let mut state = FollowState::Advancing(0);
        let mut increments = 0;
        let mut ticks = 0;
        while state != FollowState::Retired {
            let update = step(&FollowContext {
                position,
                path,
                speed,
                state,
                dt,
            });
            if update.advanced {
                increments += 1;
            }
            position = update.position;
            state = update.state;
            ticks += 1;
            assert!(ticks < 100_000, "follower never retired");
        }
        (increments, position, ticks)
    }

    #[test]
    fn test_three_waypoints_speed_five() {
        let path = three_point_path();
        let (increments, position, _) = run_to_retirement(&path, path.first(), 5.0, 0.1);
        assert_eq!(increments, 3);
        assert!(
            position.distance(path.last()) < WAYPOINT_EPSILON,
            "final position {position} should sit on the last waypoint"
        );
    }

    #[test]
    fn test_retirement_independent_of_tick_size() {
        let path = three_point_path();
        for dt in [0.001, 1.0 / 60.0, 0.1, 0.5, 3.0, 100.0] {
            let (increments, position, _) = run_to_retirement(&path, DVec2::new(-0.3, 0.4), 5.0, dt);
            assert_eq!(increments, path.len() as u32, "dt={dt}");
            assert!(position.distance(path.last()) < WAYPOINT_EPSILON, "dt={dt}");
        }
    }

    #[test]
    fn test_one_increment_per_tick() {
        // Huge step: every tick lands on its waypoint, but the index can only move once.
        let path = three_point_path();
        let (increments, _, ticks) = run_to_retirement(&path, path.first(), 1000.0, 1.0);
        assert_eq!(increments, 3);
        assert_eq!(ticks, 3);
    }

    #[test]
    fn test_no_overshoot_past_waypoint() {
        let path = three_point_path();
        let update = step(&FollowContext {
            position: DVec2::new(2.0, 0.0),
            path: &path,
            speed: 10.0,
            state: FollowState::Advancing(1),
            dt: 1.0,
        });
        // Lands exactly on waypoint 1; leftover movement is not carried into the next leg.
        assert_eq!(update.position, DVec2::new(3.0, 0.0));
        assert_eq!(update.state, FollowState::Advancing(2));
        assert!(update.advanced);
        assert!(!update.retired);
    }

    #[test]
    fn test_partial_step_keeps_index() {
        let path = three_point_path();
        let update = step(&FollowContext {
            position: DVec2::new(0.0, 0.0),
            path: &path,
            speed: 1.0,
            state: FollowState::Advancing(1),
            dt: 1.0,
        });
        assert!((update.position.x - 1.0).abs() < 1e-12);
        assert_eq!(update.state, FollowState::Advancing(1));
        assert!(!update.advanced);
    }

    #[test]
    fn test_retired_is_terminal() {
        let path = three_point_path();
        let update = step(&FollowContext {
            position: DVec2::new(9.0, 9.0),
            path: &path,
            speed: 5.0,
            state: FollowState::Retired,
            dt: 0.1,
        });
        assert_eq!(update.position, DVec2::new(9.0, 9.0));
        assert_eq!(update.state, FollowState::Retired);
        assert!(!update.retired, "retirement is signalled only on entry");
    }

    #[test]
    fn test_single_waypoint_path_retires_on_arrival() {
        let path = WaypointPath::new("dot", vec![DVec2::new(1.0, 1.0)]).unwrap();
        let (increments, position, ticks) = run_to_retirement(&path, DVec2::new(1.2, 1.2), 5.0, 0.1);
        assert_eq!(increments, 1);
        assert_eq!(ticks, 1);
        assert_eq!(position, DVec2::new(1.0, 1.0));
    }

    #[test]
    fn test_move_towards_clamps() {
        let a = DVec2::new(0.0, 0.0);
        let b = DVec2::new(0.0, 10.0);
        assert_eq!(move_towards(a, b, 4.0), DVec2::new(0.0, 4.0));
        assert_eq!(move_towards(a, b, 40.0), b);
        assert_eq!(move_towards(b, b, 1.0), b);
    }

    #[test]
    fn test_chase_moves_toward_target() {
        let update = chase(DVec2::ZERO, Some(DVec2::new(10.0, 0.0)), 3.0, 0.5);
        assert!((update.position.x - 1.5).abs() < 1e-12);
        assert_eq!(update.direction, DVec2::new(1.0, 0.0));
    }

    #[test]
    fn test_chase_holds_without_target() {
        let start = DVec2::new(4.0, -2.0);
        let update = chase(start, None, 3.0, 0.5);
        assert_eq!(update.position, start);
        assert_eq!(update.direction, DVec2::ZERO);
    }

    #[test]
    fn test_facing_degrees() {
        assert!((facing_degrees(DVec2::new(1.0, 0.0), 45.0) - 0.0).abs() < 1e-9);
        assert!((facing_degrees(DVec2::new(0.0, 1.0), 0.0) - 90.0).abs() < 1e-9);
        assert!((facing_degrees(DVec2::new(0.0, -2.0), 0.0) + 90.0).abs() < 1e-9);
        assert!((facing_degrees(DVec2::ZERO, 33.0) - 33.0).abs() < 1e-9);
    }
}
