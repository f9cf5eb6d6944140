#[cfg(test)]
mod tests {
    use glam::{Quat, Vec3};

    use crate::commands::PlayerCommand;
    use crate::config::{ConfigError, SessionConfig};
    use crate::enums::*;
    use crate::events::{SessionEvent, WIN_REASON};
    use crate::hud::{build_hud, format_clock, oxygen_percent};
    use crate::state::{MenuView, SessionSnapshot};
    use crate::types::{PickTarget, Pose, RayHit, SegmentId, SimTime};

    // ---- Serialization ----

    /// Interact commands carry an optional hit; both shapes must survive JSON.
    #[test]
    fn test_player_command_serde() {
        let commands = vec![
            PlayerCommand::Interact {
                agent: 1,
                hit: Some(RayHit::new(PickTarget::Socket(SegmentId(7)), 1.2)),
                phase: InteractPhase::End,
            },
            PlayerCommand::Interact {
                agent: 0,
                hit: None,
                phase: InteractPhase::Start,
            },
            PlayerCommand::UpdatePose {
                agent: 0,
                pose: Pose::new(Vec3::new(0.1, 1.2, -3.0), Quat::from_rotation_y(0.5)),
            },
            PlayerCommand::Teleport {
                position: Vec3::new(0.5, 0.0, -4.0),
            },
            PlayerCommand::Start,
            PlayerCommand::Restart,
            PlayerCommand::Pause,
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: PlayerCommand = serde_json::from_str(&json).unwrap();
            // PlayerCommand doesn't derive PartialEq
            assert_eq!(json, serde_json::to_string(&back).unwrap());
        }
    }

    #[test]
    fn test_pick_target_json_shape() {
        let json = serde_json::to_string(&PickTarget::Part(SegmentId(3))).unwrap();
        assert_eq!(json, r#"{"kind":"Part","segment":3}"#);
    }

    #[test]
    fn test_session_event_serde() {
        let event = SessionEvent::SessionEnded {
            state: SessionState::Win,
            reason: WIN_REASON.to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: SessionEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }

    #[test]
    fn test_default_snapshot_serializes() {
        let snapshot = SessionSnapshot::default();
        assert_eq!(snapshot.state, SessionState::Menu);
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"Menu\""));
    }

    // ---- Types ----

    #[test]
    fn test_pose_world_axis() {
        let pose = Pose::new(Vec3::ZERO, Quat::from_rotation_z(std::f32::consts::FRAC_PI_2));
        let axis = pose.world_axis(Vec3::X);
        assert!((axis - Vec3::Y).length() < 1e-6, "got {axis}");
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..4 {
            time.advance(0.25);
        }
        assert_eq!(time.frame, 4);
        assert!((time.elapsed_secs - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_session_state_terminal() {
        assert!(!SessionState::Menu.is_terminal());
        assert!(!SessionState::Playing.is_terminal());
        assert!(SessionState::Win.is_terminal());
        assert!(SessionState::Loss.is_terminal());
    }

    // ---- HUD ----

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(120.0), "2:00");
        assert_eq!(format_clock(119.99), "1:59");
        assert_eq!(format_clock(65.4), "1:05");
        assert_eq!(format_clock(9.0), "0:09");
        assert_eq!(format_clock(0.0), "0:00");
        assert_eq!(format_clock(-3.0), "0:00");
        assert_eq!(format_clock(f64::NAN), "0:00");
    }

    #[test]
    fn test_hud_thresholds() {
        let calm = build_hud(90.0, 80.0);
        assert_eq!(calm.clock, "1:30");
        assert_eq!(calm.oxygen_percent, 80);
        assert!(!calm.time_critical);
        assert!(!calm.oxygen_critical);
        assert!((calm.oxygen_fraction - 0.8).abs() < 1e-6);

        let dire = build_hud(29.5, 30.0);
        assert!(dire.time_critical);
        assert!(dire.oxygen_critical);

        assert_eq!(oxygen_percent(49.5), 50);
        assert_eq!(oxygen_percent(-2.0), 0);
    }

    #[test]
    fn test_menu_text() {
        assert_eq!(MenuView::Start.title(), "STATION SAVER");
        assert_eq!(MenuView::Start.body().len(), 3);
        let win = MenuView::Success { oxygen_left: 42 };
        assert_eq!(win.body(), vec!["Oxygen: 42%".to_string()]);
        assert_eq!(win.prompt(), "PRESS [ A ] TO RESTART");
    }

    // ---- Config ----

    #[test]
    fn test_default_config_is_valid() {
        let config = SessionConfig::default();
        config.validate().unwrap();
        assert_eq!(config.session_length_secs, 120.0);
        assert_eq!(config.difficulty_tiers.len(), 4);
    }

    #[test]
    fn test_spawn_interval_steps_down() {
        let config = SessionConfig::default();
        assert_eq!(config.spawn_interval(0.0), 8.0);
        assert_eq!(config.spawn_interval(29.9), 8.0);
        assert_eq!(config.spawn_interval(30.0), 6.0);
        assert_eq!(config.spawn_interval(75.0), 4.0);
        assert_eq!(config.spawn_interval(119.0), 2.5);
        // Played time can't be negative, but the lookup must still answer.
        assert_eq!(config.spawn_interval(-1.0), 8.0);
    }

    #[test]
    fn test_partial_json_config_uses_defaults() {
        let config =
            SessionConfig::from_json_str(r#"{ "alignment_tolerance_deg": 30.0 }"#).unwrap();
        assert_eq!(config.alignment_tolerance_deg, 30.0);
        assert_eq!(config.starting_oxygen, 100.0);
        assert!((config.alignment_tolerance_rad() - 30f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let cases = [
            r#"{ "session_length_secs": 0.0 }"#,
            r#"{ "starting_oxygen": 150.0 }"#,
            r#"{ "alignment_tolerance_deg": 95.0 }"#,
            r#"{ "agent_count": 0 }"#,
            r#"{ "difficulty_tiers": [] }"#,
            r#"{ "difficulty_tiers": [{ "starts_at_secs": 5.0, "spawn_interval_secs": 3.0 }] }"#,
            r#"{ "difficulty_tiers": [
                { "starts_at_secs": 0.0, "spawn_interval_secs": 3.0 },
                { "starts_at_secs": 0.0, "spawn_interval_secs": 2.0 }
            ] }"#,
            r#"{ "oxygen_recovery_per_sec": -1.0 }"#,
        ];
        for json in cases {
            let err = SessionConfig::from_json_str(json).unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid(_)),
                "expected Invalid for {json}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_infinite_values_rejected() {
        let endless = SessionConfig {
            session_length_secs: f64::INFINITY,
            ..Default::default()
        };
        assert!(matches!(endless.validate(), Err(ConfigError::Invalid(_))));

        let unlimited_reach = SessionConfig {
            max_interact_distance: f32::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            unlimited_reach.validate(),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = SessionConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SessionConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
