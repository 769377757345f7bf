#[cfg(test)]
mod tests {
    use crate::commands::PlayerCommand;
    use crate::enums::*;
    use crate::events::GameEvent;
    use crate::input::InputState;
    use crate::state::FrameSnapshot;
    use crate::types::{Position, SimTime};

    #[test]
    fn test_variant_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Variant::Flat).unwrap(), "\"flat\"");
        let back: Variant = serde_json::from_str("\"sphere\"").unwrap();
        assert_eq!(back, Variant::Sphere);
    }

    /// Verify PlayerCommand round-trips through serde (tagged union).
    #[test]
    fn test_player_command_serde() {
        let commands = vec![
            PlayerCommand::KeyDown { key: "w".into() },
            PlayerCommand::KeyUp { key: "q".into() },
            PlayerCommand::Resize {
                width: 800,
                height: 600,
            },
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: PlayerCommand = serde_json::from_str(&json).unwrap();
            assert_eq!(json, serde_json::to_string(&back).unwrap());
        }

        let parsed: PlayerCommand =
            serde_json::from_str(r#"{"type":"Resize","width":1024,"height":512}"#).unwrap();
        assert!(matches!(
            parsed,
            PlayerCommand::Resize {
                width: 1024,
                height: 512
            }
        ));
    }

    #[test]
    fn test_game_event_tagged() {
        let event = GameEvent::CowAbducted {
            cow_id: 3,
            score: 7,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"CowAbducted\""), "{json}");
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_control_key_mapping() {
        assert_eq!(Control::from_key("w"), Some(Control::Forward));
        assert_eq!(Control::from_key("W"), Some(Control::Forward));
        assert_eq!(Control::from_key("s"), Some(Control::Backward));
        assert_eq!(Control::from_key("a"), Some(Control::StrafeLeft));
        assert_eq!(Control::from_key("d"), Some(Control::StrafeRight));
        assert_eq!(Control::from_key("q"), Some(Control::YawLeft));
        assert_eq!(Control::from_key("e"), Some(Control::YawRight));
        assert_eq!(Control::from_key("ArrowUp"), Some(Control::Forward));
        assert_eq!(Control::from_key("x"), None);
        assert_eq!(Control::from_key(" "), None);
    }

    #[test]
    fn test_input_latches_until_release() {
        let mut input = InputState::new();
        assert!(input.process_key("w", true));
        assert!(input.process_key("d", true));
        assert!(!input.process_key("z", true));
        assert!(input.is_held(Control::Forward));
        assert_eq!(input.movement_axes(), (1.0, -1.0));

        // Repeated key-down (auto-repeat) keeps a single entry.
        input.process_key("w", true);
        input.process_key("w", false);
        assert!(!input.is_held(Control::Forward));
        assert_eq!(input.movement_axes(), (1.0, 0.0));
    }

    #[test]
    fn test_opposing_controls_cancel() {
        let input = InputState::holding([
            Control::Forward,
            Control::Backward,
            Control::YawLeft,
            Control::YawRight,
        ]);
        assert_eq!(input.movement_axes(), (0.0, 0.0));
        assert_eq!(input.yaw_axis(), 0.0);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..60 {
            time.advance(1.0 / 60.0);
        }
        assert_eq!(time.tick, 60);
        assert!((time.elapsed_secs - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_planar_range_ignores_height() {
        let a = Position::new(0.0, 5.0, 0.0);
        let b = Position::new(3.0, 0.8, 4.0);
        assert!((a.planar_range_to(&b) - 5.0).abs() < 1e-12);
        assert!(a.range_to(&b) > 5.0);
    }

    #[test]
    fn test_empty_snapshot_serializes() {
        let snapshot = FrameSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: FrameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.score, 0);
        assert!(back.cows.is_empty());
        assert_eq!(back.abducting_count(), 0);
    }
}
