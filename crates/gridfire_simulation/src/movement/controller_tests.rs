//! Tests for MotionController.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use std::f32::consts::{FRAC_1_SQRT_2, FRAC_PI_4, TAU};

    use crate::components::{MotionState, Observer};
    use crate::input::PlayerInput;
    use crate::movement::controller::*;
    use crate::world::GridMap;

    const DT: f32 = 10.0;

    /// Пустая комната 12×12 со стенами по краю
    fn open_room() -> GridMap {
        let mut rows = vec!["111111111111".to_string()];
        for _ in 0..10 {
            rows.push("1..........1".to_string());
        }
        rows.push("111111111111".to_string());
        let refs: Vec<&str> = rows.iter().map(|r| r.as_str()).collect();
        GridMap::from_rows(&refs)
    }

    fn forward() -> PlayerInput {
        PlayerInput {
            forward: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_single_key_moves_along_heading() {
        let map = open_room();
        let params = MotionParams::default();
        let mut observer = Observer::new(Vec2::new(5.0, 5.0), 0.0);
        let mut state = MotionState::new(100.0);

        tick(&mut observer, &mut state, &forward(), DT, &map, &params);

        assert!((observer.position.x - (5.0 + params.speed * DT)).abs() < 1e-5);
        assert_eq!(observer.position.y, 5.0);
    }

    #[test]
    fn test_diagonal_movement_is_corrected() {
        let map = open_room();
        let params = MotionParams::default();

        let mut straight = Observer::new(Vec2::new(5.0, 5.0), 0.0);
        let mut state = MotionState::new(100.0);
        tick(&mut straight, &mut state, &forward(), DT, &map, &params);
        let straight_dx = straight.position.x - 5.0;

        let mut diagonal = Observer::new(Vec2::new(5.0, 5.0), 0.0);
        let mut state = MotionState::new(100.0);
        let input = PlayerInput {
            forward: true,
            strafe_right: true,
            ..Default::default()
        };
        tick(&mut diagonal, &mut state, &input, DT, &map, &params);

        let dx = diagonal.position.x - 5.0;
        let dy = diagonal.position.y - 5.0;
        assert!((dx - straight_dx * FRAC_1_SQRT_2).abs() < 1e-5);
        assert!((dy - straight_dx * FRAC_1_SQRT_2).abs() < 1e-5);
    }

    #[test]
    fn test_strafe_directions() {
        // heading 0 → forward = +X, strafe_left = -Y, strafe_right = +Y
        let left = PlayerInput {
            strafe_left: true,
            ..Default::default()
        };
        let right = PlayerInput {
            strafe_right: true,
            ..Default::default()
        };

        let intent = movement_intent(0.0, &left, 1.0);
        assert!(intent.displacement.abs_diff_eq(Vec2::new(0.0, -1.0), 1e-6));
        assert_eq!(intent.num_key_pressed, 0);

        let intent = movement_intent(0.0, &right, 1.0);
        assert!(intent.displacement.abs_diff_eq(Vec2::new(0.0, 1.0), 1e-6));

        let idle = movement_intent(0.0, &PlayerInput::default(), 1.0);
        assert_eq!(idle.num_key_pressed, -1);
        assert!(!idle.is_moving());
    }

    #[test]
    fn test_axis_separated_collision_slides_along_wall() {
        // Колонка x=2 - стена в строках 1-2
        let map = GridMap::from_rows(&["11111", "1.1.1", "1.1.1", "1...1", "11111"]);
        let params = MotionParams::default();
        let mut observer = Observer::new(Vec2::new(1.9, 1.5), FRAC_PI_4);
        let mut state = MotionState::new(100.0);

        tick(&mut observer, &mut state, &forward(), DT, &map, &params);

        assert_eq!(observer.position.x, 1.9, "X must be blocked by the wall");
        assert!(observer.position.y > 1.5, "Y must slide");
    }

    #[test]
    fn test_resolve_collision_uses_updated_x_for_y_probe() {
        let map = GridMap::from_rows(&["1111", "1..1", "1.11", "1111"]);
        // X свободен → x переходит в колонку 2; проба Y идёт уже из колонки 2 → стена (2,2)
        let next = resolve_collision(Vec2::new(1.95, 1.95), Vec2::new(0.1, 0.1), 1.0, &map);
        assert!((next.x - 2.05).abs() < 1e-5);
        assert_eq!(next.y, 1.95);
    }

    #[test]
    fn test_crouch_suppresses_sprint() {
        let map = open_room();
        let params = MotionParams::default();
        let mut observer = Observer::new(Vec2::new(5.0, 5.0), 0.0);
        let mut state = MotionState::new(100.0);
        state.stamina = 50.0;

        let input = PlayerInput {
            forward: true,
            sprint: true,
            crouch: true,
            ..Default::default()
        };
        tick(&mut observer, &mut state, &input, DT, &map, &params);

        assert!(state.crouching);
        assert!(!state.sprinting);
        // Не sprint → recover
        assert!((state.stamina - (50.0 + params.recover_rate * DT)).abs() < 1e-4);
        let expected = params.speed * DT * params.crouch_multiplier;
        assert!((observer.position.x - 5.0 - expected).abs() < 1e-5);
    }

    #[test]
    fn test_sprint_requires_stamina_above_threshold() {
        let map = open_room();
        let params = MotionParams::default();
        let mut observer = Observer::new(Vec2::new(5.0, 5.0), 0.0);
        let mut state = MotionState::new(100.0);
        state.stamina = params.sprint_threshold;

        let input = PlayerInput {
            forward: true,
            sprint: true,
            ..Default::default()
        };
        tick(&mut observer, &mut state, &input, DT, &map, &params);
        assert!(!state.sprinting);
    }

    #[test]
    fn test_sprint_without_movement_does_not_drain() {
        let map = open_room();
        let params = MotionParams::default();
        let mut observer = Observer::new(Vec2::new(5.0, 5.0), 0.0);
        let mut state = MotionState::new(100.0);
        state.stamina = 40.0;

        let input = PlayerInput {
            sprint: true,
            ..Default::default()
        };
        tick(&mut observer, &mut state, &input, DT, &map, &params);

        assert!(!state.sprinting);
        assert!(state.stamina > 40.0);
    }

    #[test]
    fn test_stamina_sprint_then_rest_matches_closed_form() {
        let map = open_room();
        let params = MotionParams::default();
        let mut state = MotionState::new(100.0);
        let sprint = PlayerInput {
            forward: true,
            sprint: true,
            ..Default::default()
        };

        // Бегаем туда-сюда через heading, чтобы не упереться в стену
        let n = 100;
        for i in 0..n {
            let mut observer = Observer::new(Vec2::new(5.0, 5.0), if i % 2 == 0 { 0.0 } else { 3.0 });
            tick(&mut observer, &mut state, &sprint, DT, &map, &params);
            assert!(state.stamina >= 0.0 && state.stamina <= state.max_stamina);
        }

        let m = 50;
        for _ in 0..m {
            let mut observer = Observer::new(Vec2::new(5.0, 5.0), 0.0);
            tick(&mut observer, &mut state, &PlayerInput::default(), DT, &map, &params);
        }

        let expected = (100.0 - n as f32 * params.drain_rate * DT + m as f32 * params.recover_rate * DT)
            .clamp(0.0, 100.0);
        assert!((state.stamina - expected).abs() < 1e-2, "stamina {} != {}", state.stamina, expected);
    }

    #[test]
    fn test_stamina_never_negative_or_above_max() {
        let params = MotionParams::default();
        let mut state = MotionState::new(100.0);

        for _ in 0..1000 {
            update_stamina(&mut state, true, 33.0, &params);
            assert!(state.stamina >= 0.0);
        }
        assert_eq!(state.stamina, 0.0);

        for _ in 0..1000 {
            update_stamina(&mut state, false, 33.0, &params);
            assert!(state.stamina <= 100.0);
        }
        assert_eq!(state.stamina, 100.0);
    }

    #[test]
    fn test_heading_wraps_into_range() {
        let params = MotionParams::default();
        let left = PlayerInput {
            turn_left: true,
            ..Default::default()
        };

        let angle = update_heading(0.001, &left, DT, &params);
        assert!(angle >= 0.0 && angle < TAU);
        assert!((angle - (TAU + 0.001 - params.rotation_speed * DT)).abs() < 1e-4);

        assert_eq!(wrap_angle(-0.0), 0.0);
        assert!(wrap_angle(TAU) < TAU);
    }

    #[test]
    fn test_mouse_delta_is_clamped() {
        let params = MotionParams::default();
        let input = PlayerInput {
            mouse_dx: 1000.0,
            ..Default::default()
        };

        let angle = update_heading(1.0, &input, DT, &params);
        let expected = 1.0 + params.mouse_max_rel * params.mouse_sensitivity * DT;
        assert!((angle - expected).abs() < 1e-5);
    }

    #[test]
    fn test_zero_delta_is_noop() {
        let map = open_room();
        let params = MotionParams::default();
        let mut observer = Observer::new(Vec2::new(5.0, 5.0), 1.0);
        let mut state = MotionState::new(100.0);
        state.stamina = 30.0;

        let before = (observer, state);
        tick(&mut observer, &mut state, &forward(), 0.0, &map, &params);
        assert_eq!((observer, state), before);
    }

    #[test]
    fn test_sprint_multiplies_displacement() {
        let map = open_room();
        let params = MotionParams::default();
        let mut observer = Observer::new(Vec2::new(5.0, 5.0), 0.0);
        let mut state = MotionState::new(100.0);

        let input = PlayerInput {
            forward: true,
            sprint: true,
            ..Default::default()
        };
        tick(&mut observer, &mut state, &input, DT, &map, &params);

        assert!(state.sprinting);
        let expected = params.speed * DT * params.sprint_multiplier;
        assert!((observer.position.x - 5.0 - expected).abs() < 1e-5);
        assert_eq!(observer.position.y, 5.0);
    }

    #[test]
    fn test_crouch_shrinks_collision_probe() {
        // Стена в колонке x=3; до неё 0.1
        let map = GridMap::from_rows(&["11111", "1..11", "11111"]);
        let params = MotionParams::default();

        // Стоя: проба speed × size_scale = 0.24 → упирается в стену
        let mut standing = Observer::new(Vec2::new(2.9, 1.5), 0.0);
        let mut state = MotionState::new(100.0);
        tick(&mut standing, &mut state, &forward(), DT, &map, &params);
        assert_eq!(standing.position.x, 2.9);

        // Crouch: проба 0.24 × 0.5 × 0.7 = 0.084 → проходит
        let mut crouching = Observer::new(Vec2::new(2.9, 1.5), 0.0);
        let mut state = MotionState::new(100.0);
        let input = PlayerInput {
            forward: true,
            crouch: true,
            ..Default::default()
        };
        tick(&mut crouching, &mut state, &input, DT, &map, &params);

        let expected = 2.9 + params.speed * DT * params.crouch_multiplier;
        assert!((crouching.position.x - expected).abs() < 1e-5);
    }
}
