//! Тесты детерминизма
//!
//! Одинаковые seed + последовательность delta + скрипт ввода → идентичный мир

use bevy::prelude::*;
use gridfire_simulation::components::Observer;
use gridfire_simulation::{
    create_game_app, spawn_enemy, step_frame, world_snapshot, Arsenal, CombatFeedback, Enemy, FrameBuffer,
    Health, MotionState, PlayerDamaged, PlayerInput,
};

/// Неровные delta, как у реального окна
const DELTAS: [u32; 7] = [16, 17, 16, 33, 8, 16, 25];

fn scripted_input(tick: usize, input: &mut PlayerInput) {
    input.forward = tick % 120 < 70;
    input.strafe_left = tick % 90 > 60;
    input.turn_right = tick % 200 > 150;
    input.sprint = tick % 100 < 40;
    input.crouch = tick % 250 > 230;
    input.mouse_dx = ((tick % 11) as f32 - 5.0) * 9.0;
    input.fire = tick % 37 == 0;
    input.melee = tick % 53 == 0;
    if tick % 170 == 0 {
        input.weapon_slot = Some((tick / 170 % 3 + 1) as u8);
    }
}

/// Прогоняет уровень и возвращает snapshot мира
fn run_simulation(seed: u64, tick_count: usize) -> Vec<u8> {
    let mut app = create_game_app(seed);
    let enemy = spawn_enemy(app.world_mut(), Vec2::new(5.5, 5.5), 120);
    spawn_enemy(app.world_mut(), Vec2::new(12.5, 7.5), 80);
    app.world_mut().get_mut::<Enemy>(enemy).unwrap().attack_distance = 1.5;

    for tick in 0..tick_count {
        scripted_input(tick, &mut app.world_mut().resource_mut::<PlayerInput>());
        if tick % 45 == 10 {
            app.world_mut().send_event(PlayerDamaged { damage: 7 });
        }
        step_frame(&mut app, DELTAS[tick % DELTAS.len()]);
    }

    let world = app.world_mut();
    let mut snapshot = world_snapshot::<Observer>(world);
    snapshot.extend(world_snapshot::<MotionState>(world));
    snapshot.extend(world_snapshot::<Health>(world));
    snapshot.extend(world_snapshot::<Arsenal>(world));
    snapshot.extend(world_snapshot::<CombatFeedback>(world));
    snapshot.extend(format!("{:?}", world.resource::<FrameBuffer>()).into_bytes());
    snapshot
}

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;
    const TICK_COUNT: usize = 600;

    let snapshot1 = run_simulation(SEED, TICK_COUNT);
    let snapshot2 = run_simulation(SEED, TICK_COUNT);

    assert_eq!(
        snapshot1, snapshot2,
        "Симуляция с одинаковым seed ({}) дала разные результаты!",
        SEED
    );
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;
    const TICK_COUNT: usize = 300;

    let snapshots: Vec<_> = (0..3).map(|_| run_simulation(SEED, TICK_COUNT)).collect();

    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(snapshots[0], *snapshot, "Прогон {} дал результат отличный от прогона 0", i);
    }
}
