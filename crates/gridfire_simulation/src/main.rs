//! Headless симуляция GRIDFIRE
//!
//! Прогоняет уровень по умолчанию со скриптованным вводом и двумя врагами.
//! Удобно для профилирования и проверки детерминизма без окна.

use bevy::prelude::*;
use gridfire_simulation::{
    create_game_app, log_info, spawn_enemy, start_new_game, step_frame, Enemy, HudState, PlayerDamaged,
    PlayerInput, SessionState,
};

const FRAME_MS: u32 = 16;
const TICKS: u32 = 1500;

/// Скрипт ввода: идём вперёд, периодически поворачиваем, спринтуем и стреляем
fn scripted_input(tick: u32, input: &mut PlayerInput) {
    input.forward = tick % 400 < 250;
    input.turn_left = tick % 400 >= 250 && tick % 400 < 300;
    input.sprint = tick % 200 < 80;
    input.crouch = tick % 600 > 550;
    input.fire = tick % 45 == 0;
    input.melee = tick % 150 == 75;
    if tick % 500 == 250 {
        input.weapon_slot = Some(((tick / 500) % 3 + 1) as u8);
    }
}

fn main() {
    let seed = 42;
    println!("Starting GRIDFIRE headless simulation (seed: {})", seed);

    let mut app = create_game_app(seed);
    let brute = spawn_enemy(app.world_mut(), Vec2::new(6.5, 5.5), 100);
    spawn_enemy(app.world_mut(), Vec2::new(9.5, 12.5), 150);

    for tick in 0..TICKS {
        scripted_input(tick, &mut app.world_mut().resource_mut::<PlayerInput>());

        // Внешний AI: первый враг агрится и бьёт раз в секунду
        if tick == 300 {
            if let Some(mut enemy) = app.world_mut().get_mut::<Enemy>(brute) {
                enemy.attack_distance = 1.5;
            }
        }
        if tick >= 300 && tick % 60 == 0 {
            app.world_mut().send_event(PlayerDamaged { damage: 12 });
        }

        step_frame(&mut app, FRAME_MS);

        if app.world().resource::<SessionState>().game_over {
            log_info(&format!("Tick {}: game over, restarting", tick));
            start_new_game(app.world_mut());
        }

        if tick % 100 == 0 {
            let hud = app.world().resource::<HudState>();
            println!(
                "Tick {}: HP {}/{} ammo {}/{} kills {} stamina {:.0}% {:?}{}",
                tick,
                hud.health,
                hud.max_health,
                hud.ammo,
                hud.max_ammo,
                hud.kills,
                hud.stamina_fraction * 100.0,
                hud.weapon,
                if hud.reloading { " (reloading)" } else { "" }
            );
        }
    }

    println!("Simulation complete!");
}
