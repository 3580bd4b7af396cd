//! Сессия: game over + новая игра
//!
//! Game over - наблюдаемый переход состояния, не ошибка. Host проверяет
//! `SessionState::game_over` (или читает `GameOver`) после каждого тика
//! и вызывает `start_new_game`.

use bevy::prelude::*;

use crate::combat::{Ammo, Arsenal, CombatFeedback, ScreenShake};
use crate::components::{Health, MotionState, Observer, Player, PlayerStats};
use crate::pickups::Pickup;
use crate::settings::GameSettings;

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionState {
    pub game_over: bool,
    /// Сколько раз начиналась игра (0 - первая сессия)
    pub restarts: u32,
}

/// Событие: здоровье игрока упало ниже 1
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct GameOver {
    pub at_ms: u64,
}

/// Run condition для gameplay систем
pub fn session_running(session: Res<SessionState>) -> bool {
    !session.game_over
}

/// Сбросить игрока и pickups в стартовое состояние
///
/// Враги и эффекты принадлежат внешнему registry - их host пересоздаёт сам.
pub fn start_new_game(world: &mut World) {
    let settings = world.get_resource::<GameSettings>().cloned().unwrap_or_default();
    let (x, y) = settings.player.start_position;

    let mut players = world.query_filtered::<(
        &mut Observer,
        &mut MotionState,
        &mut Health,
        &mut Ammo,
        &mut Arsenal,
        &mut CombatFeedback,
        &mut PlayerStats,
    ), With<Player>>();

    for (mut observer, mut motion, mut health, mut ammo, mut arsenal, mut feedback, mut stats) in
        players.iter_mut(world)
    {
        *observer = Observer::new(Vec2::new(x, y), settings.player.start_angle);
        *motion = MotionState::new(settings.stamina.max);
        *health = Health::new(settings.player.max_health);
        *ammo = Ammo::new(settings.player.start_ammo, settings.player.max_ammo);
        *arsenal = Arsenal::default();
        *feedback = CombatFeedback::default();
        *stats = PlayerStats::default();
    }

    let mut pickups = world.query::<&mut Pickup>();
    for mut pickup in pickups.iter_mut(world) {
        pickup.reset();
    }

    if let Some(mut shake) = world.get_resource_mut::<ScreenShake>() {
        *shake = ScreenShake::default();
    }

    let mut session = world.get_resource_or_insert_with(SessionState::default);
    session.game_over = false;
    session.restarts += 1;
    let restarts = session.restarts;

    crate::log_info(&format!("New game started (restart #{})", restarts));
}
