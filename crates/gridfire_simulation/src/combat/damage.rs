//! Damage: урон игроку (от внешнего AI) и врагам (hitscan / melee)
//!
//! Поток:
//! - AI host → `PlayerDamaged` → apply_player_damage → indicator, shake, pain, game over
//! - hitscan / melee → `EnemyDamaged` → apply_enemy_damage → `Dead`, kills, `EntityDied`

use bevy::prelude::*;

use crate::combat::feedback::{CombatFeedback, ScreenShake};
use crate::components::{Dead, Enemy, Health, Observer, Player, PlayerStats, WorldPosition};
use crate::input::FrameClock;
use crate::notifications::{GameNotification, SoundCue};
use crate::session::{GameOver, SessionState};
use crate::settings::GameSettings;

/// Событие: игрок получил урон (пишет внешний AI / host)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PlayerDamaged {
    pub damage: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageSource {
    Hitscan,
    Melee,
}

/// Событие: враг получил урон от игрока
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EnemyDamaged {
    pub target: Entity,
    pub damage: u32,
    pub source: DamageSource,
}

/// Событие: враг умер (health == 0)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EntityDied {
    pub entity: Entity,
    pub source: DamageSource,
}

/// Угол индикатора: первый (по Entity) живой engaged враг.
/// Угол - atan2 от observer-а к врагу.
pub fn indicator_angle<'a>(
    observer: Vec2,
    enemies: impl Iterator<Item = (Entity, Vec2, &'a Enemy, &'a Health)>,
) -> Option<f32> {
    enemies
        .filter(|(_, _, enemy, health)| health.is_alive() && enemy.is_engaged())
        .min_by_key(|(entity, ..)| *entity)
        .map(|(_, position, ..)| {
            let d = position - observer;
            d.y.atan2(d.x)
        })
}

/// System: применить `PlayerDamaged`
///
/// Health < 1 → `SessionState::game_over` + `GameOver` (один раз за сессию).
pub fn apply_player_damage(
    mut events: EventReader<PlayerDamaged>,
    clock: Res<FrameClock>,
    settings: Res<GameSettings>,
    mut shake: ResMut<ScreenShake>,
    mut session: ResMut<SessionState>,
    mut players: Query<(&Observer, &mut Health, &mut CombatFeedback), With<Player>>,
    enemies: Query<(Entity, &WorldPosition, &Enemy, &Health), (Without<Player>, Without<Dead>)>,
    mut notifications: EventWriter<GameNotification>,
    mut game_over: EventWriter<GameOver>,
) {
    let Ok((observer, mut health, mut feedback)) = players.single_mut() else {
        events.clear();
        return;
    };

    for event in events.read() {
        if session.game_over {
            break;
        }

        health.take_damage(event.damage);
        shake.trigger(settings.combat.damage_shake);
        notifications.write(GameNotification::PlaySound(SoundCue::PlayerPain));

        let attackers = enemies
            .iter()
            .map(|(entity, position, enemy, enemy_health)| (entity, position.0, enemy, enemy_health));
        if let Some(angle) = indicator_angle(observer.position, attackers) {
            feedback.record_indicator(angle, clock.now_ms);
        }

        crate::log(&format!(
            "Player took {} damage (HP: {}/{})",
            event.damage, health.current, health.max
        ));

        if health.current < 1 {
            session.game_over = true;
            game_over.write(GameOver { at_ms: clock.now_ms });
            notifications.write(GameNotification::ShowText("GAME OVER".to_string()));
            crate::log_info(&format!("💀 Game over at {} ms", clock.now_ms));
        }
    }
}

/// System: применить `EnemyDamaged`
///
/// Урон по уже мёртвому врагу игнорируется; смерть засчитывается один раз.
pub fn apply_enemy_damage(
    mut commands: Commands,
    mut events: EventReader<EnemyDamaged>,
    mut enemies: Query<&mut Health, (With<Enemy>, Without<Player>, Without<Dead>)>,
    mut players: Query<&mut PlayerStats, With<Player>>,
    mut died: EventWriter<EntityDied>,
    mut notifications: EventWriter<GameNotification>,
) {
    for event in events.read() {
        let Ok(mut health) = enemies.get_mut(event.target) else {
            continue;
        };
        if !health.is_alive() {
            continue;
        }

        health.take_damage(event.damage);

        if health.is_alive() {
            notifications.write(GameNotification::PlaySound(SoundCue::NpcPain));
            continue;
        }

        commands.entity(event.target).insert(Dead);
        died.write(EntityDied {
            entity: event.target,
            source: event.source,
        });
        notifications.write(GameNotification::PlaySound(SoundCue::NpcDeath));

        let mut kills = 0;
        if let Ok(mut stats) = players.single_mut() {
            stats.kills += 1;
            kills = stats.kills;
        }

        crate::log_info(&format!(
            "Enemy {:?} killed by {:?} (kills: {})",
            event.target, event.source, kills
        ));
    }
}
