//! Melee: удар по всем живым врагам в радиусе (AoE, без single-target)

use bevy::prelude::*;

use crate::combat::damage::{DamageSource, EnemyDamaged};
use crate::combat::feedback::CombatFeedback;
use crate::components::{Dead, Enemy, Health, Observer, Player, WorldPosition};
use crate::input::PlayerInput;
use crate::notifications::{GameNotification, SoundCue};
use crate::settings::GameSettings;

/// Враги строго ближе `radius`
pub fn melee_targets(origin: Vec2, radius: f32, enemies: impl Iterator<Item = (Entity, Vec2)>) -> Vec<Entity> {
    enemies
        .filter(|(_, position)| position.distance(origin) < radius)
        .map(|(entity, _)| entity)
        .collect()
}

/// System: melee по кнопке
///
/// Cooldown > 0 → no-op. Иначе cooldown = melee_cooldown_ms и урон всем в радиусе.
pub fn player_melee(
    input: Res<PlayerInput>,
    settings: Res<GameSettings>,
    mut players: Query<(&Observer, &mut CombatFeedback), With<Player>>,
    enemies: Query<(Entity, &WorldPosition, &Health), (With<Enemy>, Without<Dead>)>,
    mut damage: EventWriter<EnemyDamaged>,
    mut notifications: EventWriter<GameNotification>,
) {
    if !input.melee {
        return;
    }
    let Ok((observer, mut feedback)) = players.single_mut() else {
        return;
    };
    if !feedback.melee_ready() {
        return;
    }

    let combat = &settings.combat;
    feedback.start_melee_cooldown(combat.melee_cooldown_ms);
    notifications.write(GameNotification::PlaySound(SoundCue::Shot));

    let alive = enemies
        .iter()
        .filter(|(_, _, health)| health.is_alive())
        .map(|(entity, position, _)| (entity, position.0));
    let targets = melee_targets(observer.position, combat.melee_radius, alive);

    crate::log(&format!("Melee swing: {} target(s) in range", targets.len()));

    for target in targets {
        damage.write(EnemyDamaged {
            target,
            damage: combat.melee_damage,
            source: DamageSource::Melee,
        });
    }
}
