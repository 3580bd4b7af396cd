//! Combat systems: оружие игрока + таймеры feedback-а

use bevy::prelude::*;

use crate::combat::arsenal::Arsenal;
use crate::combat::feedback::{CombatFeedback, ScreenShake};
use crate::combat::hitscan::WeaponFired;
use crate::combat::weapon::Ammo;
use crate::components::{Health, Player};
use crate::input::{FrameClock, PlayerInput};
use crate::notifications::{GameNotification, SoundCue};
use crate::settings::GameSettings;
use crate::DeterministicRng;

/// System: смена оружия по hotbar слоту
pub fn switch_weapon(
    input: Res<PlayerInput>,
    settings: Res<GameSettings>,
    mut players: Query<&mut Arsenal, With<Player>>,
) {
    let Some(slot) = input.weapon_slot else {
        return;
    };
    let Ok(mut arsenal) = players.single_mut() else {
        return;
    };

    let outgoing = arsenal.active().kind;
    if let Some(kind) = arsenal.switch_to(slot, settings.weapon_switch) {
        crate::log(&format!(
            "Weapon switch: {} → {} ({:?})",
            outgoing.name(),
            kind.name(),
            settings.weapon_switch
        ));
    }
}

/// System: выстрел активным оружием
///
/// Busy или пустой боезапас - тихий no-op.
pub fn fire_weapon(
    input: Res<PlayerInput>,
    mut players: Query<(&mut Arsenal, &mut Ammo), With<Player>>,
    mut fired: EventWriter<WeaponFired>,
    mut notifications: EventWriter<GameNotification>,
) {
    if !input.fire {
        return;
    }
    let Ok((mut arsenal, mut ammo)) = players.single_mut() else {
        return;
    };

    let weapon = arsenal.active_mut();
    if !weapon.try_fire(&mut ammo) {
        return;
    }

    fired.write(WeaponFired {
        kind: weapon.kind,
        damage: weapon.damage,
    });
    notifications.write(GameNotification::PlaySound(SoundCue::Shot));
    crate::log(&format!("🔫 {} fired (ammo: {}/{})", weapon.kind.name(), ammo.current, ammo.max));
}

/// System: frame clock активного оружия (убранное не тикает)
pub fn advance_weapons(clock: Res<FrameClock>, mut players: Query<&mut Arsenal, With<Player>>) {
    let Ok(mut arsenal) = players.single_mut() else {
        return;
    };

    let weapon = arsenal.active_mut();
    if weapon.advance(clock.delta_ms) {
        crate::log(&format!("{} ready", weapon.kind.name()));
    }
}

/// System: регенерация здоровья игрока
pub fn regenerate_health(
    clock: Res<FrameClock>,
    settings: Res<GameSettings>,
    mut players: Query<(&mut Health, &mut CombatFeedback), With<Player>>,
) {
    let Ok((mut health, mut feedback)) = players.single_mut() else {
        return;
    };
    feedback.tick_regen(&mut health, clock.delta_ms, settings.combat.health_regen_delay_ms);
}

pub fn tick_melee_cooldown(clock: Res<FrameClock>, mut players: Query<&mut CombatFeedback, With<Player>>) {
    for mut feedback in players.iter_mut() {
        feedback.tick_melee_cooldown(clock.delta());
    }
}

/// System: затухание тряски + jitter из детерминистичного RNG
pub fn update_screen_shake(
    clock: Res<FrameClock>,
    settings: Res<GameSettings>,
    mut rng: ResMut<DeterministicRng>,
    mut shake: ResMut<ScreenShake>,
) {
    shake.update(&mut rng.rng, settings.combat.shake_decay, clock.delta());
}

/// System: удалить damage indicators старше lifetime
pub fn prune_damage_indicators(
    clock: Res<FrameClock>,
    settings: Res<GameSettings>,
    mut players: Query<&mut CombatFeedback, With<Player>>,
) {
    for mut feedback in players.iter_mut() {
        feedback.prune_indicators(clock.now_ms, settings.combat.damage_indicator_lifetime_ms);
    }
}
