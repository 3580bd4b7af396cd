//! Combat: WeaponFSM, hitscan, melee, урон и CombatFeedback
//!
//! Ответственность ядра:
//! - Weapon FSM (Idle ↔ Reloading), боезапас, arsenal
//! - Попадания: hitscan по центру экрана, melee по радиусу
//! - Урон игроку приходит снаружи (`PlayerDamaged` от AI host-а)
//! - Feedback: damage indicators, регенерация, melee cooldown, screen shake

use bevy::prelude::*;

use crate::SimulationSet;

pub mod arsenal;
pub mod damage;
pub mod feedback;
pub mod hitscan;
pub mod melee;
pub mod systems;
pub mod weapon;


// Re-export основных типов
pub use arsenal::Arsenal;
pub use damage::{indicator_angle, DamageSource, EnemyDamaged, EntityDied, PlayerDamaged};
pub use feedback::{CombatFeedback, DamageIndicator, ScreenShake};
pub use hitscan::{hitscan_target, wall_depth_at, WeaponFired};
pub use melee::melee_targets;
pub use weapon::{Ammo, Weapon, WeaponKind, WeaponPhase};

/// Combat Plugin
///
/// SimulationSet::Weapon (chain):
/// 1. switch_weapon - hotbar слот
/// 2. fire_weapon - Idle → Reloading, `WeaponFired`
/// 3. advance_weapons - frame clock активного оружия
///
/// SimulationSet::Combat (chain):
/// 1. resolve_hitscan - `WeaponFired` → `EnemyDamaged`
/// 2. player_melee - AoE → `EnemyDamaged`
/// 3. apply_enemy_damage - Dead, kills, `EntityDied`
/// 4. apply_player_damage - `PlayerDamaged` → indicators, shake, game over
/// 5. regenerate_health, tick_melee_cooldown, update_screen_shake
///
/// SimulationSet::Feedback: prune_damage_indicators
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<WeaponFired>()
            .add_event::<PlayerDamaged>()
            .add_event::<EnemyDamaged>()
            .add_event::<EntityDied>()
            .init_resource::<ScreenShake>();

        app.add_systems(
            Update,
            (
                (systems::switch_weapon, systems::fire_weapon, systems::advance_weapons)
                    .chain()
                    .in_set(SimulationSet::Weapon),
                (
                    hitscan::resolve_hitscan,
                    melee::player_melee,
                    damage::apply_enemy_damage,
                    damage::apply_player_damage,
                    systems::regenerate_health,
                    systems::tick_melee_cooldown,
                    systems::update_screen_shake,
                )
                    .chain()
                    .in_set(SimulationSet::Combat),
                systems::prune_damage_indicators.in_set(SimulationSet::Feedback),
            ),
        );
    }
}
