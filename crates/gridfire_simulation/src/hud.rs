//! HUD model: снимок состояния для отрисовки host-ом
//!
//! Ядро ничего не рисует - только собирает числа раз в тик.

use bevy::prelude::*;

use crate::combat::{Ammo, Arsenal, CombatFeedback, WeaponKind};
use crate::components::{Health, MotionState, Observer, Player, PlayerStats};
use crate::rendering::projection::normalize_delta;
use crate::SimulationSet;

/// Цвет полоски stamina: > 50% High, > 20% Medium, иначе Low
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StaminaTier {
    #[default]
    High,
    Medium,
    Low,
}

impl StaminaTier {
    pub fn from_fraction(fraction: f32) -> Self {
        if fraction > 0.5 {
            StaminaTier::High
        } else if fraction > 0.2 {
            StaminaTier::Medium
        } else {
            StaminaTier::Low
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct HudState {
    pub health: u32,
    pub max_health: u32,
    pub ammo: u32,
    pub max_ammo: u32,
    pub kills: u32,
    pub stamina_fraction: f32,
    pub stamina_tier: StaminaTier,
    pub sprinting: bool,
    pub crouching: bool,
    pub weapon: WeaponKind,
    pub weapon_frame: u32,
    pub reloading: bool,
    pub reload_progress: f32,
    /// Углы индикаторов относительно heading (радианы, (−π, π])
    pub damage_indicators: Vec<f32>,
}

impl Default for HudState {
    fn default() -> Self {
        Self {
            health: 0,
            max_health: 0,
            ammo: 0,
            max_ammo: 0,
            kills: 0,
            stamina_fraction: 1.0,
            stamina_tier: StaminaTier::High,
            sprinting: false,
            crouching: false,
            weapon: WeaponKind::Shotgun,
            weapon_frame: 0,
            reloading: false,
            reload_progress: 0.0,
            damage_indicators: Vec::new(),
        }
    }
}

/// System: обновить HudState из компонентов игрока
pub fn update_hud(
    mut hud: ResMut<HudState>,
    players: Query<
        (&Observer, &Health, &Ammo, &Arsenal, &MotionState, &CombatFeedback, &PlayerStats),
        With<Player>,
    >,
) {
    let Ok((observer, health, ammo, arsenal, motion, feedback, stats)) = players.single() else {
        return;
    };
    let weapon = arsenal.active();
    let fraction = motion.fraction();

    hud.health = health.current;
    hud.max_health = health.max;
    hud.ammo = ammo.current;
    hud.max_ammo = ammo.max;
    hud.kills = stats.kills;
    hud.stamina_fraction = fraction;
    hud.stamina_tier = StaminaTier::from_fraction(fraction);
    hud.sprinting = motion.sprinting;
    hud.crouching = motion.crouching;
    hud.weapon = weapon.kind;
    hud.weapon_frame = weapon.current_frame();
    hud.reloading = weapon.is_reloading();
    hud.reload_progress = weapon.reload_progress();
    hud.damage_indicators = feedback
        .indicators
        .iter()
        .map(|indicator| normalize_delta(indicator.angle - observer.angle))
        .collect();
}

/// HUD Plugin: update_hud в конце Feedback (после prune индикаторов)
pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HudState>().add_systems(
            Update,
            update_hud
                .after(crate::combat::systems::prune_damage_indicators)
                .in_set(SimulationSet::Feedback),
        );
    }
}
