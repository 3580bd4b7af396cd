//! Movement: MotionController (WASD, sprint/crouch, stamina, grid collision, heading)

use bevy::prelude::*;

use crate::SimulationSet;

pub mod controller;
pub mod systems;

#[cfg(test)]
mod controller_tests;

pub use controller::{MotionParams, MovementIntent, DIAGONAL_CORRECTION};
pub use systems::player_motion;

/// Movement Plugin
///
/// Регистрирует `player_motion` в `SimulationSet::Motion`.
pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, player_motion.in_set(SimulationSet::Motion));
    }
}
