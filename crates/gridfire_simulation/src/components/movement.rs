//! Movement state: stamina, sprint, crouch

use bevy::prelude::*;

/// Состояние движения observer-а
///
/// Инвариант: 0.0 ≤ stamina ≤ max
/// Пока sprint + движение - stamina только убывает, иначе только растёт.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct MotionState {
    pub stamina: f32,
    pub max_stamina: f32,
    pub sprinting: bool,
    pub crouching: bool,
}

impl Default for MotionState {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl MotionState {
    pub fn new(max_stamina: f32) -> Self {
        Self {
            stamina: max_stamina,
            max_stamina,
            sprinting: false,
            crouching: false,
        }
    }

    pub fn drain(&mut self, rate: f32, delta_ms: f32) {
        self.stamina = (self.stamina - rate * delta_ms).max(0.0);
    }

    pub fn recover(&mut self, rate: f32, delta_ms: f32) {
        self.stamina = (self.stamina + rate * delta_ms).min(self.max_stamina);
    }

    pub fn fraction(&self) -> f32 {
        if self.max_stamina <= 0.0 {
            return 0.0;
        }
        self.stamina / self.max_stamina
    }
}
