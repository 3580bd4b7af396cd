//! Акторы: игрок, враги, здоровье

use bevy::prelude::*;

/// Marker component для player-controlled entity (observer)
///
/// В симуляции ровно один такой entity. Systems берут его через
/// `Query<..., With<Player>>::single()` и молча выходят, если его нет.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Враг (hostile)
///
/// AI/pathing живут снаружи - ядро только читает позицию, alive-state
/// и `attack_distance`.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Enemy {
    /// Дистанция атаки; > 0 означает, что враг сейчас в агрессии (engaged)
    pub attack_distance: f32,
}

impl Enemy {
    pub fn is_engaged(&self) -> bool {
        self.attack_distance > 0.0
    }
}

/// Здоровье
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    pub fn heal(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.max);
    }
}

/// Компонент-маркер: entity мертв (Health == 0)
///
/// Труп остаётся на месте и продолжает проецироваться (спрайт трупа).
#[derive(Component, Debug, Clone, Copy)]
pub struct Dead;

/// Статистика игрока за сессию
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerStats {
    pub kills: u32,
}
