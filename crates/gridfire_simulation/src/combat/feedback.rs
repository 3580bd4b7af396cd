//! CombatFeedback - таймерное состояние после боевых событий
//!
//! - damage indicators (угол на атакующего + timestamp), живут 1000 ms
//! - задержка регенерации здоровья
//! - melee cooldown
//! - screen shake (resource, параметры для renderer-а)

use bevy::prelude::*;
use rand::Rng;

use crate::components::Health;

/// Индикатор направления урона
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct DamageIndicator {
    /// Мировой угол от observer-а к атакующему (atan2)
    pub angle: f32,
    pub timestamp_ms: u64,
}

impl DamageIndicator {
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.timestamp_ms)
    }
}

#[derive(Component, Debug, Clone, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct CombatFeedback {
    pub indicators: Vec<DamageIndicator>,
    /// Время с последнего срабатывания регенерации
    pub regen_elapsed_ms: u32,
    /// ≤ 0 → melee доступен
    pub melee_cooldown_ms: f32,
}

impl CombatFeedback {
    pub fn record_indicator(&mut self, angle: f32, now_ms: u64) {
        self.indicators.push(DamageIndicator {
            angle,
            timestamp_ms: now_ms,
        });
    }

    /// Удалить индикаторы с возрастом ≥ lifetime
    pub fn prune_indicators(&mut self, now_ms: u64, lifetime_ms: u64) -> usize {
        let before = self.indicators.len();
        self.indicators.retain(|indicator| indicator.age_ms(now_ms) < lifetime_ms);
        before - self.indicators.len()
    }

    /// +1 health, когда накоплено больше `delay_ms`.
    ///
    /// Таймер сбрасывается при каждом срабатывании, даже при полном здоровье.
    pub fn tick_regen(&mut self, health: &mut Health, delta_ms: u32, delay_ms: u32) -> bool {
        self.regen_elapsed_ms = self.regen_elapsed_ms.saturating_add(delta_ms);
        if self.regen_elapsed_ms <= delay_ms {
            return false;
        }
        self.regen_elapsed_ms = 0;

        if health.is_alive() && !health.is_full() {
            health.heal(1);
            return true;
        }
        false
    }

    pub fn melee_ready(&self) -> bool {
        self.melee_cooldown_ms <= 0.0
    }

    pub fn start_melee_cooldown(&mut self, cooldown_ms: f32) {
        self.melee_cooldown_ms = cooldown_ms;
    }

    pub fn tick_melee_cooldown(&mut self, delta_ms: f32) {
        if self.melee_cooldown_ms > 0.0 {
            self.melee_cooldown_ms -= delta_ms;
        }
    }
}

/// Тряска экрана: intensity затухает линейно, offset - случайный сдвиг кадра
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenShake {
    pub intensity: f32,
    pub offset: Vec2,
}

impl ScreenShake {
    pub fn trigger(&mut self, intensity: f32) {
        self.intensity = self.intensity.max(intensity);
    }

    pub fn is_active(&self) -> bool {
        self.intensity > 0.0
    }

    /// Затухание + новый jitter. Без тряски offset == 0.
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R, decay_per_ms: f32, delta_ms: f32) {
        if !self.is_active() {
            self.offset = Vec2::ZERO;
            return;
        }

        let amplitude = self.intensity;
        self.offset = Vec2::new(
            rng.gen_range(-amplitude..=amplitude),
            rng.gen_range(-amplitude..=amplitude),
        );
        self.intensity = (self.intensity - decay_per_ms * delta_ms).max(0.0);
    }
}
