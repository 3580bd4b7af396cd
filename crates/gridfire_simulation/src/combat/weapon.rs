//! Weapon FSM + общий боезапас
//!
//! Выстрел и перезарядка - одно busy-состояние `Reloading` с frame counter-ом:
//! выстрел сразу блокирует оружие до конца анимации.
//!
//! Frame clock оружия тикает всегда. Когда накоплено ≥ interval, clock
//! сбрасывается в 0 (остаток теряется) и, если оружие в Reloading,
//! frame counter +1. Counter == num_frames → Idle, counter = 0.

use bevy::prelude::*;

/// Тип оружия (hotbar слоты 1..=3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum WeaponKind {
    Pistol,
    Shotgun,
    Rifle,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 3] = [WeaponKind::Pistol, WeaponKind::Shotgun, WeaponKind::Rifle];

    pub fn slot(self) -> u8 {
        match self {
            WeaponKind::Pistol => 1,
            WeaponKind::Shotgun => 2,
            WeaponKind::Rifle => 3,
        }
    }

    pub fn from_slot(slot: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.slot() == slot)
    }

    /// Кадров анимации выстрела
    pub fn num_frames(self) -> u32 {
        match self {
            WeaponKind::Pistol => 1,
            WeaponKind::Shotgun => 6,
            WeaponKind::Rifle => 1,
        }
    }

    pub fn animation_interval_ms(self) -> u32 {
        match self {
            WeaponKind::Pistol => 60,
            WeaponKind::Shotgun => 90,
            WeaponKind::Rifle => 50,
        }
    }

    pub fn damage(self) -> u32 {
        match self {
            WeaponKind::Pistol => 25,
            WeaponKind::Shotgun => 50,
            WeaponKind::Rifle => 35,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            WeaponKind::Pistol => "Pistol",
            WeaponKind::Shotgun => "Shotgun",
            WeaponKind::Rifle => "Rifle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum WeaponPhase {
    #[default]
    Idle,
    /// Анимация выстрела + перезарядка
    Reloading,
}

/// Оружие и его FSM
///
/// Инвариант: frame_counter < num_frames; в Idle frame_counter == 0.
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct Weapon {
    pub kind: WeaponKind,
    pub damage: u32,
    pub num_frames: u32,
    pub animation_interval_ms: u32,
    pub phase: WeaponPhase,
    pub frame_counter: u32,
    /// Накопленное время frame clock-а
    pub clock_ms: u32,
}

impl Weapon {
    pub fn new(kind: WeaponKind) -> Self {
        Self {
            kind,
            damage: kind.damage(),
            num_frames: kind.num_frames().max(1),
            animation_interval_ms: kind.animation_interval_ms(),
            phase: WeaponPhase::Idle,
            frame_counter: 0,
            clock_ms: 0,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.phase == WeaponPhase::Idle
    }

    pub fn is_reloading(&self) -> bool {
        self.phase == WeaponPhase::Reloading
    }

    pub fn can_fire(&self, ammo: &Ammo) -> bool {
        self.is_idle() && ammo.current > 0
    }

    /// Idle → Reloading, ровно 1 патрон за выстрел.
    /// Busy или пустой боезапас - no-op, возвращает false.
    pub fn try_fire(&mut self, ammo: &mut Ammo) -> bool {
        if !self.can_fire(ammo) {
            return false;
        }
        if !ammo.consume_one() {
            return false;
        }
        self.phase = WeaponPhase::Reloading;
        self.frame_counter = 0;
        true
    }

    /// Продвинуть frame clock. Возвращает true, если в этом тике оружие вернулось в Idle.
    pub fn advance(&mut self, delta_ms: u32) -> bool {
        self.clock_ms = self.clock_ms.saturating_add(delta_ms);
        if self.clock_ms < self.animation_interval_ms {
            return false;
        }
        self.clock_ms = 0;

        if self.phase != WeaponPhase::Reloading {
            return false;
        }

        self.frame_counter += 1;
        if self.frame_counter >= self.num_frames {
            self.phase = WeaponPhase::Idle;
            self.frame_counter = 0;
            return true;
        }
        false
    }

    /// Прогресс для HUD: counter / (frames − 1), clamp [0, 1].
    /// Idle и однокадровое оружие → 0.
    pub fn reload_progress(&self) -> f32 {
        if !self.is_reloading() || self.num_frames <= 1 {
            return 0.0;
        }
        (self.frame_counter as f32 / (self.num_frames - 1) as f32).min(1.0)
    }

    /// Принудительно в Idle (только через WeaponSwitchPolicy::CancelReload)
    pub fn cancel_reload(&mut self) {
        self.phase = WeaponPhase::Idle;
        self.frame_counter = 0;
    }

    /// Кадр спрайта оружия для renderer-а
    pub fn current_frame(&self) -> u32 {
        self.frame_counter
    }
}

/// Боезапас игрока (общий для всех оружий)
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Ammo {
    pub current: u32,
    pub max: u32,
}

impl Ammo {
    pub fn new(current: u32, max: u32) -> Self {
        Self {
            current: current.min(max),
            max,
        }
    }

    pub fn consume_one(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Пополнить, не выше max. Возвращает фактически добавленное.
    pub fn refill(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.current = self.current.saturating_add(amount).min(self.max);
        self.current - before
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }
}
