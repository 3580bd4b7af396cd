//! Per-frame input и часы симуляции
//!
//! Host (окно / headless runner / тест) каждый frame:
//! 1. заполняет `PlayerInput` (состояния клавиш + mouse delta)
//! 2. вызывает `FrameClock::advance(delta_ms)`
//! 3. вызывает `App::update()`
//!
//! Вся временная логика читает только `FrameClock` - одинаковая
//! последовательность delta даёт одинаковый результат.

use bevy::prelude::*;

/// Состояние ввода на текущий frame
///
/// Клавиши движения - held state. `fire`, `melee`, `weapon_slot` - one-shot
/// действия (key down / click в этом frame), сбрасываются в конце тика.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct PlayerInput {
    pub forward: bool,
    pub backward: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub sprint: bool,
    pub crouch: bool,

    /// Относительное смещение мыши по X (пиксели, до clamp)
    pub mouse_dx: f32,

    pub fire: bool,
    pub melee: bool,
    /// Hotbar слот оружия (1..=3)
    pub weapon_slot: Option<u8>,
}

impl PlayerInput {
    pub fn any_movement_key(&self) -> bool {
        self.forward || self.backward || self.strafe_left || self.strafe_right
    }

    /// Сбросить one-shot действия (held клавиши не трогаем)
    pub fn clear_actions(&mut self) {
        self.fire = false;
        self.melee = false;
        self.weapon_slot = None;
        self.mouse_dx = 0.0;
    }
}

/// Монотонные часы симуляции (ms)
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameClock {
    /// Delta текущего frame
    pub delta_ms: u32,
    /// Время с начала сессии (сумма всех delta)
    pub now_ms: u64,
    pub frame: u64,
}

impl FrameClock {
    pub fn advance(&mut self, delta_ms: u32) {
        self.delta_ms = delta_ms;
        self.now_ms += u64::from(delta_ms);
        self.frame += 1;
    }

    pub fn delta(&self) -> f32 {
        self.delta_ms as f32
    }
}

/// System: сброс one-shot действий в конце тика
pub fn clear_frame_actions(mut input: ResMut<PlayerInput>) {
    input.clear_actions();
}
