//! MotionController - движение observer-а по сетке
//!
//! Один тик:
//! 1. WASD → displacement вдоль forward/strafe осей (sin/cos heading)
//! 2. Модификаторы: crouch (приоритет) → sprint (только если не crouch и есть stamina)
//! 3. Диагональная коррекция 1/√2 (иначе по диагонали быстрее)
//! 4. Коллизия раздельно по осям: сначала X, потом Y с уже обновлённым X
//!    → скольжение вдоль стен при движении в угол
//! 5. Stamina: drain пока sprint + движение, иначе recover
//! 6. Heading: стрелки + mouse delta, wrap в [0, 2π)

use bevy::prelude::*;
use std::f32::consts::{FRAC_1_SQRT_2, TAU};

use crate::components::{MotionState, Observer};
use crate::input::PlayerInput;
use crate::settings::GameSettings;
use crate::world::GridMap;

/// Множитель для диагонального движения
pub const DIAGONAL_CORRECTION: f32 = FRAC_1_SQRT_2;

/// Параметры движения (выжимка из GameSettings)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionParams {
    pub speed: f32,
    pub rotation_speed: f32,
    pub size_scale: f32,
    pub sprint_multiplier: f32,
    pub crouch_multiplier: f32,
    pub crouch_collider_scale: f32,
    pub mouse_sensitivity: f32,
    pub mouse_max_rel: f32,
    pub drain_rate: f32,
    pub recover_rate: f32,
    pub sprint_threshold: f32,
}

impl MotionParams {
    pub fn from_settings(settings: &GameSettings) -> Self {
        let player = &settings.player;
        let stamina = &settings.stamina;
        Self {
            speed: player.speed,
            rotation_speed: player.rotation_speed,
            size_scale: player.size_scale,
            sprint_multiplier: player.sprint_multiplier,
            crouch_multiplier: player.crouch_multiplier,
            crouch_collider_scale: player.crouch_collider_scale,
            mouse_sensitivity: player.mouse_sensitivity,
            mouse_max_rel: player.mouse_max_rel,
            drain_rate: stamina.drain_rate,
            recover_rate: stamina.recover_rate,
            sprint_threshold: stamina.sprint_threshold,
        }
    }
}

impl Default for MotionParams {
    fn default() -> Self {
        Self::from_settings(&GameSettings::default())
    }
}

/// Результат разбора WASD
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementIntent {
    /// Сырой displacement (до модификаторов и диагональной коррекции)
    pub displacement: Vec2,
    /// Нажатых клавиш движения минус один (-1 = стоим)
    pub num_key_pressed: i32,
}

impl MovementIntent {
    pub fn is_moving(&self) -> bool {
        self.num_key_pressed >= 0
    }

    /// Ненулевое значение → диагональная коррекция
    pub fn needs_diagonal_correction(&self) -> bool {
        self.num_key_pressed != 0
    }
}

/// WASD → displacement. `step` = speed × delta.
pub fn movement_intent(angle: f32, input: &PlayerInput, step: f32) -> MovementIntent {
    let step_sin = step * angle.sin();
    let step_cos = step * angle.cos();

    let mut displacement = Vec2::ZERO;
    let mut num_key_pressed = -1;

    if input.forward {
        num_key_pressed += 1;
        displacement += Vec2::new(step_cos, step_sin);
    }
    if input.backward {
        num_key_pressed += 1;
        displacement += Vec2::new(-step_cos, -step_sin);
    }
    if input.strafe_left {
        num_key_pressed += 1;
        displacement += Vec2::new(step_sin, -step_cos);
    }
    if input.strafe_right {
        num_key_pressed += 1;
        displacement += Vec2::new(-step_sin, step_cos);
    }

    MovementIntent {
        displacement,
        num_key_pressed,
    }
}

/// Crouch/sprint флаги + итоговый множитель скорости
///
/// Crouch проверяется первым и блокирует sprint.
pub fn apply_modifiers(
    state: &mut MotionState,
    input: &PlayerInput,
    intent: &MovementIntent,
    params: &MotionParams,
) -> f32 {
    state.crouching = input.crouch;
    state.sprinting = input.sprint
        && !state.crouching
        && state.stamina > params.sprint_threshold
        && intent.is_moving();

    let mut factor = 1.0;
    if state.crouching {
        factor *= params.crouch_multiplier;
    }
    if state.sprinting {
        factor *= params.sprint_multiplier;
    }
    factor
}

/// Раздельная по осям коллизия
///
/// `probe_scale` растягивает delta до дистанции пробы (радиус коллайдера).
/// Клетка пробы - truncation координат.
pub fn resolve_collision(position: Vec2, delta: Vec2, probe_scale: f32, map: &GridMap) -> Vec2 {
    let mut next = position;

    if !map.is_wall((next.x + delta.x * probe_scale) as i32, next.y as i32) {
        next.x += delta.x;
    }
    if !map.is_wall(next.x as i32, (next.y + delta.y * probe_scale) as i32) {
        next.y += delta.y;
    }

    next
}

/// Wrap в [0, 2π)
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid на f32 может вернуть ровно TAU для -ε
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Heading: стрелки + clamp-нутая мышь
pub fn update_heading(angle: f32, input: &PlayerInput, delta_ms: f32, params: &MotionParams) -> f32 {
    let mut angle = angle;

    if input.turn_left {
        angle -= params.rotation_speed * delta_ms;
    }
    if input.turn_right {
        angle += params.rotation_speed * delta_ms;
    }

    let rel = input.mouse_dx.clamp(-params.mouse_max_rel, params.mouse_max_rel);
    angle += rel * params.mouse_sensitivity * delta_ms;

    wrap_angle(angle)
}

pub fn update_stamina(state: &mut MotionState, sprinting: bool, delta_ms: f32, params: &MotionParams) {
    if sprinting {
        state.drain(params.drain_rate, delta_ms);
    } else {
        state.recover(params.recover_rate, delta_ms);
    }
}

/// Полный тик MotionController (мутирует observer и state на месте)
///
/// `delta_ms <= 0` - пустой тик (проба коллизии делит на delta).
pub fn tick(
    observer: &mut Observer,
    state: &mut MotionState,
    input: &PlayerInput,
    delta_ms: f32,
    map: &GridMap,
    params: &MotionParams,
) {
    if delta_ms <= 0.0 {
        return;
    }

    let intent = movement_intent(observer.angle, input, params.speed * delta_ms);
    let factor = apply_modifiers(state, input, &intent, params);

    let mut delta = intent.displacement * factor;
    if intent.needs_diagonal_correction() {
        delta *= DIAGONAL_CORRECTION;
    }

    let collider_scale = if state.crouching {
        params.crouch_collider_scale
    } else {
        1.0
    };
    let probe_scale = params.size_scale * collider_scale / delta_ms;
    observer.position = resolve_collision(observer.position, delta, probe_scale, map);

    let sprinting = state.sprinting && intent.is_moving();
    update_stamina(state, sprinting, delta_ms, params);

    observer.angle = update_heading(observer.angle, input, delta_ms, params);
}
