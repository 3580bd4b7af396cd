//! Настройки игры (tuning) + производные параметры viewport
//!
//! Время в миллисекундах, скорости - map units / ms (host отдаёт delta в ms).
//!
//! `GameSettings` - Bevy resource; можно загрузить из JSON (частичный JSON ок,
//! недостающие поля берутся из Default).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::fmt;

use crate::rendering::projection::AngleWrap;

/// Корневой resource настроек
#[derive(Resource, Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub screen: ScreenSettings,
    pub player: PlayerSettings,
    pub stamina: StaminaSettings,
    pub combat: CombatSettings,
    pub pickups: PickupSettings,

    /// Коррекция угла на шве 0/2π при проекции спрайтов
    pub angle_wrap: AngleWrap,

    /// Что происходит с reload-ом оружия, которое убрали
    pub weapon_switch: WeaponSwitchPolicy,
}

/// Экран и проекция
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenSettings {
    pub width: u32,
    pub height: u32,
    /// Field of view (радианы)
    pub fov: f32,
    /// Количество лучей ray-caster-а (одна колонка = один луч)
    pub num_rays: u32,
    /// Множитель размера спрайта при проекции
    pub sprite_scale: f32,
    /// Запас колонок за краем экрана (частично видимые спрайты)
    pub offscreen_margin_columns: f32,
    /// Ближе этой дистанции спрайт не рисуется
    pub min_visible_distance: f32,
}

impl Default for ScreenSettings {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 900,
            fov: PI / 3.0,
            num_rays: 800,
            sprite_scale: 200.0,
            offscreen_margin_columns: 5.0,
            min_visible_distance: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    pub start_position: (f32, f32),
    pub start_angle: f32,
    /// map units / ms
    pub speed: f32,
    /// рад / ms
    pub rotation_speed: f32,
    /// Probe distance коллизии = speed × size_scale
    pub size_scale: f32,
    pub max_health: u32,
    pub start_ammo: u32,
    pub max_ammo: u32,
    pub sprint_multiplier: f32,
    pub crouch_multiplier: f32,
    /// Crouch уменьшает эффективный радиус коллайдера
    pub crouch_collider_scale: f32,
    pub mouse_sensitivity: f32,
    /// Clamp относительного смещения мыши (пиксели)
    pub mouse_max_rel: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            start_position: (1.5, 5.0),
            start_angle: 0.0,
            speed: 0.004,
            rotation_speed: 0.002,
            size_scale: 60.0,
            max_health: 100,
            start_ammo: 75,
            max_ammo: 150,
            sprint_multiplier: 1.6,
            crouch_multiplier: 0.5,
            crouch_collider_scale: 0.7,
            mouse_sensitivity: 0.0003,
            mouse_max_rel: 40.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaminaSettings {
    pub max: f32,
    /// units / ms во время sprint
    pub drain_rate: f32,
    /// units / ms в остальное время
    pub recover_rate: f32,
    /// Sprint доступен только при stamina строго больше порога
    pub sprint_threshold: f32,
}

impl Default for StaminaSettings {
    fn default() -> Self {
        Self {
            max: 100.0,
            drain_rate: 0.03,
            recover_rate: 0.015,
            sprint_threshold: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatSettings {
    pub health_regen_delay_ms: u32,
    pub damage_indicator_lifetime_ms: u64,
    pub melee_cooldown_ms: f32,
    pub melee_radius: f32,
    pub melee_damage: u32,
    /// Радиус тела врага для hitscan (map units)
    pub hitscan_radius: f32,
    /// Интенсивность тряски экрана при получении урона
    pub damage_shake: f32,
    /// Затухание тряски (единиц / ms)
    pub shake_decay: f32,
}

impl Default for CombatSettings {
    fn default() -> Self {
        Self {
            health_regen_delay_ms: 700,
            damage_indicator_lifetime_ms: 1000,
            melee_cooldown_ms: 500.0,
            melee_radius: 1.5,
            melee_damage: 75,
            hitscan_radius: 0.3,
            damage_shake: 8.0,
            shake_decay: 0.02,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickupSettings {
    pub size: f32,
    pub pickup_radius: f32,
    pub health_value: u32,
    pub ammo_value: u32,
    pub spin_interval_ms: u32,
    pub spin_step: f32,
}

impl Default for PickupSettings {
    fn default() -> Self {
        Self {
            size: 0.3,
            pickup_radius: 0.6,
            health_value: 25,
            ammo_value: 20,
            spin_interval_ms: 200,
            spin_step: 0.2,
        }
    }
}

/// Поведение при смене оружия во время reload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeaponSwitchPolicy {
    /// Убранное оружие сохраняет reload state (замораживается до возврата)
    #[default]
    KeepReloadState,
    /// Reload убранного оружия сбрасывается в Idle
    CancelReload,
}

/// Ошибка загрузки настроек
#[derive(Debug)]
pub enum SettingsError {
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Parse(err) => write!(f, "settings parse error: {}", err),
            SettingsError::Invalid(reason) => write!(f, "invalid settings: {}", reason),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Parse(err) => Some(err),
            SettingsError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        SettingsError::Parse(err)
    }
}

impl GameSettings {
    /// Загрузить из JSON и провалидировать
    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        let settings: GameSettings = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let screen = &self.screen;
        if screen.width == 0 || screen.height == 0 {
            return Err(SettingsError::Invalid("screen resolution must be non-zero".into()));
        }
        if screen.num_rays == 0 || screen.num_rays > screen.width {
            return Err(SettingsError::Invalid(format!(
                "num_rays must be in 1..={} (got {})",
                screen.width, screen.num_rays
            )));
        }
        if !(screen.fov > 0.0 && screen.fov < PI) {
            return Err(SettingsError::Invalid(format!("fov must be in (0, π), got {}", screen.fov)));
        }
        if screen.min_visible_distance < 0.0 || screen.offscreen_margin_columns < 0.0 {
            return Err(SettingsError::Invalid("distances and margins must be non-negative".into()));
        }
        if self.stamina.max <= 0.0 {
            return Err(SettingsError::Invalid("stamina max must be positive".into()));
        }
        if self.player.max_ammo < self.player.start_ammo || self.player.max_health == 0 {
            return Err(SettingsError::Invalid("start ammo exceeds max ammo or max health is zero".into()));
        }

        // Отрицательный drain ломает инвариант stamina (во время sprint только убывает)
        let rates = [
            ("player.speed", self.player.speed),
            ("player.sprint_multiplier", self.player.sprint_multiplier),
            ("player.crouch_multiplier", self.player.crouch_multiplier),
            ("stamina.drain_rate", self.stamina.drain_rate),
            ("stamina.recover_rate", self.stamina.recover_rate),
        ];
        if let Some((name, value)) = rates.iter().find(|(_, value)| !value.is_finite() || *value <= 0.0) {
            return Err(SettingsError::Invalid(format!("{} must be positive, got {}", name, value)));
        }
        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::from_settings(&self.screen)
    }
}

/// Производные параметры экрана (считаются один раз из ScreenSettings)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub half_width: f32,
    pub half_height: f32,
    pub fov: f32,
    pub half_fov: f32,
    pub num_rays: f32,
    pub half_num_rays: f32,
    /// Угловая ширина одной колонки
    pub delta_angle: f32,
    /// Дистанция до проекционной плоскости (пиксели)
    pub screen_dist: f32,
    /// Пикселей на одну колонку
    pub scale: f32,
    pub sprite_scale: f32,
    pub margin_columns: f32,
    pub min_distance: f32,
}

impl Viewport {
    pub fn from_settings(screen: &ScreenSettings) -> Self {
        let width = screen.width as f32;
        let height = screen.height as f32;
        let half_width = (screen.width / 2) as f32;
        let half_fov = screen.fov / 2.0;
        let num_rays = screen.num_rays.max(1);

        Self {
            width,
            height,
            half_width,
            half_height: (screen.height / 2) as f32,
            fov: screen.fov,
            half_fov,
            num_rays: num_rays as f32,
            half_num_rays: (num_rays / 2) as f32,
            delta_angle: screen.fov / num_rays as f32,
            screen_dist: half_width / half_fov.tan(),
            scale: (screen.width / num_rays) as f32,
            sprite_scale: screen.sprite_scale,
            margin_columns: screen.offscreen_margin_columns,
            min_distance: screen.min_visible_distance,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::from_settings(&ScreenSettings::default())
    }
}
