//! Projector - world position → экранная колонка + размер спрайта
//!
//! Алгоритм:
//! 1. theta = atan2(dy, dx) от observer к entity
//! 2. delta = theta − heading, затем коррекция шва 0/2π (см. `AngleWrap`)
//! 3. delta / DELTA_ANGLE → смещение в колонках от центра экрана
//! 4. Отбрасываем, если колонка далеко за экраном или entity слишком близко
//! 5. Размер = SCREEN_DIST / dist × size × sprite_scale, cap = 2 × HEIGHT
//!
//! "Нет entry" - нормальный результат (off-screen / вплотную), не ошибка.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

use crate::components::{ImageRef, Observer};
use crate::settings::Viewport;

/// Коррекция angular offset на шве 0/2π
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AngleWrap {
    /// Классическая эвристика: +2π если `dx > 0 && heading > π` или `dx < 0 && dy < 0`.
    /// Приближение: около шва даёт другой (видимо отличающийся) результат.
    Legacy,
    /// delta нормализуется в (−π, π]
    #[default]
    Normalized,
}

/// Прямоугольник на экране (пиксели, левый верхний угол + размер)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ScreenRect {
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn contains_x(&self, x: f32) -> bool {
        x >= self.x && x < self.x + self.width
    }
}

/// Renderable entry: стена (от ray-caster-а) или спрайт (от Projector-а)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionEntry {
    /// Depth key (map units, ≥ 0)
    pub depth: f32,
    pub image: ImageRef,
    pub rect: ScreenRect,
}

/// Angular offset entity относительно heading с коррекцией шва
pub fn angular_offset(dx: f32, dy: f32, observer_angle: f32, wrap: AngleWrap) -> f32 {
    let theta = dy.atan2(dx);
    let delta = theta - observer_angle;

    match wrap {
        AngleWrap::Legacy => {
            if (dx > 0.0 && observer_angle > PI) || (dx < 0.0 && dy < 0.0) {
                delta + TAU
            } else {
                delta
            }
        }
        AngleWrap::Normalized => normalize_delta(delta),
    }
}

/// delta − 2π·round(delta / 2π), сдвинутое так, что −π → π
pub fn normalize_delta(delta: f32) -> f32 {
    let normalized = delta - TAU * (delta / TAU).round();
    if normalized <= -PI {
        normalized + TAU
    } else {
        normalized
    }
}

/// Projector: viewport + режим коррекции угла
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    pub viewport: Viewport,
    pub wrap: AngleWrap,
}

impl Projector {
    pub fn new(viewport: Viewport, wrap: AngleWrap) -> Self {
        Self { viewport, wrap }
    }

    /// Экранная колонка (дробная) для angular offset
    pub fn column_for(&self, delta: f32) -> f32 {
        self.viewport.half_num_rays + delta / self.viewport.delta_angle
    }

    pub fn is_column_visible(&self, column: f32) -> bool {
        let margin = self.viewport.margin_columns;
        column >= -margin && column <= self.viewport.num_rays + margin
    }

    /// Размер проекции для дистанции (без проверки видимости)
    pub fn projected_size(&self, distance: f32, size: f32) -> f32 {
        let viewport = &self.viewport;
        (viewport.screen_dist / distance * size * viewport.sprite_scale).min(2.0 * viewport.height)
    }

    /// Спроецировать entity. `None` - off-screen или ближе минимальной дистанции.
    pub fn project(
        &self,
        observer: &Observer,
        entity_pos: Vec2,
        size: f32,
        image: ImageRef,
    ) -> Option<ProjectionEntry> {
        let d = entity_pos - observer.position;
        let distance = d.length();
        if distance <= self.viewport.min_distance {
            return None;
        }

        let delta = angular_offset(d.x, d.y, observer.angle, self.wrap);
        let column = self.column_for(delta);
        if !self.is_column_visible(column) {
            return None;
        }

        let screen_x = column * self.viewport.scale;
        let proj = self.projected_size(distance, size);
        let half = proj / 2.0;

        Some(ProjectionEntry {
            depth: distance,
            image,
            rect: ScreenRect {
                x: screen_x - half,
                y: self.viewport.half_height - half,
                width: proj,
                height: proj,
            },
        })
    }
}
