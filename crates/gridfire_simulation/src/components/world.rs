//! Позиционирование в мире и визуал спрайтов

use bevy::prelude::*;
use std::f32::consts::TAU;

/// Observer - управляемая точка обзора (позиция + heading)
///
/// Инвариант: `angle` ∈ [0, 2π) после каждого тика MotionController.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Observer {
    /// Позиция в map units (непрерывная)
    pub position: Vec2,
    /// Heading (радианы)
    pub angle: f32,
}

impl Observer {
    pub fn new(position: Vec2, angle: f32) -> Self {
        Self {
            position,
            angle: angle.rem_euclid(TAU),
        }
    }

    /// Клетка карты, в которой стоит observer
    pub fn map_cell(&self) -> IVec2 {
        IVec2::new(self.position.x as i32, self.position.y as i32)
    }
}

/// Позиция world entity (pickup, enemy, effect) в map units
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct WorldPosition(pub Vec2);

/// Ссылка на изображение для renderer-а
///
/// Ядро не грузит ассеты - только передаёт handle/описание дальше.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum ImageRef {
    /// Текстура из atlas-а host-а
    Texture(u32),
    /// Колонка стены (texture id + колонка внутри текстуры)
    WallSlice { texture: u8, column: u16 },
    /// Процедурный круглый спрайт (pickup-ы): цвет обода
    Disc { rgb: [u8; 3] },
}

/// Спрайт, который проходит через Projector
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct SpriteVisual {
    /// Размер спрайта (множитель проекции)
    pub size: f32,
    pub image: ImageRef,
}

/// Эффект (вспышка, кровь) - проецируется как спрайт
///
/// `ttl_ms: None` - живёт до явного despawn.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Effect {
    pub ttl_ms: Option<u32>,
}
