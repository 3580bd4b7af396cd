//! Compositor - painter's algorithm
//!
//! Стены (от ray-caster-а) и спрайты сортируются по depth от дальних к ближним
//! и рисуются по порядку. Z-buffer-а нет: корректность держится только на
//! сортировке и на общей метрике depth (map units) у стен и спрайтов.
//! Геометрия - колонки и спрайты без пересекающихся объёмов.

use bevy::prelude::*;

use crate::rendering::projection::ProjectionEntry;

/// Куда рисовать (frame buffer host-а)
pub trait FrameTarget {
    fn draw(&mut self, entry: &ProjectionEntry);
}

/// Колонки стен текущего frame (пишет внешний ray-caster, ядро их не меняет)
#[derive(Resource, Debug, Clone, Default)]
pub struct WallColumns {
    pub entries: Vec<ProjectionEntry>,
}

/// Проекции спрайтов текущего frame (пересчитываются каждый тик)
#[derive(Resource, Debug, Clone, Default)]
pub struct SpriteProjections {
    pub entries: Vec<ProjectionEntry>,
}

/// Command buffer кадра: host исполняет draw-команды строго по порядку
#[derive(Resource, Debug, Clone, Default)]
pub struct FrameBuffer {
    pub commands: Vec<ProjectionEntry>,
    /// Сдвиг всего кадра (screen shake)
    pub offset: Vec2,
}

impl FrameBuffer {
    pub fn clear(&mut self) {
        self.commands.clear();
        self.offset = Vec2::ZERO;
    }

    pub fn depths(&self) -> impl Iterator<Item = f32> + '_ {
        self.commands.iter().map(|command| command.depth)
    }
}

impl FrameTarget for FrameBuffer {
    fn draw(&mut self, entry: &ProjectionEntry) {
        self.commands.push(*entry);
    }
}

/// Стабильная сортировка: дальние первыми, при равном depth - порядок вставки
pub fn sort_back_to_front(entries: &mut [ProjectionEntry]) {
    entries.sort_by(|a, b| b.depth.total_cmp(&a.depth));
}

/// Отсортировать и нарисовать все entries. Пустой список - кадр только с фоном.
pub fn composite<T: FrameTarget + ?Sized>(entries: &mut [ProjectionEntry], target: &mut T) {
    sort_back_to_front(entries);
    for entry in entries.iter() {
        target.draw(entry);
    }
}

/// Собрать кадр: стены вставляются раньше спрайтов (важно для ties)
pub fn composite_frame<T: FrameTarget + ?Sized>(
    walls: &[ProjectionEntry],
    sprites: &[ProjectionEntry],
    target: &mut T,
) {
    let mut entries = Vec::with_capacity(walls.len() + sprites.len());
    entries.extend_from_slice(walls);
    entries.extend_from_slice(sprites);
    composite(&mut entries, target);
}
