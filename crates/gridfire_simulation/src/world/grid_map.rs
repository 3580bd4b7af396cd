//! GridMap - стены как множество занятых integer клеток

use bevy::prelude::*;
use std::collections::HashMap;

/// Карта стен
///
/// Ключ - клетка (x = колонка, y = строка), значение - id текстуры стены.
/// Read-only для ядра; меняется только при загрузке уровня.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct GridMap {
    walls: HashMap<IVec2, u8>,
    width: i32,
    height: i32,
}

impl GridMap {
    /// Построить из текстовых строк: `'1'..='9'` - стена с текстурой, всё остальное - пусто
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut walls = HashMap::new();
        let mut width = 0;

        for (y, row) in rows.iter().enumerate() {
            width = width.max(row.chars().count() as i32);
            for (x, ch) in row.chars().enumerate() {
                if let Some(texture) = ch.to_digit(10).filter(|d| *d > 0) {
                    walls.insert(IVec2::new(x as i32, y as i32), texture as u8);
                }
            }
        }

        Self {
            walls,
            width,
            height: rows.len() as i32,
        }
    }

    /// Membership test для collision/LOS
    pub fn is_wall(&self, cell_x: i32, cell_y: i32) -> bool {
        self.walls.contains_key(&IVec2::new(cell_x, cell_y))
    }

    /// Клетка, в которую попадает точка (truncation, как `int()` координат)
    pub fn is_wall_at(&self, point: Vec2) -> bool {
        self.is_wall(point.x as i32, point.y as i32)
    }

    pub fn wall_texture(&self, cell: IVec2) -> Option<u8> {
        self.walls.get(&cell).copied()
    }

    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }

    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width, self.height)
    }

    pub fn walls(&self) -> impl Iterator<Item = (IVec2, u8)> + '_ {
        self.walls.iter().map(|(cell, texture)| (*cell, *texture))
    }

    /// Line of sight между двумя точками (grid traversal по клеткам отрезка)
    ///
    /// Клетки `from` и `to` сами по себе не проверяются.
    pub fn has_line_of_sight(&self, from: Vec2, to: Vec2) -> bool {
        let target = IVec2::new(to.x.floor() as i32, to.y.floor() as i32);
        let mut cell = IVec2::new(from.x.floor() as i32, from.y.floor() as i32);
        let dir = to - from;

        let step = IVec2::new(if dir.x > 0.0 { 1 } else { -1 }, if dir.y > 0.0 { 1 } else { -1 });
        let t_delta = Vec2::new(
            if dir.x != 0.0 { 1.0 / dir.x.abs() } else { f32::INFINITY },
            if dir.y != 0.0 { 1.0 / dir.y.abs() } else { f32::INFINITY },
        );
        let mut t_max = Vec2::new(
            first_boundary(from.x, cell.x, dir.x, t_delta.x),
            first_boundary(from.y, cell.y, dir.y, t_delta.y),
        );

        // Ось, уже дошедшая до target, дальше не шагает: иначе float-ошибка
        // уводит обход мимо target
        let span = (target - cell).abs();
        let mut remaining = span.x + span.y;
        while cell != target && remaining > 0 {
            let step_x = cell.y == target.y || (cell.x != target.x && t_max.x < t_max.y);
            let step_y = cell.x == target.x || (cell.y != target.y && t_max.y < t_max.x);

            if !step_x && !step_y {
                // Ровно через угол: обе соседние клетки должны быть свободны
                let side_x = IVec2::new(cell.x + step.x, cell.y);
                let side_y = IVec2::new(cell.x, cell.y + step.y);
                if self.blocks(side_x, target) || self.blocks(side_y, target) {
                    return false;
                }
                cell += step;
                t_max += t_delta;
                remaining = remaining.saturating_sub(2);
            } else if step_x {
                cell.x += step.x;
                t_max.x += t_delta.x;
                remaining -= 1;
            } else {
                cell.y += step.y;
                t_max.y += t_delta.y;
                remaining -= 1;
            }

            if self.blocks(cell, target) {
                return false;
            }
        }
        cell == target
    }

    fn blocks(&self, cell: IVec2, target: IVec2) -> bool {
        cell != target && self.is_wall(cell.x, cell.y)
    }
}

/// Параметр t первого пересечения границы клетки по оси
fn first_boundary(origin: f32, cell: i32, dir: f32, t_delta: f32) -> f32 {
    if dir > 0.0 {
        (cell as f32 + 1.0 - origin) * t_delta
    } else if dir < 0.0 {
        (origin - cell as f32) * t_delta
    } else {
        f32::INFINITY
    }
}
