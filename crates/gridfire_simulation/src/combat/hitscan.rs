//! Hitscan: выстрел попадает в ближайшего живого врага под прицелом
//!
//! Враг под прицелом - луч из observer-а по heading проходит через его тело,
//! и между ними нет стены (grid LOS + колонка стены в центре экрана).

use bevy::prelude::*;

use crate::combat::damage::{DamageSource, EnemyDamaged};
use crate::combat::weapon::WeaponKind;
use crate::components::{Dead, Enemy, Health, Observer, Player, WorldPosition};
use crate::rendering::WallColumns;
use crate::settings::GameSettings;
use crate::world::GridMap;

/// Событие: активное оружие выстрелило (Idle → Reloading)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct WeaponFired {
    pub kind: WeaponKind,
    pub damage: u32,
}

/// Depth ближайшей колонки стены, накрывающей центр экрана
pub fn wall_depth_at(walls: &WallColumns, screen_x: f32) -> Option<f32> {
    walls
        .entries
        .iter()
        .filter(|entry| entry.rect.contains_x(screen_x))
        .map(|entry| entry.depth)
        .min_by(f32::total_cmp)
}

/// Ближайший враг под прицелом
///
/// Тело врага - круг `hit_radius` вокруг позиции; попадание, если луч прицела
/// проходит через круг впереди observer-а.
pub fn hitscan_target(
    observer: &Observer,
    map: &GridMap,
    hit_radius: f32,
    wall_depth: Option<f32>,
    enemies: impl Iterator<Item = (Entity, Vec2)>,
) -> Option<Entity> {
    let aim = Vec2::new(observer.angle.cos(), observer.angle.sin());

    enemies
        .filter_map(|(entity, position)| {
            let d = position - observer.position;
            if d.dot(aim) <= 0.0 || d.perp_dot(aim).abs() >= hit_radius {
                return None;
            }
            let depth = d.length();
            if wall_depth.is_some_and(|wall| wall < depth) {
                return None;
            }
            if !map.has_line_of_sight(observer.position, position) {
                return None;
            }
            Some((entity, depth))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)))
        .map(|(entity, _)| entity)
}

/// System: `WeaponFired` → `EnemyDamaged` для цели под прицелом
pub fn resolve_hitscan(
    mut shots: EventReader<WeaponFired>,
    settings: Res<GameSettings>,
    map: Res<GridMap>,
    walls: Res<WallColumns>,
    players: Query<&Observer, With<Player>>,
    enemies: Query<(Entity, &WorldPosition, &Health), (With<Enemy>, Without<Dead>)>,
    mut damage: EventWriter<EnemyDamaged>,
) {
    let Ok(observer) = players.single() else {
        shots.clear();
        return;
    };

    let wall_depth = wall_depth_at(&walls, settings.viewport().half_width);

    for shot in shots.read() {
        let alive = enemies
            .iter()
            .filter(|(.., health)| health.is_alive())
            .map(|(entity, position, _)| (entity, position.0));

        let hit_radius = settings.combat.hitscan_radius;
        let Some(target) = hitscan_target(observer, &map, hit_radius, wall_depth, alive) else {
            crate::log(&format!("{} shot missed", shot.kind.name()));
            continue;
        };

        crate::log(&format!("{} hit {:?} for {}", shot.kind.name(), target, shot.damage));
        damage.write(EnemyDamaged {
            target,
            damage: shot.damage,
            source: DamageSource::Hitscan,
        });
    }
}
