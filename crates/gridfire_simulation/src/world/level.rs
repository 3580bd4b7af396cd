//! Уровень по умолчанию: раскладка стен, старт игрока, pickups

use bevy::prelude::*;

use crate::combat::{Ammo, Arsenal, CombatFeedback};
use crate::components::{
    Enemy, Health, ImageRef, MotionState, Observer, Player, PlayerStats, SpriteVisual, WorldPosition,
};
use crate::pickups::{spawn_pickup, PickupKind};
use crate::settings::GameSettings;
use crate::world::GridMap;

/// Раскладка 18×24: цифра - стена (id текстуры), `.` - пол
pub const DEFAULT_LEVEL: [&str; 24] = [
    "111111111111111111",
    "1................1",
    "1..2222....3333..1",
    "1................1",
    "1.......4........1",
    "1................1",
    "1...3.......2....1",
    "1...3.......2....1",
    "1...3............1",
    "1.......55555....1",
    "1................1",
    "1..1111..........1",
    "1..........4.....1",
    "1..........4.....1",
    "1.....2222.4.....1",
    "1................1",
    "1.......3........1",
    "1.......3...1111.1",
    "1................1",
    "1..5.........2...1",
    "1..5.........2...1",
    "1..5.............1",
    "1................1",
    "111111111111111111",
];

pub const HEALTH_PICKUP_SPOTS: [(f32, f32); 5] =
    [(3.5, 3.5), (8.5, 8.5), (12.5, 3.5), (3.5, 15.5), (14.5, 20.5)];

/// Текстура врага в atlas-е host-а
pub const ENEMY_TEXTURE: u32 = 100;

pub const AMMO_PICKUP_SPOTS: [(f32, f32); 4] = [(5.5, 5.5), (10.5, 10.5), (7.5, 15.5), (12.5, 18.5)];

/// Загрузить уровень по умолчанию (карта + игрок + pickups)
pub fn load_default_level(world: &mut World) -> Entity {
    load_level(world, GridMap::from_rows(&DEFAULT_LEVEL))
}

/// Вставить карту, заспавнить игрока и pickups. Возвращает entity игрока.
pub fn load_level(world: &mut World, map: GridMap) -> Entity {
    let settings = world.get_resource::<GameSettings>().cloned().unwrap_or_default();

    crate::log_info(&format!(
        "Level loaded: {}x{} cells, {} walls",
        map.size().x,
        map.size().y,
        map.wall_count()
    ));
    world.insert_resource(map);

    let player = spawn_player(world, &settings);
    spawn_default_pickups(world, &settings);
    player
}

/// Player entity со всеми компонентами в стартовом состоянии
pub fn spawn_player(world: &mut World, settings: &GameSettings) -> Entity {
    let (x, y) = settings.player.start_position;

    world
        .spawn((
            Player,
            Observer::new(Vec2::new(x, y), settings.player.start_angle),
            MotionState::new(settings.stamina.max),
            Health::new(settings.player.max_health),
            Ammo::new(settings.player.start_ammo, settings.player.max_ammo),
            Arsenal::default(),
            CombatFeedback::default(),
            PlayerStats::default(),
        ))
        .id()
}

/// Враг для внешнего AI registry: позиция, здоровье, спрайт; не в агрессии
pub fn spawn_enemy(world: &mut World, position: Vec2, health: u32) -> Entity {
    world
        .spawn((
            Enemy { attack_distance: 0.0 },
            WorldPosition(position),
            Health::new(health),
            SpriteVisual {
                size: 0.6,
                image: ImageRef::Texture(ENEMY_TEXTURE),
            },
        ))
        .id()
}

pub fn spawn_default_pickups(world: &mut World, settings: &GameSettings) {
    for (x, y) in HEALTH_PICKUP_SPOTS {
        spawn_pickup(world, Vec2::new(x, y), PickupKind::Health, &settings.pickups);
    }
    for (x, y) in AMMO_PICKUP_SPOTS {
        spawn_pickup(world, Vec2::new(x, y), PickupKind::Ammo, &settings.pickups);
    }
}
