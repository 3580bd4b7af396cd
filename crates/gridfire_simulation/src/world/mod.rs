//! World: карта стен и загрузка уровня

pub mod grid_map;
pub mod level;

pub use grid_map::GridMap;
pub use level::{
    load_default_level, load_level, spawn_default_pickups, spawn_enemy, spawn_player, DEFAULT_LEVEL, ENEMY_TEXTURE,
};
