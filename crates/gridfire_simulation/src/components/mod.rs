//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: живые существа (Player, Enemy, Health, Dead, PlayerStats)
//! - world: позиция в мире и визуал (Observer, WorldPosition, SpriteVisual, Effect)
//! - movement: sprint/crouch/stamina (MotionState)

pub mod actor;
pub mod movement;
pub mod world;

// Re-exports для удобного импорта
pub use actor::*;
pub use movement::*;
pub use world::*;
