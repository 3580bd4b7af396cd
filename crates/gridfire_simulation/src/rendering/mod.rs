//! Rendering core: Projector (world → screen) и Compositor (painter's algorithm)
//!
//! Ray-casting стен - внешний collaborator: host кладёт колонки в `WallColumns`
//! до `App::update()`. Ядро только сортирует их вместе со спрайтами.

use bevy::prelude::*;

use crate::SimulationSet;

pub mod compositor;
pub mod projection;
pub mod systems;

#[cfg(test)]
mod projection_tests;

pub use compositor::{composite, composite_frame, FrameBuffer, FrameTarget, SpriteProjections, WallColumns};
pub use projection::{AngleWrap, ProjectionEntry, Projector, ScreenRect};
pub use systems::spawn_effect;

/// Rendering Plugin
///
/// 1. project_sprites (SimulationSet::Projection)
/// 2. composite_scene (SimulationSet::Composite)
/// 3. expire_effects (SimulationSet::Feedback)
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WallColumns>()
            .init_resource::<SpriteProjections>()
            .init_resource::<FrameBuffer>()
            .add_systems(
                Update,
                (
                    systems::project_sprites.in_set(SimulationSet::Projection),
                    systems::composite_scene.in_set(SimulationSet::Composite),
                    systems::expire_effects.in_set(SimulationSet::Feedback),
                ),
            );
    }
}
