//! Rendering systems: проекция спрайтов и сборка кадра

use bevy::prelude::*;

use crate::combat::ScreenShake;
use crate::components::{Effect, ImageRef, Observer, Player, SpriteVisual, WorldPosition};
use crate::input::FrameClock;
use crate::pickups::Pickup;
use crate::rendering::compositor::{composite_frame, FrameBuffer, SpriteProjections, WallColumns};
use crate::rendering::projection::Projector;
use crate::settings::GameSettings;

/// System: пересчитать проекции всех видимых спрайтов
///
/// Собранные pickups пропускаются; трупы врагов остаются в кадре.
pub fn project_sprites(
    settings: Res<GameSettings>,
    players: Query<&Observer, With<Player>>,
    sprites: Query<(&WorldPosition, &SpriteVisual, Option<&Pickup>)>,
    mut projections: ResMut<SpriteProjections>,
) {
    projections.entries.clear();

    let Ok(observer) = players.single() else {
        return;
    };

    let projector = Projector::new(settings.viewport(), settings.angle_wrap);

    for (position, visual, pickup) in sprites.iter() {
        if pickup.is_some_and(|p| p.collected) {
            continue;
        }
        if let Some(entry) = projector.project(observer, position.0, visual.size, visual.image) {
            projections.entries.push(entry);
        }
    }
}

/// System: painter's algorithm → FrameBuffer
pub fn composite_scene(
    walls: Res<WallColumns>,
    sprites: Res<SpriteProjections>,
    shake: Res<ScreenShake>,
    mut buffer: ResMut<FrameBuffer>,
) {
    buffer.clear();
    composite_frame(&walls.entries, &sprites.entries, &mut *buffer);
    buffer.offset = shake.offset;
}

/// Эффект в мире (вспышка, кровь): проецируется как обычный спрайт
pub fn spawn_effect(world: &mut World, position: Vec2, size: f32, image: ImageRef, ttl_ms: Option<u32>) -> Entity {
    world
        .spawn((Effect { ttl_ms }, WorldPosition(position), SpriteVisual { size, image }))
        .id()
}

/// System: despawn эффектов с истёкшим ttl
pub fn expire_effects(mut commands: Commands, clock: Res<FrameClock>, mut effects: Query<(Entity, &mut Effect)>) {
    for (entity, mut effect) in effects.iter_mut() {
        let Some(ttl) = effect.ttl_ms else {
            continue;
        };
        let remaining = ttl.saturating_sub(clock.delta_ms);
        if remaining == 0 {
            commands.entity(entity).despawn();
        } else {
            effect.ttl_ms = Some(remaining);
        }
    }
}
