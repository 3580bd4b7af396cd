//! Pickups: аптечки и патроны
//!
//! Подбор - по дистанции до observer-а (без нажатия). Собранный pickup
//! остаётся entity (collected = true) и не проецируется; новая игра его
//! возвращает.

use bevy::prelude::*;

use crate::combat::Ammo;
use crate::components::{Health, ImageRef, Observer, Player, SpriteVisual, WorldPosition};
use crate::input::FrameClock;
use crate::movement::player_motion;
use crate::notifications::{GameNotification, SoundCue};
use crate::settings::{GameSettings, PickupSettings};
use crate::SimulationSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum PickupKind {
    Health,
    Ammo,
}

impl PickupKind {
    /// Цвет обода процедурного спрайта
    pub fn color(self) -> [u8; 3] {
        match self {
            PickupKind::Health => [255, 50, 50],
            PickupKind::Ammo => [255, 200, 50],
        }
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Pickup {
    pub kind: PickupKind,
    pub value: u32,
    pub collected: bool,
    /// Угол вращения спрайта (только визуал)
    pub spin_angle: f32,
    pub spin_clock_ms: u32,
}

impl Pickup {
    pub fn new(kind: PickupKind, settings: &PickupSettings) -> Self {
        let value = match kind {
            PickupKind::Health => settings.health_value,
            PickupKind::Ammo => settings.ammo_value,
        };
        Self {
            kind,
            value,
            collected: false,
            spin_angle: 0.0,
            spin_clock_ms: 0,
        }
    }

    pub fn reset(&mut self) {
        self.collected = false;
        self.spin_angle = 0.0;
        self.spin_clock_ms = 0;
    }

    /// +step, когда накоплено строго больше interval
    pub fn spin(&mut self, delta_ms: u32, interval_ms: u32, step: f32) {
        self.spin_clock_ms = self.spin_clock_ms.saturating_add(delta_ms);
        if self.spin_clock_ms > interval_ms {
            self.spin_clock_ms = 0;
            self.spin_angle += step;
        }
    }
}

pub fn spawn_pickup(world: &mut World, position: Vec2, kind: PickupKind, settings: &PickupSettings) -> Entity {
    world
        .spawn((
            Pickup::new(kind, settings),
            WorldPosition(position),
            SpriteVisual {
                size: settings.size,
                image: ImageRef::Disc { rgb: kind.color() },
            },
        ))
        .id()
}

/// System: подбор в радиусе
///
/// Pickup собирается, даже если здоровье/патроны уже полные (значение клампится).
pub fn collect_pickups(
    settings: Res<GameSettings>,
    mut players: Query<(&Observer, &mut Health, &mut Ammo), With<Player>>,
    mut pickups: Query<(&mut Pickup, &WorldPosition)>,
    mut notifications: EventWriter<GameNotification>,
) {
    let Ok((observer, mut health, mut ammo)) = players.single_mut() else {
        return;
    };
    let radius = settings.pickups.pickup_radius;

    for (mut pickup, position) in pickups.iter_mut() {
        if pickup.collected || position.0.distance(observer.position) >= radius {
            continue;
        }

        pickup.collected = true;
        match pickup.kind {
            PickupKind::Health => health.heal(pickup.value),
            PickupKind::Ammo => {
                ammo.refill(pickup.value);
            }
        }

        notifications.write(GameNotification::PlaySound(SoundCue::Pickup));
        crate::log(&format!(
            "Picked up {:?} +{} (HP: {}, ammo: {})",
            pickup.kind, pickup.value, health.current, ammo.current
        ));
    }
}

/// System: вращение спрайтов
pub fn animate_pickups(clock: Res<FrameClock>, settings: Res<GameSettings>, mut pickups: Query<&mut Pickup>) {
    let pickup_settings = &settings.pickups;
    for mut pickup in pickups.iter_mut() {
        pickup.spin(clock.delta_ms, pickup_settings.spin_interval_ms, pickup_settings.spin_step);
    }
}

/// Pickup Plugin
///
/// collect_pickups - в Motion сразу после движения игрока;
/// animate_pickups - в Feedback.
pub struct PickupPlugin;

impl Plugin for PickupPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                collect_pickups.after(player_motion).in_set(SimulationSet::Motion),
                animate_pickups.in_set(SimulationSet::Feedback),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pickup_values_from_settings() {
        let settings = PickupSettings::default();
        assert_eq!(Pickup::new(PickupKind::Health, &settings).value, 25);
        assert_eq!(Pickup::new(PickupKind::Ammo, &settings).value, 20);
    }

    #[test]
    fn test_spin_needs_strictly_more_than_interval() {
        let mut pickup = Pickup::new(PickupKind::Ammo, &PickupSettings::default());
        pickup.spin(200, 200, 0.2);
        assert_eq!(pickup.spin_angle, 0.0);
        pickup.spin(1, 200, 0.2);
        assert!((pickup.spin_angle - 0.2).abs() < 1e-6);
        assert_eq!(pickup.spin_clock_ms, 0);
    }

    #[test]
    fn test_reset_restores_pickup() {
        let mut pickup = Pickup::new(PickupKind::Health, &PickupSettings::default());
        pickup.collected = true;
        pickup.spin(500, 200, 0.2);
        pickup.reset();
        assert!(!pickup.collected);
        assert_eq!(pickup.spin_angle, 0.0);
    }
}
