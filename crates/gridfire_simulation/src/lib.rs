//! GRIDFIRE Simulation Core
//!
//! Ядро grid-based pseudo-3D шутера на Bevy 0.16 ECS:
//! - MotionController: WASD + sprint/crouch/stamina, axis-separated коллизии с GridMap
//! - WeaponFSM: Idle ↔ Reloading, боезапас, arsenal из трёх оружий
//! - CombatFeedback: damage indicators, регенерация, melee cooldown, screen shake
//! - Projector + Compositor: world → screen и painter's algorithm
//!
//! Host (окно, headless runner, тест) владеет `App`, каждый frame заполняет
//! `PlayerInput` и `WallColumns`, продвигает `FrameClock` и вызывает `update()`.
//! Ray-casting стен, audio, ассеты и отрисовка HUD - снаружи.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod combat;
pub mod components;
pub mod hud;
pub mod input;
pub mod logger;
pub mod movement;
pub mod notifications;
pub mod pickups;
pub mod rendering;
pub mod session;
pub mod settings;
pub mod world;

// Re-export базовых типов для удобства
pub use combat::{
    Ammo, Arsenal, CombatFeedback, CombatPlugin, DamageIndicator, EnemyDamaged, EntityDied, PlayerDamaged,
    ScreenShake, Weapon, WeaponFired, WeaponKind, WeaponPhase,
};
pub use components::*;
pub use hud::{HudPlugin, HudState, StaminaTier};
pub use input::{FrameClock, PlayerInput};
pub use logger::*;
pub use movement::MovementPlugin;
pub use notifications::{GameNotification, SoundCue};
pub use pickups::{Pickup, PickupKind, PickupPlugin};
pub use rendering::{AngleWrap, FrameBuffer, ProjectionEntry, Projector, RenderingPlugin, ScreenRect, WallColumns};
pub use session::{start_new_game, GameOver, SessionState};
pub use settings::{GameSettings, SettingsError, Viewport, WeaponSwitchPolicy};
pub use world::{load_default_level, spawn_enemy, GridMap};

/// Фазы одного тика (выполняются строго по порядку)
///
/// input → motion → weapon → combat → projection → composite → feedback
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Движение игрока + подбор pickups
    Motion,
    /// Смена оружия, выстрел, frame clock
    Weapon,
    /// Попадания, урон, регенерация, cooldowns
    Combat,
    Projection,
    Composite,
    /// Prune индикаторов, HUD, анимации, expiry эффектов
    Feedback,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Seed из create_headless_app не перетираем
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app.init_resource::<settings::GameSettings>()
            .init_resource::<FrameClock>()
            .init_resource::<PlayerInput>()
            .init_resource::<GridMap>()
            .init_resource::<SessionState>()
            .add_event::<GameNotification>()
            .add_event::<GameOver>();

        app.configure_sets(
            Update,
            (
                SimulationSet::Motion,
                SimulationSet::Weapon,
                SimulationSet::Combat,
                SimulationSet::Projection,
                SimulationSet::Composite,
                SimulationSet::Feedback,
            )
                .chain(),
        );

        // Game over замораживает gameplay до start_new_game; кадр и HUD продолжают жить
        app.configure_sets(Update, SimulationSet::Motion.run_if(session::session_running))
            .configure_sets(Update, SimulationSet::Weapon.run_if(session::session_running))
            .configure_sets(Update, SimulationSet::Combat.run_if(session::session_running));

        // Подсистемы
        app.add_plugins((MovementPlugin, CombatPlugin, PickupPlugin, RenderingPlugin, HudPlugin));

        // One-shot ввод живёт ровно один тик
        app.add_systems(Update, input::clear_frame_actions.after(SimulationSet::Feedback));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции (без подсистем)
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed));

    app
}

/// Headless App со всеми подсистемами и уровнем по умолчанию
pub fn create_game_app(seed: u64) -> App {
    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin);
    load_default_level(app.world_mut());
    app
}

/// Один frame: продвинуть часы на `delta_ms` и прогнать Update
pub fn step_frame(app: &mut App, delta_ms: u32) {
    app.world_mut().resource_mut::<FrameClock>().advance(delta_ms);
    app.update();
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
