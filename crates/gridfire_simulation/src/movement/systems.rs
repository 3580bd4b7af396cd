//! Movement systems

use bevy::prelude::*;

use crate::components::{MotionState, Observer, Player};
use crate::input::{FrameClock, PlayerInput};
use crate::movement::controller::{self, MotionParams};
use crate::settings::GameSettings;
use crate::world::GridMap;

/// System: тик MotionController для игрока
pub fn player_motion(
    input: Res<PlayerInput>,
    clock: Res<FrameClock>,
    map: Res<GridMap>,
    settings: Res<GameSettings>,
    mut players: Query<(&mut Observer, &mut MotionState), With<Player>>,
) {
    let Ok((mut observer, mut state)) = players.single_mut() else {
        return;
    };

    let params = MotionParams::from_settings(&settings);
    let was_sprinting = state.sprinting;

    controller::tick(&mut observer, &mut state, &input, clock.delta(), &map, &params);

    if was_sprinting && !state.sprinting && state.stamina <= params.sprint_threshold {
        crate::log(&format!("Sprint stopped: stamina exhausted ({:.1})", state.stamina));
    }
}
