//! Player movement: демонстрационный контроллер цели для ship AI

use bevy::prelude::*;

use crate::components::{Player, PlayerInput, PlayerMovement};
use crate::SimulationSet;

/// Система: PlayerInput → Transform
///
/// Работает в FixedUpdate до AI, чтобы корабли видели позицию игрока этого тика.
pub fn apply_player_input(
    mut players: Query<(&mut Transform, &PlayerInput, &PlayerMovement), With<Player>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut transform, input, movement) in players.iter_mut() {
        if input.axis == Vec2::ZERO {
            continue;
        }
        transform.translation += movement.displacement(input.axis, delta);
    }
}

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Player>()
            .register_type::<PlayerInput>()
            .register_type::<PlayerMovement>()
            .add_systems(FixedUpdate, apply_player_input.in_set(SimulationSet::Player));
    }
}
