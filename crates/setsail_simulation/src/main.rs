//! Headless симуляция SetSail
//!
//! Один корабль и игрок, который едет прямо на него: Wander → Approach → Attack.

use bevy::prelude::*;
use setsail_simulation::{
    create_headless_app, player_bundle, ship_bundle, PlayerInput, ShipAIConfig, ShipBrain,
    SimulationPlugin,
};

fn main() {
    let seed = 42;
    println!("Starting SetSail headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin::default());

    let ship = app
        .world_mut()
        .spawn(ship_bundle(Transform::default(), ShipAIConfig::default()))
        .id();

    // Игрок стартует за sight range и едет к кораблю по -Z
    let player = app
        .world_mut()
        .spawn(player_bundle(Vec3::new(0.0, 0.0, 400.0), 3.0))
        .id();
    if let Some(mut input) = app.world_mut().get_mut::<PlayerInput>(player) {
        input.axis = Vec2::new(0.0, -1.0);
    }

    // 60 секунд симуляции
    for tick in 0..3600 {
        app.update();

        if tick % 60 == 0 {
            let world = app.world();
            let (Some(brain), Some(ship_transform), Some(player_transform)) = (
                world.get::<ShipBrain>(ship),
                world.get::<Transform>(ship),
                world.get::<Transform>(player),
            ) else {
                continue;
            };

            println!(
                "Tick {}: ship {} at {:.1?}, player at {:.1?} (distance {:.1})",
                tick,
                brain.state(),
                ship_transform.translation,
                player_transform.translation,
                ship_transform.translation.distance(player_transform.translation),
            );
        }
    }

    println!("Simulation complete!");
}
