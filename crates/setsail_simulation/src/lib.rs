//! SetSail Simulation Core
//!
//! Headless ECS-симуляция на Bevy 0.16: вражеские корабли с FSM AI
//! (Wander → Approach → Attack) против игрока.
//!
//! Движок (рендер, input, debug text): снаружи:
//! - читает Transform / DebugOverlay / ShipStateChanged
//! - пишет PlayerInput

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod ai;
pub mod components;
pub mod config;
pub mod debug;
pub mod logger;
pub mod player;
pub mod spatial;

// Re-export базовых типов для удобства
pub use ai::{AIPlugin, PlayerRef, ShipAIConfig, ShipBrain, ShipState, SpatialBackend};
pub use ai::{ShipAttacking, ShipStateChanged};
pub use components::*;
pub use config::ConfigError;
pub use debug::DebugOverlay;
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use player::PlayerPlugin;
pub use spatial::{EntityTag, RayCollider};

/// Частота simulation tick
pub const SIMULATION_HZ: f64 = 60.0;

/// Порядок подсистем внутри FixedUpdate
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Движение игрока (input)
    Player,
    /// Ship AI (видит позицию игрока этого тика)
    Ai,
}

/// Главный plugin симуляции (объединяет все подсистемы)
#[derive(Default)]
pub struct SimulationPlugin {
    pub backend: SpatialBackend,
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ))
            .configure_sets(FixedUpdate, (SimulationSet::Player, SimulationSet::Ai).chain())
            .add_plugins((
                PlayerPlugin,
                AIPlugin {
                    backend: self.backend,
                },
            ));

        // Детерминистичный RNG (seed по умолчанию), если App не задал свой
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }
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

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время двигается вручную: один `app.update()` = один fixed tick
/// (первый update только инициализирует часы).
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / SIMULATION_HZ,
        )));

    app
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

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
