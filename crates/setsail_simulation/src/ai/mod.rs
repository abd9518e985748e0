//! Ship AI: FSM для вражеских кораблей
//!
//! Wander → Approach → Attack по дистанции до игрока и боковым raycasts.
//! Логика переходов чистая (`brain`, `predicates`), ECS только собирает контекст.

use bevy::prelude::*;

use crate::SimulationSet;

pub mod brain;
pub mod components;
pub mod events;
pub mod predicates;
pub mod systems;


// Re-export основных типов
pub use brain::{TickContext, TickOutcome};
pub use components::{PlayerRef, ShipAIConfig, ShipBrain, ShipState};
pub use events::{ShipAttacking, ShipStateChanged};

/// Источник raycasts для ship AI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpatialBackend {
    /// Аналитические sphere colliders (RayCollider), без физики
    #[default]
    Spheres,
    /// RapierContext (нужен RapierPhysicsPlugin в App)
    #[cfg(feature = "rapier")]
    Rapier,
}

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate для детерминизма.
/// Порядок выполнения:
/// 1. resolve_player_reference: поиск игрока (пока не найден)
/// 2. ship_ai_tick: один тик FSM на корабль
#[derive(Default)]
pub struct AIPlugin {
    pub backend: SpatialBackend,
}

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ShipStateChanged>()
            .add_event::<ShipAttacking>()
            .register_type::<ShipBrain>()
            .register_type::<ShipAIConfig>()
            .register_type::<PlayerRef>()
            .add_systems(Startup, systems::resolve_player_reference);

        match self.backend {
            SpatialBackend::Spheres => {
                app.add_systems(
                    FixedUpdate,
                    (systems::resolve_player_reference, systems::ship_ai_tick)
                        .chain() // Последовательное выполнение для детерминизма
                        .in_set(SimulationSet::Ai),
                );
            }
            #[cfg(feature = "rapier")]
            SpatialBackend::Rapier => {
                app.add_systems(
                    FixedUpdate,
                    (systems::resolve_player_reference, systems::ship_ai_tick_rapier)
                        .chain()
                        .in_set(SimulationSet::Ai),
                );
            }
        }
    }
}
