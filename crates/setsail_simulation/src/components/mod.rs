//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - ship: корабль под управлением AI (Ship marker, ship_bundle)
//! - player: player control (Player, PlayerInput, PlayerMovement)
//!
//! AI-специфичные компоненты (ShipBrain, ShipAIConfig, PlayerRef) живут в `ai::components`,
//! raycast компоненты (RayCollider, EntityTag) в `spatial`.

pub mod player;
pub mod ship;

// Re-exports для удобного импорта
pub use player::*;
pub use ship::*;
