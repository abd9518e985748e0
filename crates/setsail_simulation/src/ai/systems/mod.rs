//! Ship AI systems (ECS wiring для ShipBrain)

pub mod fsm;

// Re-export all systems
pub use fsm::*;
