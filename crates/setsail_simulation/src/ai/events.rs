//! Ship AI Events: доменные события FSM
//!
//! Presentation слой / звук / будущая damage model подписываются через EventReader.

use bevy::prelude::*;

use super::ShipState;

/// Корабль сменил состояние FSM
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ShipStateChanged {
    pub ship: Entity,
    pub from: ShipState,
    pub to: ShipState,
}

/// Корабль стоит бортом к игроку в Attack (генерируется каждый такой тик)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ShipAttacking {
    pub ship: Entity,
    pub player: Entity,
}
