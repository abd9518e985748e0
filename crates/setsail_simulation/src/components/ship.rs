//! Корабль под управлением AI

use bevy::prelude::*;

use crate::ai::{PlayerRef, ShipAIConfig, ShipBrain};
use crate::debug::DebugOverlay;

/// Корабль (enemy ship): entity, которым управляет ShipBrain FSM
///
/// Автоматически добавляет ShipBrain, ShipAIConfig, PlayerRef, DebugOverlay через Required Components.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Transform, ShipBrain, ShipAIConfig, PlayerRef, DebugOverlay)]
pub struct Ship;

/// Bundle для спавна корабля с заданной конфигурацией
///
/// Brain инициализируется текущим rotation (до первого target heading корабль не поворачивается).
pub fn ship_bundle(transform: Transform, config: ShipAIConfig) -> impl Bundle {
    (Ship, ShipBrain::init(&transform), transform, config)
}
