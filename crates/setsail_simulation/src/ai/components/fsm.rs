//! Ship AI components (state machine, tuning, brain, player reference).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Состояния FSM корабля
///
/// Ровно одно активно; переходы считаются каждый fixed tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize)]
pub enum ShipState {
    /// Случайное движение вперёд в поисках игрока
    #[default]
    Wander,
    /// Игрок в sight range: идём к нему
    Approach,
    /// Игрок в attack range: разворачиваемся бортом и атакуем
    Attack,
}

impl ShipState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShipState::Wander => "Wander",
            ShipState::Approach => "Approach",
            ShipState::Attack => "Attack",
        }
    }
}

impl fmt::Display for ShipState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Параметры ship AI
///
/// Ожидается `stopping_range < attack_range < sight_range`, но не форсируется
/// (нарушение только логируется, см. `ShipAIConfig::validate`).
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct ShipAIConfig {
    /// Скорость движения (units/sec)
    pub move_speed: f32,
    /// Радиус "прибытия" к target
    pub stopping_range: f32,
    /// Радиус атаки (и длина perpendicularity лучей)
    pub attack_range: f32,
    /// Радиус видимости игрока
    pub sight_range: f32,
    /// Скорость разворота в Attack (градусы/сек вокруг +Y)
    pub attack_turn_rate_deg: f32,
    /// Wander: насколько далеко вперёд выбирается точка
    pub wander_forward_offset: f32,
    /// Wander: случайный разброс по X и Z, [-jitter, jitter)
    pub wander_jitter: f32,
    /// Высота origin для perpendicularity лучей
    pub ray_height: f32,
    /// Искать Player entity самостоятельно (false: PlayerRef назначается снаружи)
    pub auto_resolve_player: bool,
    /// Вести DebugOverlay (label + rays)
    pub debug: bool,
}

impl Default for ShipAIConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            stopping_range: 50.0,
            attack_range: 150.0,
            sight_range: 200.0,
            attack_turn_rate_deg: 5.0,
            wander_forward_offset: 50.0,
            wander_jitter: 100.0,
            ray_height: 0.5,
            auto_resolve_player: true,
            debug: true,
        }
    }
}

/// Ссылка на игрока (цель AI)
///
/// `None`: игрок не назначен: корабль остаётся в Wander, пока ссылка не появится.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PlayerRef(pub Option<Entity>);

/// Мозг корабля: текущее состояние FSM + target
///
/// Логика переходов: в `ai::brain` (`ShipBrain::tick`).
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct ShipBrain {
    pub(crate) state: ShipState,
    /// Точка, к которой корабль сейчас рулит. `None`: ещё не выбрана
    pub(crate) target: Option<Vec3>,
    /// Rotation "смотреть на target". `None`: не трогаем текущий rotation
    pub(crate) heading: Option<Quat>,
}

impl ShipBrain {
    pub fn state(&self) -> ShipState {
        self.state
    }

    pub fn target(&self) -> Option<Vec3> {
        self.target
    }

    pub fn heading(&self) -> Option<Quat> {
        self.heading
    }
}
