//! Player control компоненты
//!
//! Отмечает entity которым управляет игрок (в отличие от AI кораблей).
//! Маппинг клавиатуры/геймпада на PlayerInput: задача движка, не симуляции.

use bevy::prelude::*;

use crate::spatial::{EntityTag, RayCollider};

/// Marker component для player-controlled entity
///
/// # Архитектурная заметка
/// - Ship AI ищет цель через `With<Player>` (аналог поиска по тегу)
/// - AI systems используют `Without<Player>` filter для своих кораблей
/// - Raycast backend помечает попадания в Player как `EntityTag::Player`
/// - RayCollider обязателен: без него боковые лучи корабля игрока не видят
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Transform, PlayerInput, PlayerMovement, RayCollider)]
pub struct Player;

/// Input оси для движения игрока
///
/// `axis.x`: horizontal (X), `axis.y`: vertical (мировая Z).
/// Для headless тестов: scripted input через этот компонент.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct PlayerInput {
    pub axis: Vec2,
}

/// Параметры движения игрока
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct PlayerMovement {
    /// Скорость (units/sec)
    pub speed: f32,
    /// Множитель для диагонального движения (обе оси != 0)
    pub diagonal_factor: f32,
}

impl Default for PlayerMovement {
    fn default() -> Self {
        Self {
            speed: 10.0,
            diagonal_factor: 0.666,
        }
    }
}

impl PlayerMovement {
    /// Смещение за тик для данного input
    pub fn displacement(&self, axis: Vec2, delta: f32) -> Vec3 {
        let mut input = Vec3::new(axis.x, 0.0, axis.y);

        if axis.x != 0.0 && axis.y != 0.0 {
            // Гасим ускорение по диагонали
            input *= self.diagonal_factor;
        }

        input * delta * self.speed
    }
}

/// Bundle игрока: marker + collider (чтобы perpendicularity raycasts могли в него попасть)
pub fn player_bundle(position: Vec3, collider_radius: f32) -> impl Bundle {
    (
        Player,
        Transform::from_translation(position),
        RayCollider::new(collider_radius),
        EntityTag::Player,
    )
}
