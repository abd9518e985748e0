//! Predicates для ship FSM: дистанции, прибытие, препятствия, perpendicularity
//!
//! Чистые функции без ECS: тестируются без App.

use bevy::prelude::*;

use super::ShipAIConfig;
use crate::spatial::SpatialQuery;

/// Игрок в sight range (граница включительно)
pub fn player_in_sight(ship: Vec3, player: Vec3, config: &ShipAIConfig) -> bool {
    ship.distance(player) <= config.sight_range
}

/// Игрок в attack range (граница включительно)
pub fn player_in_attack_range(ship: Vec3, player: Vec3, config: &ShipAIConfig) -> bool {
    ship.distance(player) <= config.attack_range
}

/// Нужен ли новый target
///
/// true если target ещё не выбран ИЛИ корабль в пределах stopping range от него.
/// NB: "прибытие" здесь означает "ещё рядом": сравнение сохранено как есть,
/// на нём держится поведение Approach (перезахват игрока только вблизи target).
pub fn arrived(ship: Vec3, target: Option<Vec3>, stopping_range: f32) -> bool {
    match target {
        None => true,
        Some(target) => ship.distance(target) <= stopping_range,
    }
}

/// Препятствие на курсе
///
/// Obstacle avoidance не реализован: всегда `false`.
pub fn obstacle_blocking(_transform: &Transform, _spatial: &dyn SpatialQuery) -> bool {
    false
}

/// Игрок НЕ на траверзе корабля
///
/// Два луча из `position + up * ray_height` вдоль +right и -right длиной attack_range.
/// Попадание любого луча в игрока → корабль повёрнут бортом → `false`.
/// Попадание в collider без entity сразу даёт `true` (лучи проверяются по порядку).
pub fn not_perpendicular(
    transform: &Transform,
    config: &ShipAIConfig,
    spatial: &dyn SpatialQuery,
) -> bool {
    let origin = transform.translation + Vec3::Y * config.ray_height;
    let right = transform.right().as_vec3();

    let mut not_perpendicular = true;

    for direction in [right, -right] {
        let Some(hit) = spatial.cast_ray(origin, direction, config.attack_range) else {
            continue;
        };

        if hit.entity.is_none() {
            return true;
        }

        if hit.is_player() {
            not_perpendicular = false;
        }
    }

    not_perpendicular
}
