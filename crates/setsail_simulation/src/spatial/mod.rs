//! Spatial queries: raycast абстракция для AI predicates
//!
//! AI не знает, кто отвечает на raycast: аналитические sphere colliders
//! (headless/tests) или физический движок (Rapier, feature "rapier").

use bevy::prelude::*;

pub mod spheres;

#[cfg(feature = "rapier")]
pub mod rapier;

pub use spheres::SphereColliders;

#[cfg(feature = "rapier")]
pub use rapier::RapierSpatialQuery;

/// Тег entity для raycast попаданий (аналог engine tags)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
#[reflect(Component)]
pub enum EntityTag {
    #[default]
    Untagged,
    Player,
    Ship,
}

/// Сферический collider для аналитического raycast backend
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct RayCollider {
    pub radius: f32,
}

impl RayCollider {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }
}

impl Default for RayCollider {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Результат raycast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Entity владельца collider. `None`: collider без entity (статичная геометрия уровня)
    pub entity: Option<Entity>,
    pub tag: EntityTag,
    /// Точка попадания (world)
    pub point: Vec3,
    /// Дистанция от origin до point
    pub distance: f32,
}

impl RayHit {
    pub fn is_player(&self) -> bool {
        self.tag == EntityTag::Player
    }
}

/// Ray-casting query service
///
/// Возвращает ближайшее попадание вдоль `direction` (не обязательно normalized)
/// в пределах `max_distance`.
pub trait SpatialQuery {
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit>;
}

impl<T: SpatialQuery + ?Sized> SpatialQuery for &T {
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        (**self).cast_ray(origin, direction, max_distance)
    }
}

/// Пустой мир: raycast никогда не попадает
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptySpace;

impl SpatialQuery for EmptySpace {
    fn cast_ray(&self, _origin: Vec3, _direction: Vec3, _max_distance: f32) -> Option<RayHit> {
        None
    }
}
