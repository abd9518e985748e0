//! Аналитический raycast backend: ray vs bounding spheres
//!
//! Не требует физики: headless симуляция и тесты.
//! Семантика как у физического raycast: collider, внутри которого начинается луч, игнорируется.

use bevy::math::bounding::{BoundingSphere, RayCast3d};
use bevy::prelude::*;

use super::{EntityTag, RayHit, SpatialQuery};

#[derive(Debug, Clone, Copy)]
struct SphereCollider {
    entity: Option<Entity>,
    tag: EntityTag,
    center: Vec3,
    radius: f32,
}

/// Snapshot sphere colliders на текущий тик
#[derive(Debug, Clone, Default)]
pub struct SphereColliders {
    colliders: Vec<SphereCollider>,
}

impl SphereColliders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Добавить collider принадлежащий entity
    pub fn push(&mut self, entity: Entity, tag: EntityTag, center: Vec3, radius: f32) {
        self.colliders.push(SphereCollider {
            entity: Some(entity),
            tag,
            center,
            radius,
        });
    }

    /// Добавить статичный collider без entity (геометрия уровня)
    pub fn push_static(&mut self, tag: EntityTag, center: Vec3, radius: f32) {
        self.colliders.push(SphereCollider {
            entity: None,
            tag,
            center,
            radius,
        });
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }
}

impl SpatialQuery for SphereColliders {
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        let Ok(direction) = Dir3::new(direction) else {
            return None;
        };
        let ray = RayCast3d::new(origin, direction, max_distance);

        let mut nearest: Option<RayHit> = None;

        for collider in &self.colliders {
            // Луч изнутри collider его не видит
            if origin.distance_squared(collider.center) < collider.radius * collider.radius {
                continue;
            }

            let sphere = BoundingSphere::new(collider.center, collider.radius);
            let Some(distance) = ray.sphere_intersection_at(&sphere) else {
                continue;
            };

            if nearest.is_some_and(|best| best.distance <= distance) {
                continue;
            }

            nearest = Some(RayHit {
                entity: collider.entity,
                tag: collider.tag,
                point: origin + direction * distance,
                distance,
            });
        }

        nearest
    }
}
