//! Raycast backend поверх Rapier (feature "rapier")
//!
//! Используется когда в App подключён RapierPhysicsPlugin и у entity есть
//! настоящие Collider. Тег берётся из EntityTag / Player компонентов владельца.
//! Collider, содержащий origin луча, игнорируется (как в `spheres`).

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::{EntityTag, RayHit, SpatialQuery};
use crate::components::Player;

/// Query для определения тега по entity collider'а
pub type TagQuery<'w, 's> = Query<'w, 's, (Option<&'static EntityTag>, Has<Player>)>;

pub struct RapierSpatialQuery<'a, 'w, 's> {
    context: &'a RapierContext<'a>,
    tags: &'a TagQuery<'w, 's>,
    exclude: Option<Entity>,
}

impl<'a, 'w, 's> RapierSpatialQuery<'a, 'w, 's> {
    pub fn new(context: &'a RapierContext<'a>, tags: &'a TagQuery<'w, 's>) -> Self {
        Self {
            context,
            tags,
            exclude: None,
        }
    }

    /// Не попадать в collider самого корабля
    pub fn excluding(mut self, entity: Entity) -> Self {
        self.exclude = Some(entity);
        self
    }
}

impl SpatialQuery for RapierSpatialQuery<'_, '_, '_> {
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }

        let mut filter = QueryFilter::default();
        if let Some(entity) = self.exclude {
            filter = filter.exclude_collider(entity).exclude_rigid_body(entity);
        }

        // Как и у sphere backend: collider, внутри которого начинается луч, не в счёт
        let mut inside = Vec::new();
        self.context.intersect_point(origin, filter, |entity| {
            inside.push(entity);
            true
        });
        let outside = |entity: Entity| !inside.contains(&entity);
        let filter = filter.predicate(&outside);

        let (entity, distance) = self
            .context
            .cast_ray(origin, direction, max_distance, true, filter)?;

        let tag = match self.tags.get(entity) {
            Ok((_, true)) => EntityTag::Player,
            Ok((Some(tag), false)) => *tag,
            _ => EntityTag::Untagged,
        };

        Some(RayHit {
            entity: Some(entity),
            tag,
            point: origin + direction * distance,
            distance,
        })
    }
}
