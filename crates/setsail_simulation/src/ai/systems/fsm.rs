//! Ship FSM systems (player reference resolution, per-tick brain evaluation).

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::ai::{PlayerRef, ShipAIConfig, ShipAttacking, ShipBrain, ShipStateChanged, TickContext};
use crate::components::{Player, Ship};
use crate::debug::{DebugOverlay, DebugSink, NoopDebugSink};
use crate::spatial::{EntityTag, RayCollider, SphereColliders, SpatialQuery};
use crate::DeterministicRng;

type ShipData = (
    Entity,
    &'static mut Transform,
    &'static mut ShipBrain,
    &'static ShipAIConfig,
    &'static mut PlayerRef,
    &'static mut DebugOverlay,
);

type ShipFilter = (With<Ship>, Without<Player>);

/// Система: поиск игрока для кораблей без PlayerRef
///
/// Запускается в Startup (init) и каждый FixedUpdate, пока ссылка не найдена:
/// корабль без игрока просто остаётся в Wander.
/// Корабли с `auto_resolve_player == false` ждут, что PlayerRef назначат снаружи.
pub fn resolve_player_reference(
    mut ships: Query<(Entity, &mut PlayerRef, &ShipAIConfig), With<Ship>>,
    players: Query<Entity, With<Player>>,
) {
    for (ship, mut player_ref, config) in ships.iter_mut() {
        if player_ref.0.is_some() || !config.auto_resolve_player {
            continue;
        }

        let Some(player) = players.iter().next() else {
            continue;
        };

        player_ref.0 = Some(player);
        crate::log_info(&format!("Ship {:?}: player reference resolved → {:?}", ship, player));
    }
}

/// Общие ресурсы для тика кораблей
#[derive(SystemParam)]
pub struct ShipTickContext<'w, 's> {
    players: Query<'w, 's, &'static Transform, (With<Player>, Without<Ship>)>,
    rng: ResMut<'w, DeterministicRng>,
    time: Res<'w, Time<Fixed>>,
    state_events: EventWriter<'w, ShipStateChanged>,
    attack_events: EventWriter<'w, ShipAttacking>,
}

impl ShipTickContext<'_, '_> {
    /// Позиция игрока по PlayerRef. Ссылка на исчезнувший entity сбрасывается.
    fn player_position(&self, ship: Entity, player_ref: &mut PlayerRef) -> Option<(Entity, Vec3)> {
        let player = player_ref.0?;

        match self.players.get(player) {
            Ok(transform) => Some((player, transform.translation)),
            Err(_) => {
                crate::log_warning(&format!(
                    "Ship {:?}: player {:?} is gone, dropping reference",
                    ship, player
                ));
                player_ref.0 = None;
                None
            }
        }
    }

    fn tick_ships<S: SpatialQuery>(
        &mut self,
        ships: &mut Query<ShipData, ShipFilter>,
        spatial_for: impl Fn(Entity) -> S,
    ) {
        let delta = self.time.delta_secs();

        for (entity, mut transform, mut brain, config, mut player_ref, mut overlay) in ships.iter_mut() {
            let player = self.player_position(entity, &mut player_ref);
            let spatial = spatial_for(entity);

            overlay.clear();
            let mut noop = NoopDebugSink;
            let debug: &mut dyn DebugSink = if config.debug {
                &mut *overlay
            } else {
                &mut noop
            };

            let outcome = brain.tick(
                &mut transform,
                TickContext {
                    delta,
                    player: player.map(|(_, position)| position),
                    config,
                    spatial: &spatial,
                    rng: &mut self.rng.rng,
                    debug,
                },
            );

            if outcome.changed() {
                crate::log_info(&format!(
                    "Ship {:?}: {} → {}",
                    entity, outcome.previous, outcome.current
                ));
                self.state_events.write(ShipStateChanged {
                    ship: entity,
                    from: outcome.previous,
                    to: outcome.current,
                });
            }

            if outcome.attacking {
                if let Some((player, _)) = player {
                    self.attack_events.write(ShipAttacking { ship: entity, player });
                }
            }
        }
    }
}

/// Система: один тик FSM для всех кораблей
///
/// Raycasts: аналитические sphere colliders (RayCollider) всех не-кораблей.
pub fn ship_ai_tick(
    mut ships: Query<ShipData, ShipFilter>,
    colliders: Query<
        (Entity, &Transform, &RayCollider, Option<&EntityTag>, Has<Player>),
        Without<Ship>,
    >,
    mut ctx: ShipTickContext,
) {
    let mut spatial = SphereColliders::new();
    for (entity, transform, collider, tag, is_player) in colliders.iter() {
        let tag = if is_player {
            EntityTag::Player
        } else {
            tag.copied().unwrap_or_default()
        };
        spatial.push(entity, tag, transform.translation, collider.radius);
    }

    let spatial = &spatial;
    ctx.tick_ships(&mut ships, move |_| spatial);
}

/// Система: тик FSM с raycasts через Rapier
#[cfg(feature = "rapier")]
pub fn ship_ai_tick_rapier(
    mut ships: Query<ShipData, ShipFilter>,
    rapier: bevy_rapier3d::prelude::ReadRapierContext,
    tags: crate::spatial::rapier::TagQuery,
    mut ctx: ShipTickContext,
) {
    use crate::spatial::RapierSpatialQuery;

    let Ok(context) = rapier.single() else {
        crate::log_warning("ship_ai_tick_rapier: RapierContext не найден");
        return;
    };

    let context = &context;
    let tags = &tags;
    ctx.tick_ships(&mut ships, move |ship| {
        RapierSpatialQuery::new(context, tags).excluding(ship)
    });
}
