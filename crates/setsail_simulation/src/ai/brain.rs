//! Ship FSM: Wander → Approach → Attack
//!
//! Архитектура:
//! - `ShipBrain::init`: стартовое состояние (Wander, без target)
//! - `ShipBrain::tick`: одна оценка состояния за fixed tick
//! - ECS ничего не знает о переходах: система только собирает TickContext
//!
//! Порядок внутри состояния: выбор target → поворот → движение → переходы
//! (дистанции считаются уже от новой позиции).

use bevy::prelude::*;
use rand::Rng;

use super::predicates::{
    arrived, not_perpendicular, obstacle_blocking, player_in_attack_range, player_in_sight,
};
use super::{ShipAIConfig, ShipBrain, ShipState};
use crate::debug::{DebugSink, RayColor};
use crate::spatial::SpatialQuery;

/// Длина heading луча в Wander
const WANDER_HEADING_RAY_LENGTH: f32 = 100.0;

/// Окружение корабля на один тик
pub struct TickContext<'a, R: Rng> {
    pub delta: f32,
    /// Позиция игрока; `None`: игрок не назначен
    pub player: Option<Vec3>,
    pub config: &'a ShipAIConfig,
    pub spatial: &'a dyn SpatialQuery,
    pub rng: &'a mut R,
    pub debug: &'a mut dyn DebugSink,
}

/// Итог тика
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    pub previous: ShipState,
    pub current: ShipState,
    /// Корабль стоит бортом к игроку в Attack (damage model отсутствует)
    pub attacking: bool,
}

impl TickOutcome {
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

impl ShipBrain {
    /// Стартовый brain: Wander, target не выбран, heading = текущий rotation
    pub fn init(transform: &Transform) -> Self {
        Self {
            state: ShipState::Wander,
            target: None,
            heading: Some(transform.rotation),
        }
    }

    pub fn tick<R: Rng>(&mut self, transform: &mut Transform, mut ctx: TickContext<'_, R>) -> TickOutcome {
        let previous = self.state;

        let aligned = !not_perpendicular(transform, ctx.config, ctx.spatial);
        draw_broadside_rays(transform, &mut ctx, aligned);

        let player = ctx.player;
        let attacking = match player {
            // Нет игрока: вечный Wander без переходов
            None => {
                self.state = ShipState::Wander;
                self.wander_movement(transform, &mut ctx);
                false
            }
            Some(player) => match self.state {
                ShipState::Wander => {
                    self.wander(transform, &mut ctx, player);
                    false
                }
                ShipState::Approach => {
                    self.approach(transform, &mut ctx, player);
                    false
                }
                ShipState::Attack => self.attack(transform, &mut ctx, player),
            },
        };

        let label = if attacking { "Attacking!" } else { self.state.as_str() };
        ctx.debug.set_label(label);

        TickOutcome {
            previous,
            current: self.state,
            attacking,
        }
    }

    fn wander<R: Rng>(&mut self, transform: &mut Transform, ctx: &mut TickContext<'_, R>, player: Vec3) {
        self.wander_movement(transform, ctx);

        let position = transform.translation;
        if player_in_attack_range(position, player, ctx.config) {
            self.state = ShipState::Attack;
        } else if player_in_sight(position, player, ctx.config) {
            self.state = ShipState::Approach;
        }
    }

    fn wander_movement<R: Rng>(&mut self, transform: &mut Transform, ctx: &mut TickContext<'_, R>) {
        crate::log("Wandering");

        if arrived(transform.translation, self.target, ctx.config.stopping_range) {
            crate::log("Selecting random target");
            self.select_random_target(transform, ctx);
        }

        self.steer(transform, ctx.config, ctx.delta);

        let blocked = obstacle_blocking(transform, ctx.spatial);
        let color = if blocked { RayColor::Red } else { RayColor::Green };
        ctx.debug.draw_ray(
            transform.translation,
            transform.forward() * WANDER_HEADING_RAY_LENGTH,
            color,
        );

        if blocked {
            crate::log("Obstacle is blocking the path, rerouting");
            self.select_random_target(transform, ctx);
        }
    }

    fn approach<R: Rng>(&mut self, transform: &mut Transform, ctx: &mut TickContext<'_, R>, player: Vec3) {
        crate::log("Approaching");

        if arrived(transform.translation, self.target, ctx.config.stopping_range) {
            self.lock_target(transform.translation, player);
        }

        self.steer(transform, ctx.config, ctx.delta);

        let blocked = obstacle_blocking(transform, ctx.spatial);
        let color = if blocked { RayColor::Red } else { RayColor::Blue };
        ctx.debug.draw_ray(
            transform.translation,
            transform.forward() * ctx.config.sight_range,
            color,
        );

        // Последовательные проверки: при нарушенном порядке радиусов побеждает последняя
        let position = transform.translation;
        if player_in_attack_range(position, player, ctx.config) {
            self.state = ShipState::Attack;
        }
        if !player_in_sight(position, player, ctx.config) {
            self.state = ShipState::Wander;
        }
    }

    fn attack<R: Rng>(&mut self, transform: &mut Transform, ctx: &mut TickContext<'_, R>, player: Vec3) -> bool {
        if not_perpendicular(transform, ctx.config, ctx.spatial) {
            crate::log("Rotating");
            transform.rotate_y(ctx.config.attack_turn_rate_deg.to_radians() * ctx.delta);
        }

        // Перепроверяем после поворота
        let attacking = !not_perpendicular(transform, ctx.config, ctx.spatial);
        if attacking {
            crate::log("Attacking the player!");
        }

        let position = transform.translation;
        let in_sight = player_in_sight(position, player, ctx.config);
        if in_sight && !player_in_attack_range(position, player, ctx.config) {
            self.state = ShipState::Approach;
        }
        if !in_sight {
            self.state = ShipState::Wander;
        }

        attacking
    }

    /// Точка впереди корабля со случайным разбросом влево/вправо, на высоте корабля
    fn select_random_target<R: Rng>(&mut self, transform: &Transform, ctx: &mut TickContext<'_, R>) {
        let jitter = ctx.config.wander_jitter;
        let (dx, dz) = if jitter > 0.0 {
            (
                ctx.rng.gen_range(-jitter..jitter),
                ctx.rng.gen_range(-jitter..jitter),
            )
        } else {
            (0.0, 0.0)
        };

        let ahead = transform.translation + transform.forward() * ctx.config.wander_forward_offset;
        let target = Vec3::new(ahead.x + dx, transform.translation.y, ahead.z + dz);

        self.set_target(transform.translation, target);
    }

    /// Захват живой позиции игрока
    fn lock_target(&mut self, position: Vec3, player: Vec3) {
        self.set_target(position, player);
    }

    fn set_target(&mut self, position: Vec3, target: Vec3) {
        self.target = Some(target);

        // Heading только в плоскости XZ
        let facing = (target - position).normalize_or_zero();
        let facing = Vec3::new(facing.x, 0.0, facing.z);

        // Цель строго над/под кораблём: heading не меняем
        if let Ok(direction) = Dir3::new(facing) {
            self.heading = Some(Transform::IDENTITY.looking_to(direction, Dir3::Y).rotation);
        }
    }

    /// Повернуть на heading и сдвинуться вперёд на move_speed * delta
    fn steer(&self, transform: &mut Transform, config: &ShipAIConfig, delta: f32) {
        if let Some(heading) = self.heading {
            transform.rotation = heading;
        }

        let step = transform.forward() * (config.move_speed * delta);
        transform.translation += step;
    }
}

fn draw_broadside_rays<R: Rng>(transform: &Transform, ctx: &mut TickContext<'_, R>, aligned: bool) {
    let origin = transform.translation;
    let lateral = transform.right() * ctx.config.attack_range;
    let color = if aligned { RayColor::Green } else { RayColor::Red };

    ctx.debug.draw_ray(origin, lateral, color);
    ctx.debug.draw_ray(origin, -lateral, color);
}
