//! Debug overlay: observability sink для ship AI
//!
//! AI пишет label (имя состояния) и лучи (perpendicularity, heading) в DebugSink.
//! Presentation слой (движок) читает DebugOverlay компонент и рисует как хочет.
//! В production (`ShipAIConfig::debug == false`) используется NoopDebugSink.

use bevy::prelude::*;

/// Цвет debug луча
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum RayColor {
    Red,
    Green,
    Blue,
}

/// Луч, нарисованный AI за тик
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct DebugRay {
    pub origin: Vec3,
    /// Направление * длина
    pub vector: Vec3,
    pub color: RayColor,
}

pub trait DebugSink {
    fn draw_ray(&mut self, origin: Vec3, vector: Vec3, color: RayColor);
    fn set_label(&mut self, text: &str);
}

/// Production sink: ничего не делает
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDebugSink;

impl DebugSink for NoopDebugSink {
    fn draw_ray(&mut self, _origin: Vec3, _vector: Vec3, _color: RayColor) {}

    fn set_label(&mut self, _text: &str) {}
}

/// Component: debug информация корабля за последний тик
///
/// Перезаписывается каждый тик (rays очищаются перед tick).
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct DebugOverlay {
    pub label: String,
    pub rays: Vec<DebugRay>,
}

impl DebugOverlay {
    pub fn clear(&mut self) {
        self.label.clear();
        self.rays.clear();
    }
}

impl DebugSink for DebugOverlay {
    fn draw_ray(&mut self, origin: Vec3, vector: Vec3, color: RayColor) {
        self.rays.push(DebugRay {
            origin,
            vector,
            color,
        });
    }

    fn set_label(&mut self, text: &str) {
        self.label.clear();
        self.label.push_str(text);
    }
}
