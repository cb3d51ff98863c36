//! Headless navigation агент: прямая линия к destination, без препятствий
//!
//! Для headless bin и тестов. Navigable surface = прямоугольник XZ на фиксированной высоте.

use bevy::prelude::*;

use super::NavigationAgent;
use crate::components::ArenaBounds;

#[derive(Debug, Clone)]
pub struct StraightLineAgent {
    pub position: Vec3,
    pub forward: Vec3,
    pub destination: Option<Vec3>,
    pub speed: f32,
    /// Проходимая область (XZ); `None`: бесконечная плоскость
    pub walkable: Option<ArenaBounds>,
    /// Высота navigable surface
    pub ground_height: f32,
}

impl StraightLineAgent {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            forward: Vec3::Z,
            destination: None,
            speed: 0.0,
            walkable: None,
            ground_height: position.y,
        }
    }

    pub fn with_forward(mut self, forward: Vec3) -> Self {
        self.forward = forward.try_normalize().unwrap_or(Vec3::Z);
        self
    }

    pub fn with_walkable(mut self, walkable: ArenaBounds) -> Self {
        self.walkable = Some(walkable);
        self
    }
}

impl NavigationAgent for StraightLineAgent {
    fn set_destination(&mut self, point: Vec3) {
        // Агент ходит только по поверхности
        self.destination = Some(Vec3::new(point.x, self.ground_height, point.z));
    }

    fn has_path(&self) -> bool {
        self.destination.is_some()
    }

    fn remaining_distance(&self) -> f32 {
        self.destination
            .map(|target| self.position.distance(target))
            .unwrap_or(0.0)
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    fn current_position(&self) -> Vec3 {
        self.position
    }

    fn forward(&self) -> Vec3 {
        self.forward
    }

    fn sample_position(&self, point: Vec3, max_distance: f32) -> Option<Vec3> {
        let mut projected = Vec3::new(point.x, self.ground_height, point.z);

        if let Some(bounds) = &self.walkable {
            projected.x = projected.x.clamp(bounds.min_x, bounds.max_x);
            projected.z = projected.z.clamp(bounds.min_z, bounds.max_z);
        }

        (projected.distance(point) <= max_distance).then_some(projected)
    }

    fn advance(&mut self, delta: f32) {
        let Some(target) = self.destination else {
            return;
        };

        let to_target = target - self.position;
        let distance = to_target.length();
        let step = self.speed * delta;

        if distance <= step || distance <= f32::EPSILON {
            self.position = target;
            self.destination = None;
            return;
        }

        let direction = to_target / distance;
        self.position += direction * step;

        // Смотрим туда, куда идём (только горизонталь)
        let horizontal = Vec3::new(direction.x, 0.0, direction.z);
        if horizontal.length_squared() > f32::EPSILON {
            self.forward = horizontal.normalize();
        }
    }
}
