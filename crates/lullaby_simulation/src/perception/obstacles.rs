//! ObstacleField: headless occlusion, набор AABB на obstacle слое
//!
//! Ray-vs-box через `bevy::math::bounding` (slab test).

use bevy::math::bounding::{Aabb3d, RayCast3d};
use bevy::prelude::*;

use super::OcclusionQuery;

#[derive(Debug, Clone, Default)]
pub struct ObstacleField {
    pub obstacles: Vec<Aabb3d>,
}

impl ObstacleField {
    pub fn add_box(&mut self, center: Vec3, half_size: Vec3) -> &mut Self {
        self.obstacles.push(Aabb3d::new(center, half_size));
        self
    }
}

impl OcclusionQuery for ObstacleField {
    fn raycast_blocked(&self, from: Vec3, direction: Vec3, max_distance: f32) -> bool {
        // Нулевой луч ничего не пересекает
        let Ok(direction) = Dir3::new(direction) else {
            return false;
        };

        let ray = RayCast3d::new(from, direction, max_distance);
        self.obstacles
            .iter()
            .any(|aabb| ray.aabb_intersection_at(aabb).is_some())
    }
}
