//! World компоненты: границы арены, ворота, зона побега

use bevy::prelude::*;
use rand::Rng;

use crate::config::ArenaConfig;

/// Прямоугольник арены (XZ) + фиксированная высота respawn
///
/// Immutable после старта сессии.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct ArenaBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
    pub respawn_elevation: f32,
}

impl Default for ArenaBounds {
    fn default() -> Self {
        Self::from_config(&ArenaConfig::default())
    }
}

impl ArenaBounds {
    pub fn from_config(config: &ArenaConfig) -> Self {
        Self {
            min_x: config.min_x,
            max_x: config.max_x,
            min_z: config.min_z,
            max_z: config.max_z,
            respawn_elevation: config.respawn_elevation,
        }
    }

    /// Точка внутри прямоугольника (границы включительно, Y игнорируется)
    pub fn contains_xz(&self, point: Vec3) -> bool {
        point.x >= self.min_x && point.x <= self.max_x && point.z >= self.min_z && point.z <= self.max_z
    }

    /// Случайная точка: X/Z равномерно в границах (включительно), Y = respawn elevation
    pub fn sample_point(&self, rng: &mut impl Rng) -> Vec3 {
        let x = rng.gen_range(self.min_x..=self.max_x);
        let z = rng.gen_range(self.min_z..=self.max_z);
        Vec3::new(x, self.respawn_elevation, z)
    }
}

/// Ворота побега (obstacle, пока генераторы не починены)
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct EscapeGate {
    pub open: bool,
}

/// Trigger volume зоны побега (axis-aligned box)
///
/// Игрок внутри → `SessionSignal::PlayerEscaped`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct EscapeZone {
    pub min: Vec3,
    pub max: Vec3,
}

impl EscapeZone {
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_sample_point_stays_in_bounds() {
        let bounds = ArenaBounds::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..500 {
            let point = bounds.sample_point(&mut rng);
            assert!(bounds.contains_xz(point), "{:?} outside arena", point);
            assert_eq!(point.y, bounds.respawn_elevation);
        }
    }

    #[test]
    fn test_degenerate_bounds_sample_single_point() {
        let bounds = ArenaBounds {
            min_x: 3.0,
            max_x: 3.0,
            min_z: -1.0,
            max_z: -1.0,
            respawn_elevation: 0.5,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        assert_eq!(bounds.sample_point(&mut rng), Vec3::new(3.0, 0.5, -1.0));
    }

    #[test]
    fn test_escape_zone_contains() {
        let zone = EscapeZone::from_center(Vec3::new(10.0, 0.0, 0.0), Vec3::splat(2.0));
        assert!(zone.contains(Vec3::new(11.0, 1.0, -1.5)));
        assert!(!zone.contains(Vec3::new(13.0, 0.0, 0.0)));
    }
}
