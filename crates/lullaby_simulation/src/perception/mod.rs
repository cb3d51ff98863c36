//! Perception: видит ли призрак игрока в этот тик
//!
//! Порядок проверок (дешёвые первыми):
//! 1. hidden → не видим (укрытие перекрывает геометрию)
//! 2. distance >= sight range → не видим
//! 3. угол к игроку >= fov/2 → не видим
//! 4. occlusion ray от призрака к игроку → видим, если ничего не блокирует
//!
//! Без внутреннего состояния: чистая функция от входов тика.

use bevy::prelude::*;

use crate::config::PursuitSettings;

pub mod obstacles;

pub use obstacles::ObstacleField;

/// Ray-vs-geometry запрос, только по obstacle слою
pub trait OcclusionQuery: Send + Sync {
    fn raycast_blocked(&self, from: Vec3, direction: Vec3, max_distance: f32) -> bool;
}

/// Resource: occlusion collaborator (physics движка или `ObstacleField`)
#[derive(Resource)]
pub struct Occlusion(pub Box<dyn OcclusionQuery>);

impl Occlusion {
    pub fn new(query: impl OcclusionQuery + 'static) -> Self {
        Self(Box::new(query))
    }
}

/// Конус зрения призрака
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct VisionCone {
    pub sight_range: f32,
    /// Полный угол (градусы)
    pub field_of_view: f32,
}

impl VisionCone {
    pub fn from_settings(settings: &PursuitSettings) -> Self {
        Self {
            sight_range: settings.sight_range,
            field_of_view: settings.field_of_view,
        }
    }

    fn half_angle_radians(&self) -> f32 {
        (self.field_of_view * 0.5).to_radians()
    }
}

/// Наблюдатель: позиция глаз + направление взгляда
#[derive(Debug, Clone, Copy)]
pub struct Observer {
    pub position: Vec3,
    pub forward: Vec3,
}

pub fn can_see_player(
    observer: Observer,
    player_position: Vec3,
    player_hidden: bool,
    cone: &VisionCone,
    occlusion: &dyn OcclusionQuery,
) -> bool {
    if player_hidden {
        return false;
    }

    let to_player = player_position - observer.position;
    let distance = to_player.length();

    if distance >= cone.sight_range {
        return false;
    }

    // Игрок в точке призрака: нулевой угол, нулевой луч
    if distance <= f32::EPSILON {
        return true;
    }

    let direction = to_player / distance;
    let angle = observer.forward.angle_between(direction);

    // NaN (нулевой forward) тоже отсекаем
    if angle.is_nan() || angle >= cone.half_angle_radians() {
        return false;
    }

    !occlusion.raycast_blocked(observer.position, direction, distance)
}
