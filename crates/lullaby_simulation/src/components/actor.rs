//! Акторы сессии: Player (управляется снаружи) и Antagonist (призрак)

use bevy::prelude::*;

/// Marker component для player-controlled entity
///
/// Позиция игрока: `Transform.translation` (пишет locomotion collaborator,
/// respawn переписывает её напрямую).
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(Transform, PlayerStatus)]
pub struct Player;

/// Состояние игрока, которое читает и меняет ядро
///
/// - `active`: entity включён (false во время respawn, после смерти/побега, в укрытии)
/// - `hidden`: игрок в укрытии: перекрывает геометрическую видимость и catch check
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PlayerStatus {
    pub active: bool,
    pub hidden: bool,
}

impl Default for PlayerStatus {
    fn default() -> Self {
        Self {
            active: true,
            hidden: false,
        }
    }
}

/// Призрак: преследующий NPC
///
/// `enabled` выключает state machine целиком (tick пропускается).
/// Переключает только SessionCoordinator: respawn sequence, смерть, побег.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Antagonist {
    pub enabled: bool,
}

impl Default for Antagonist {
    fn default() -> Self {
        Self { enabled: true }
    }
}
