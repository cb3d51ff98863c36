//! Pursuit FSM components (state, memory, config).

use bevy::prelude::*;

use crate::config::PursuitSettings;

/// Состояния призрака
///
/// Patrolling → Chasing (увидел) → Searching (потерял дольше chase memory) → Patrolling
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub enum PursuitState {
    /// Случайные точки в радиусе patrol_radius вокруг себя
    #[default]
    Patrolling,

    /// Бежим к текущей позиции игрока, проверяем catch
    Chasing,

    /// Бродим вокруг last seen позиции
    Searching {
        /// Сколько уже ищем (секунды)
        elapsed: f32,
        /// Нужен новый destination (вход в состояние или старый съеден)
        needs_destination: bool,
    },
}

impl PursuitState {
    pub fn name(&self) -> &'static str {
        match self {
            PursuitState::Patrolling => "Patrolling",
            PursuitState::Chasing => "Chasing",
            PursuitState::Searching { .. } => "Searching",
        }
    }

    pub fn is_chasing(&self) -> bool {
        matches!(self, PursuitState::Chasing)
    }

    /// Тот же вариант (без учёта таймеров внутри)
    pub fn same_variant(&self, other: &PursuitState) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// Component: "мозг" призрака: state + память о игроке
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PursuitBrain {
    pub state: PursuitState,
    /// Где игрока видели последний раз
    pub last_seen: Option<Vec3>,
    /// Секунды с последнего контакта (∞ пока ни разу не видели)
    pub time_since_seen: f32,
}

impl Default for PursuitBrain {
    fn default() -> Self {
        Self {
            state: PursuitState::Patrolling,
            last_seen: None,
            time_since_seen: f32::INFINITY,
        }
    }
}

/// Component: параметры преследования (копия `GameConfig.pursuit` на spawn)
#[derive(Component, Debug, Clone, Default, Deref, DerefMut)]
pub struct PursuitConfig(pub PursuitSettings);
