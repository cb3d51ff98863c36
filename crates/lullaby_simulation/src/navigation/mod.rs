//! Navigation adapter: тонкая обёртка над NavMesh агентом движка
//!
//! Архитектура:
//! - Ядро НЕ делает pathfinding: только ставит destination/speed и читает статус
//! - Движок (или headless агент) реализует `NavigationAgent`
//! - `NavAgent` component хранит boxed агент на entity призрака

use bevy::prelude::*;

use crate::scheduler::SimulationClock;

pub mod headless;

pub use headless::StraightLineAgent;

/// Контракт navigation агента (NavMeshAgent в движке)
pub trait NavigationAgent: Send + Sync {
    fn set_destination(&mut self, point: Vec3);

    fn has_path(&self) -> bool;

    fn remaining_distance(&self) -> f32;

    fn set_speed(&mut self, speed: f32);

    fn current_position(&self) -> Vec3;

    /// Направление взгляда (для field-of-view)
    fn forward(&self) -> Vec3;

    /// Проекция точки на navigable surface в радиусе `max_distance`.
    /// `None`: рядом нет проходимой поверхности.
    fn sample_position(&self, point: Vec3, max_distance: f32) -> Option<Vec3>;

    /// Продвинуть агента на `delta` секунд.
    /// Engine-driven агенты двигаются сами и оставляют no-op.
    fn advance(&mut self, _delta: f32) {}
}

/// Component: navigation агент призрака
#[derive(Component)]
pub struct NavAgent(pub Box<dyn NavigationAgent>);

impl NavAgent {
    pub fn new(agent: impl NavigationAgent + 'static) -> Self {
        Self(Box::new(agent))
    }

    /// Снимок статуса для transition function
    pub fn status(&self) -> NavStatus {
        NavStatus {
            has_path: self.0.has_path(),
            remaining_distance: self.0.remaining_distance(),
        }
    }
}

/// Статус навигации на начало тика
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavStatus {
    pub has_path: bool,
    pub remaining_distance: f32,
}

impl NavStatus {
    /// Destination "съеден": пути нет или почти дошли
    pub fn is_consumed(&self, arrival_threshold: f32) -> bool {
        !self.has_path || self.remaining_distance < arrival_threshold
    }
}

/// Система: продвинуть navigation агентов (FixedUpdate, перед AI)
///
/// Transform entity следует за агентом (агент авторитетен для позиции призрака).
pub fn advance_navigation_agents(
    clock: Res<SimulationClock>,
    time: Res<Time<Fixed>>,
    mut agents: Query<(&mut NavAgent, Option<&mut Transform>)>,
) {
    if clock.frozen {
        return;
    }

    let delta = time.delta_secs();

    for (mut agent, transform) in agents.iter_mut() {
        agent.0.advance(delta);

        if let Some(mut transform) = transform {
            transform.translation = agent.0.current_position();
        }
    }
}
