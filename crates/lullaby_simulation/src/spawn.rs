//! Spawn helpers для акторов сессии
//!
//! Host (engine bridge, headless bin, тесты) создаёт entity через эти функции,
//! чтобы набор компонентов совпадал с тем, что ждут системы.

use bevy::prelude::*;

use crate::ai::{PursuitBrain, PursuitConfig};
use crate::components::{Antagonist, EscapeZone, Player};
use crate::config::GameConfig;
use crate::interaction::{Generator, HidingSpot};
use crate::navigation::{NavAgent, NavigationAgent};

pub fn spawn_player(world: &mut World, position: Vec3) -> Entity {
    world.spawn((Player, Transform::from_translation(position))).id()
}

/// Призрак: brain + pursuit параметры из `GameConfig` + navigation агент
pub fn spawn_antagonist(world: &mut World, agent: impl NavigationAgent + 'static) -> Entity {
    let settings = world
        .get_resource::<GameConfig>()
        .map(|config| config.pursuit.clone())
        .unwrap_or_default();
    let position = agent.current_position();

    world
        .spawn((
            Antagonist::default(),
            PursuitBrain::default(),
            PursuitConfig(settings),
            NavAgent::new(agent),
            Transform::from_translation(position),
        ))
        .id()
}

pub fn spawn_generator(world: &mut World, position: Vec3) -> Entity {
    world
        .spawn((Generator::default(), Transform::from_translation(position)))
        .id()
}

pub fn spawn_hiding_spot(world: &mut World, position: Vec3) -> Entity {
    world
        .spawn((HidingSpot::default(), Transform::from_translation(position)))
        .id()
}

pub fn spawn_escape_zone(world: &mut World, center: Vec3, half_extents: Vec3) -> Entity {
    world.spawn(EscapeZone::from_center(center, half_extents)).id()
}
