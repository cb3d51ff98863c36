//! Pursuit transition function
//!
//! (brain, perception, elapsed) → (next brain, commands).
//! Никаких side effects: команды применяет `ai_pursuit_tick`.
//!
//! Порядок внутри тика:
//! 1. visibility bookkeeping (увидел → Chasing, приоритет над всем)
//! 2. поведение текущего state (speed + destination)
//! 3. catch check (только Chasing)
//! 4. chase memory expiry → Searching

use bevy::prelude::*;
use rand::Rng;

use crate::ai::components::{PursuitBrain, PursuitState};
use crate::config::PursuitSettings;
use crate::navigation::NavStatus;

/// Входы одного тика
#[derive(Debug, Clone, Copy)]
pub struct PursuitInput {
    /// Результат perception (hidden уже учтён)
    pub visible: bool,
    pub player_hidden: bool,
    pub player_position: Vec3,
    pub antagonist_position: Vec3,
    /// Статус навигации на начало тика
    pub nav: NavStatus,
    pub delta: f32,
}

/// Команды для navigation агента и сессии
#[derive(Debug, Clone, PartialEq)]
pub enum PursuitCommand {
    SetSpeed(f32),
    /// Destination как есть (игрок, точка поиска)
    SetDestination(Vec3),
    /// Спроецировать на navigable surface; не нашли → держим прежний destination
    SetNavigableDestination { target: Vec3, search_radius: f32 },
    /// Catch condition выполнен → SessionSignal::PlayerCaught
    PlayerCaught,
}

pub fn transition(
    brain: &PursuitBrain,
    input: &PursuitInput,
    settings: &PursuitSettings,
    rng: &mut impl Rng,
) -> (PursuitBrain, Vec<PursuitCommand>) {
    let mut next = *brain;
    let mut commands = Vec::with_capacity(3);

    if input.visible {
        next.last_seen = Some(input.player_position);
        next.time_since_seen = 0.0;
        next.state = PursuitState::Chasing;
    } else {
        next.time_since_seen += input.delta;
    }

    match next.state {
        PursuitState::Patrolling => {
            commands.push(PursuitCommand::SetSpeed(settings.patrol_speed));

            if input.nav.is_consumed(settings.arrival_threshold) {
                let target =
                    input.antagonist_position + random_in_unit_sphere(rng) * settings.patrol_radius;
                commands.push(PursuitCommand::SetNavigableDestination {
                    target,
                    search_radius: settings.patrol_radius,
                });
            }
        }

        PursuitState::Chasing => {
            commands.push(PursuitCommand::SetSpeed(settings.chase_speed));
            commands.push(PursuitCommand::SetDestination(input.player_position));

            let distance = input.antagonist_position.distance(input.player_position);
            if distance <= settings.catch_distance && !input.player_hidden {
                // Поймали: призрак "сбрасывается" в патруль, что бы ни решила сессия
                commands.push(PursuitCommand::PlayerCaught);
                next.state = PursuitState::Patrolling;
                return (next, commands);
            }

            if next.time_since_seen > settings.chase_memory_secs {
                next.state = PursuitState::Searching {
                    elapsed: 0.0,
                    needs_destination: true,
                };
            }
        }

        PursuitState::Searching {
            elapsed,
            needs_destination,
        } => {
            commands.push(PursuitCommand::SetSpeed(settings.patrol_speed));

            if needs_destination || input.nav.is_consumed(settings.arrival_threshold) {
                let anchor = next.last_seen.unwrap_or(input.antagonist_position);
                let target = anchor + random_in_unit_sphere(rng) * settings.search_jitter;
                commands.push(PursuitCommand::SetDestination(target));
            }

            let elapsed = elapsed + input.delta;
            next.state = if elapsed > settings.search_duration_secs {
                PursuitState::Patrolling
            } else {
                PursuitState::Searching {
                    elapsed,
                    needs_destination: false,
                }
            };
        }
    }

    (next, commands)
}

/// Равномерная точка внутри единичного шара (rejection sampling)
pub fn random_in_unit_sphere(rng: &mut impl Rng) -> Vec3 {
    loop {
        let candidate = Vec3::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        );
        if candidate.length_squared() <= 1.0 {
            return candidate;
        }
    }
}
