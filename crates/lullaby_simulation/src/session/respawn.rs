//! Respawn: выбор точки (rejection sampling) + двухшаговая sequence
//!
//! Sequence:
//! 1. `begin_respawn`: blackout, "You Were Caught...", призрак выключен,
//!    через `respawn_delay_secs` → шаг 2
//! 2. `complete_respawn`: точка подальше от *текущей* позиции призрака,
//!    игрок перенесён и включён, призрак включён, blackout снят

use bevy::prelude::*;
use rand::Rng;

use crate::components::{Antagonist, ArenaBounds, PlayerStatus};
use crate::config::GameConfig;
use crate::logger;
use crate::presentation::{send_command, set_blackout, PresentationCommand, RespawnPlacement};
use crate::scheduler::{Scheduler, TimerClass};
use crate::session::{antagonist_entity, antagonist_position, player_entity, status, SessionState};
use crate::DeterministicRng;

/// Первый кандидат на расстоянии ≥ `min_separation` от призрака.
///
/// Минимум одна попытка всегда. Попытки кончились → последний кандидат,
/// `separation_met = false` (degraded success, не ошибка).
pub fn pick_respawn_position(
    bounds: &ArenaBounds,
    antagonist_position: Vec3,
    min_separation: f32,
    max_attempts: u32,
    rng: &mut impl Rng,
) -> RespawnPlacement {
    let max_attempts = max_attempts.max(1);
    let mut attempts = 0;

    loop {
        let candidate = bounds.sample_point(rng);
        attempts += 1;

        let separation_met = candidate.distance(antagonist_position) >= min_separation;
        if separation_met || attempts >= max_attempts {
            return RespawnPlacement {
                position: candidate,
                attempts,
                separation_met,
            };
        }
    }
}

/// Шаг 1 (вызывается из OnPlayerCaught, игрок уже выключен)
pub fn begin_respawn(world: &mut World) {
    set_blackout(world, true);
    status::show_transient(world, "You Were Caught...");
    set_antagonist_enabled(world, false);

    let delay = world
        .get_resource::<GameConfig>()
        .map(|config| config.session.respawn_delay_secs)
        .unwrap_or_default();

    world
        .resource_mut::<Scheduler>()
        .schedule_with_class(TimerClass::Respawn, delay, complete_respawn);

    logger::log(&format!("💀 Player caught → respawn in {:.1}s", delay));
}

/// Шаг 2 (scheduled continuation)
pub fn complete_respawn(world: &mut World) {
    let (min_separation, max_attempts) = world
        .get_resource::<GameConfig>()
        .map(|config| (config.respawn.min_separation, config.respawn.max_attempts))
        .unwrap_or((0.0, 1));
    let bounds = world.get_resource::<ArenaBounds>().copied().unwrap_or_default();
    let ghost_position = antagonist_position(world).unwrap_or(Vec3::ZERO);

    let mut rng = world.resource_mut::<DeterministicRng>();
    let placement = pick_respawn_position(&bounds, ghost_position, min_separation, max_attempts, &mut rng.rng);

    if let Some(player) = player_entity(world) {
        if let Some(mut transform) = world.get_mut::<Transform>(player) {
            transform.translation = placement.position;
        }
        if let Some(mut player_status) = world.get_mut::<PlayerStatus>(player) {
            player_status.active = true;
        }
        send_command(
            world,
            PresentationCommand::SetPosition {
                entity: player,
                position: placement.position,
            },
        );
        send_command(world, PresentationCommand::SetEntityActive { entity: player, active: true });
    }

    set_antagonist_enabled(world, true);
    set_blackout(world, false);

    world.resource_mut::<SessionState>().finish_respawn(placement);
    send_command(world, PresentationCommand::RespawnPlaced(placement));

    if placement.separation_met {
        logger::log(&format!(
            "✨ Player respawned at {:?} ({} attempt(s))",
            placement.position, placement.attempts
        ));
    } else {
        logger::log_warning(&format!(
            "Respawn: no point ≥ {} from ghost after {} attempts → using last candidate {:?}",
            min_separation, placement.attempts, placement.position
        ));
    }

    let session = world.resource::<SessionState>();
    if !session.all_generators_fixed() {
        let text = session.generator_status_text();
        status::show_transient(world, text);
    }
}

pub fn set_antagonist_enabled(world: &mut World, enabled: bool) {
    let Some(ghost) = antagonist_entity(world) else {
        return;
    };

    if let Some(mut antagonist) = world.get_mut::<Antagonist>(ghost) {
        antagonist.enabled = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_accepted_point_respects_separation() {
        let bounds = ArenaBounds::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        for _ in 0..200 {
            let placement = pick_respawn_position(&bounds, Vec3::new(-18.0, 0.0, -18.0), 30.0, 50, &mut rng);

            assert!(bounds.contains_xz(placement.position));
            assert_eq!(placement.position.y, 7.0);
            assert!(placement.attempts >= 1 && placement.attempts <= 50);
            if placement.separation_met {
                assert!(placement.position.distance(Vec3::new(-18.0, 0.0, -18.0)) >= 30.0);
            }
        }
    }

    #[test]
    fn test_impossible_separation_degrades_to_last_candidate() {
        let bounds = ArenaBounds::default();
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        // Арена 40×40: до 1000 не дотянуться никак
        let placement = pick_respawn_position(&bounds, Vec3::ZERO, 1000.0, 50, &mut rng);

        assert!(!placement.separation_met);
        assert_eq!(placement.attempts, 50);
        assert!(bounds.contains_xz(placement.position));
        assert_eq!(placement.position.y, bounds.respawn_elevation);
    }

    #[test]
    fn test_zero_attempts_still_samples_once() {
        let bounds = ArenaBounds::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let placement = pick_respawn_position(&bounds, Vec3::ZERO, 1000.0, 0, &mut rng);

        assert_eq!(placement.attempts, 1);
        assert!(bounds.contains_xz(placement.position));
    }

    #[test]
    fn test_zero_separation_accepts_first_sample() {
        let bounds = ArenaBounds::default();
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        let placement = pick_respawn_position(&bounds, Vec3::ZERO, 0.0, 50, &mut rng);

        assert!(placement.separation_met);
        assert_eq!(placement.attempts, 1);
    }
}
