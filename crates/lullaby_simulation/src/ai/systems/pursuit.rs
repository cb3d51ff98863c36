//! Pursuit tick: perception → transition → применить команды

use bevy::prelude::*;

use crate::ai::components::{PursuitBrain, PursuitConfig};
use crate::ai::transitions::{transition, PursuitCommand, PursuitInput};
use crate::components::{Antagonist, Player, PlayerStatus};
use crate::navigation::NavAgent;
use crate::perception::{can_see_player, Observer, Occlusion, VisionCone};
use crate::scheduler::SimulationClock;
use crate::session::SessionSignal;
use crate::DeterministicRng;

/// System: один тик state machine каждого включённого призрака
///
/// Пропускается целиком, если:
/// - время заморожено (terminal сессия)
/// - нет ровно одного Player
/// - `Antagonist.enabled == false` (respawn sequence, конец сессии)
///
/// Нет `Occlusion` → призрак слепой (visible = false), но патруль/поиск работают.
pub fn ai_pursuit_tick(
    clock: Res<SimulationClock>,
    time: Res<Time<Fixed>>,
    occlusion: Option<Res<Occlusion>>,
    mut rng: ResMut<DeterministicRng>,
    players: Query<(&Transform, &PlayerStatus), With<Player>>,
    mut antagonists: Query<(Entity, &Antagonist, &mut PursuitBrain, &PursuitConfig, &mut NavAgent)>,
    mut signals: EventWriter<SessionSignal>,
) {
    if clock.frozen {
        return;
    }

    let Ok((player_transform, player_status)) = players.single() else {
        return;
    };
    let player_position = player_transform.translation;
    let delta = time.delta_secs();

    for (entity, antagonist, mut brain, config, mut agent) in antagonists.iter_mut() {
        if !antagonist.enabled {
            continue;
        }

        let observer = Observer {
            position: agent.0.current_position(),
            forward: agent.0.forward(),
        };

        // Выключенный игрок (укрытие) не виден; hidden дополнительно блокирует catch
        let visible = player_status.active
            && occlusion.as_deref().is_some_and(|occlusion| {
                can_see_player(
                    observer,
                    player_position,
                    player_status.hidden,
                    &VisionCone::from_settings(config),
                    occlusion.0.as_ref(),
                )
            });

        let input = PursuitInput {
            visible,
            player_hidden: player_status.hidden,
            player_position,
            antagonist_position: observer.position,
            nav: agent.status(),
            delta,
        };

        let (next, commands) = transition(&brain, &input, config, &mut rng.rng);

        if !brain.state.same_variant(&next.state) {
            crate::logger::log(&format!(
                "👻 {:?}: {} → {}",
                entity,
                brain.state.name(),
                next.state.name()
            ));
        }
        *brain = next;

        for command in commands {
            match command {
                PursuitCommand::SetSpeed(speed) => agent.0.set_speed(speed),
                PursuitCommand::SetDestination(point) => agent.0.set_destination(point),
                PursuitCommand::SetNavigableDestination { target, search_radius } => {
                    match agent.0.sample_position(target, search_radius) {
                        Some(point) => agent.0.set_destination(point),
                        // Держим прежний destination, следующий тик попробует снова
                        None => crate::logger::log(&format!(
                            "{:?}: no navigable point near {:?} → retry next tick",
                            entity, target
                        )),
                    }
                }
                PursuitCommand::PlayerCaught => {
                    crate::logger::log(&format!("👻 {:?} caught the player", entity));
                    signals.write(SessionSignal::PlayerCaught);
                }
            }
        }
    }
}
