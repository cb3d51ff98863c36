//! Session domain module
//!
//! Счётчики сессии, status сообщения, respawn sequence, terminal переходы.
//!
//! Поток: trigger systems / pursuit tick → `SessionSignal` → `process_session_signals`
//! (exclusive, после AI) → presentation commands + scheduled continuations.

use bevy::prelude::*;

use crate::ai::PursuitBrain;
use crate::components::{Antagonist, Player};
use crate::config::GameConfig;
use crate::logger;
use crate::navigation::NavAgent;
use crate::perception::Occlusion;
use crate::presentation::{send_command, Cue, PresentationCommand};

pub mod coordinator;
pub mod respawn;
pub mod state;
pub mod status;

pub use coordinator::{on_generator_fixed, on_player_caught, on_player_escaped, process_session_signals};
pub use respawn::pick_respawn_position;
pub use state::{SessionOutcome, SessionState};
pub use status::StatusBoard;

/// Сигналы в SessionCoordinator (trigger collaborators + pursuit)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSignal {
    /// Генератор починен (один раз на генератор)
    GeneratorFixed,
    /// Catch condition выполнен в Chasing
    PlayerCaught,
    /// Игрок вошёл в escape zone
    PlayerEscaped,
}

pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SessionSignal>()
            .init_resource::<StatusBoard>()
            .add_systems(Startup, start_session);
    }
}

/// Startup (exclusive): начальный status, audio ranges, проверка collaborators
pub fn start_session(world: &mut World) {
    let audio = world
        .get_resource::<GameConfig>()
        .map(|config| config.audio.clone())
        .unwrap_or_default();

    send_command(world, PresentationCommand::ConfigureCue { cue: Cue::Lullaby, range: audio.lullaby_range });
    send_command(world, PresentationCommand::ConfigureCue { cue: Cue::Chase, range: audio.chase_range });

    report_missing_collaborators(world);

    let text = world.resource::<SessionState>().generator_status_text();
    status::show_transient(world, text);

    logger::log_info("🎮 Session started");
}

/// Один раз на старте: чего не хватает: зависимая работа будет тихо пропускаться
fn report_missing_collaborators(world: &mut World) {
    if player_entity(world).is_none() {
        logger::log_error("Session: no Player entity → pursuit, respawn and triggers are skipped");
    }

    match antagonist_entity(world) {
        None => logger::log_error("Session: no Antagonist entity → pursuit is skipped"),
        Some(ghost) => {
            if world.get::<NavAgent>(ghost).is_none() {
                logger::log_error("Session: Antagonist has no NavAgent → pursuit is skipped");
            }
            if world.get::<PursuitBrain>(ghost).is_none() {
                logger::log_error("Session: Antagonist has no PursuitBrain → pursuit is skipped");
            }
        }
    }

    if !world.contains_resource::<Occlusion>() {
        logger::log_error("Session: no Occlusion query → antagonist never sees the player");
    }
}

pub fn player_entity(world: &mut World) -> Option<Entity> {
    let mut players = world.query_filtered::<Entity, With<Player>>();
    players.iter(world).next()
}

pub fn antagonist_entity(world: &mut World) -> Option<Entity> {
    let mut antagonists = world.query_filtered::<Entity, With<Antagonist>>();
    antagonists.iter(world).next()
}

/// Позиция призрака: navigation агент авторитетен, иначе Transform
pub fn antagonist_position(world: &mut World) -> Option<Vec3> {
    let ghost = antagonist_entity(world)?;

    if let Some(agent) = world.get::<NavAgent>(ghost) {
        return Some(agent.0.current_position());
    }

    world.get::<Transform>(ghost).map(|transform| transform.translation)
}
