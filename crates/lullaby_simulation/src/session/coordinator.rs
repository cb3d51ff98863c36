//! SessionCoordinator: реакция на session сигналы
//!
//! Все обработчики exclusive (`&mut World`): каждый сигнал применяется
//! целиком, до следующего. Повторные/поздние сигналы → no-op.

use bevy::prelude::*;

use crate::components::{EscapeGate, PlayerStatus};
use crate::logger;
use crate::presentation::{send_command, set_blackout, PresentationCommand};
use crate::scheduler::SimulationClock;
use crate::session::state::{CatchOutcome, GeneratorProgress};
use crate::session::{antagonist_entity, player_entity, respawn, status, SessionSignal, SessionState};

/// Exclusive system: разобрать все сигналы этого тика (по порядку отправки)
pub fn process_session_signals(world: &mut World) {
    let signals: Vec<SessionSignal> = world.resource_mut::<Events<SessionSignal>>().drain().collect();

    for signal in signals {
        match signal {
            SessionSignal::GeneratorFixed => on_generator_fixed(world),
            SessionSignal::PlayerCaught => on_player_caught(world),
            SessionSignal::PlayerEscaped => on_player_escaped(world),
        }
    }
}

pub fn on_generator_fixed(world: &mut World) {
    let progress = world.resource_mut::<SessionState>().record_generator_fixed();

    match progress {
        GeneratorProgress::Ignored => {}
        GeneratorProgress::Fixed { fixed, total } => {
            logger::log_info(&format!("🔧 Generator fixed ({}/{})", fixed, total));
            status::show_transient(world, format!("{}/{} Generators Fixed", fixed, total));
        }
        GeneratorProgress::AllFixed => {
            logger::log_info("🔧 All generators fixed → escape gate open");
            open_gate(world);
            status::show_transient(world, "Escape Gate Open!");
        }
    }
}

pub fn on_player_caught(world: &mut World) {
    let outcome = world.resource_mut::<SessionState>().record_catch();

    match outcome {
        CatchOutcome::Ignored => {}
        CatchOutcome::Respawn { deaths } => {
            logger::log_info(&format!("👻 Player caught (death {})", deaths));
            deactivate_player(world);
            respawn::begin_respawn(world);
        }
        CatchOutcome::Died => {
            logger::log_info("☠️ Player caught for the last time → session lost");
            deactivate_player(world);
            status::set_persistent(world, "You Died.");
            set_blackout(world, true);
            freeze_simulation(world);
            respawn::set_antagonist_enabled(world, false);
        }
    }
}

pub fn on_player_escaped(world: &mut World) {
    if !world.resource_mut::<SessionState>().record_escape() {
        return;
    }

    logger::log_info("🏁 Player escaped → session won");
    status::set_persistent(world, "You Escaped!");

    // Призрак выключается целиком (не только state machine)
    if let Some(ghost) = antagonist_entity(world) {
        respawn::set_antagonist_enabled(world, false);
        send_command(world, PresentationCommand::SetEntityActive { entity: ghost, active: false });
    }

    freeze_simulation(world);
    deactivate_player(world);
}

/// Ворота открываются один раз (gate obstacle выключен)
pub fn open_gate(world: &mut World) {
    let mut gate = world.resource_mut::<EscapeGate>();
    if gate.open {
        return;
    }
    gate.open = true;

    send_command(world, PresentationCommand::OpenGate);
}

/// Остановить simulation time: scheduler, AI, virtual clock
pub fn freeze_simulation(world: &mut World) {
    world.resource_mut::<SimulationClock>().frozen = true;

    if let Some(mut time) = world.get_resource_mut::<Time<Virtual>>() {
        time.pause();
    }

    send_command(world, PresentationCommand::FreezeTime(true));
}

fn deactivate_player(world: &mut World) {
    let Some(player) = player_entity(world) else {
        return;
    };

    if let Some(mut player_status) = world.get_mut::<PlayerStatus>(player) {
        player_status.active = false;
    }
    send_command(world, PresentationCommand::SetEntityActive { entity: player, active: false });
}
