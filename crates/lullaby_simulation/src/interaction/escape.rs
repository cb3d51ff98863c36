//! Escape zone trigger

use bevy::prelude::*;

use crate::components::{EscapeGate, EscapeZone, Player, PlayerStatus};
use crate::scheduler::SimulationClock;
use crate::session::SessionSignal;

/// System: игрок вошёл в escape zone → `SessionSignal::PlayerEscaped`
///
/// Срабатывает на вход (edge), не на каждый тик внутри.
/// Закрытые ворота физически закрывают зону → пока `EscapeGate.open == false` не срабатывает.
pub fn detect_escape_zones(
    clock: Res<SimulationClock>,
    gate: Res<EscapeGate>,
    zones: Query<&EscapeZone>,
    players: Query<(&Transform, &PlayerStatus), With<Player>>,
    mut was_inside: Local<bool>,
    mut signals: EventWriter<SessionSignal>,
) {
    if clock.frozen {
        return;
    }

    let Ok((transform, status)) = players.single() else {
        return;
    };

    let inside = gate.open
        && status.active
        && zones.iter().any(|zone| zone.contains(transform.translation));

    if inside && !*was_inside {
        crate::logger::log(&format!("🚪 Player entered escape zone at {:?}", transform.translation));
        signals.write(SessionSignal::PlayerEscaped);
    }

    *was_inside = inside;
}
