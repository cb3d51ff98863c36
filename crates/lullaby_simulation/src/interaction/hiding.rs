//! Hiding spots (шкафы, кровати)
//!
//! Toggle рядом с укрытием: вход → hidden + игрок выключен + blackout + текст,
//! выход: всё обратно. Пока hidden, призрак не видит и не ловит игрока.

use bevy::prelude::*;

use crate::components::{Player, PlayerStatus};
use crate::presentation::{PresentationCommand, ScreenOverlay};
use crate::scheduler::SimulationClock;
use crate::session::SessionState;

/// Component: укрытие. `player_in_range` пишет trigger collaborator.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct HidingSpot {
    pub player_in_range: bool,
}

/// Игрок нажал "interact" (host input)
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct HideToggleRequested;

/// System: применить toggle запросы
///
/// Игнорируется вне укрытия, во время respawn и после конца сессии.
pub fn apply_hide_toggles(
    clock: Res<SimulationClock>,
    session: Res<SessionState>,
    mut requests: EventReader<HideToggleRequested>,
    spots: Query<&HidingSpot>,
    mut players: Query<(Entity, &mut PlayerStatus), With<Player>>,
    mut overlay: ResMut<ScreenOverlay>,
    mut commands: EventWriter<PresentationCommand>,
) {
    // Читаем всегда, чтобы запросы не копились
    let toggles = requests.read().count();

    if toggles == 0 || clock.frozen || session.respawning || session.is_terminal() {
        return;
    }

    if !spots.iter().any(|spot| spot.player_in_range) {
        return;
    }

    let Ok((player, mut status)) = players.single_mut() else {
        return;
    };

    for _ in 0..toggles {
        let hiding = !status.hidden;
        status.hidden = hiding;
        status.active = !hiding;
        overlay.blackout = hiding;
        overlay.hiding_text = hiding;

        commands.write(PresentationCommand::SetEntityActive { entity: player, active: !hiding });
        commands.write(PresentationCommand::SetBlackout(hiding));
        commands.write(PresentationCommand::ShowHidingText(hiding));

        crate::logger::log(if hiding { "🙈 Player hides" } else { "🚪 Player leaves hiding" });
    }
}
