//! Audio cues призрака (lullaby vs chase)

use bevy::prelude::*;

use crate::ai::components::PursuitBrain;
use crate::components::Antagonist;
use crate::presentation::{Cue, CuePlayback, PresentationCommand};
use crate::scheduler::SimulationClock;

/// System: Chasing → chase cue, иначе lullaby
///
/// Команды уходят только когда запрошенное состояние отличается от `CuePlayback`.
/// Выключенный призрак (respawn sequence, конец сессии) cues не трогает:
/// catch сам переводит его в Patrolling, и lullaby включается в тот же тик.
pub fn ai_audio_cues(
    clock: Res<SimulationClock>,
    antagonists: Query<(&Antagonist, &PursuitBrain)>,
    mut playback: ResMut<CuePlayback>,
    mut commands: EventWriter<PresentationCommand>,
) {
    if clock.frozen {
        return;
    }

    for (antagonist, brain) in antagonists.iter() {
        if !antagonist.enabled {
            continue;
        }

        let chasing = brain.state.is_chasing();

        for (cue, playing) in [(Cue::Lullaby, !chasing), (Cue::Chase, chasing)] {
            if let Some(command) = playback.request(cue, playing) {
                commands.write(command);
            }
        }
    }
}
