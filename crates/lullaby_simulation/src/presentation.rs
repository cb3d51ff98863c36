//! Presentation commands: всё, что ядро просит сделать движок/UI
//!
//! Ядро ничего не рендерит и не играет звук: оно пишет `PresentationCommand`
//! события, хост (engine bridge, headless bin) их читает и применяет.
//! Текущее "что на экране" дублируется в ресурсах (`StatusBoard`, `ScreenOverlay`,
//! `CuePlayback`), чтобы ядро могло сравнивать и не слать дубли.

use bevy::prelude::*;

/// Именованные audio cues призрака
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum Cue {
    /// Колыбельная: idle/патруль
    Lullaby,
    /// Музыка погони
    Chase,
}

impl Cue {
    pub fn name(&self) -> &'static str {
        match self {
            Cue::Lullaby => "lullaby",
            Cue::Chase => "chase",
        }
    }
}

/// Вид status сообщения
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum MessageKind {
    /// Само исчезает через `status_display_secs`
    Transient,
    /// Висит, пока не заменят
    Persistent,
}

/// Итог размещения при respawn (телеметрия)
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct RespawnPlacement {
    pub position: Vec3,
    /// Сколько кандидатов сэмплировали (1..=max_attempts)
    pub attempts: u32,
    /// false → попытки кончились, взят последний кандидат
    pub separation_met: bool,
}

/// Команды presentation collaborator'ам
#[derive(Event, Debug, Clone, PartialEq)]
pub enum PresentationCommand {
    SetEntityActive { entity: Entity, active: bool },
    SetPosition { entity: Entity, position: Vec3 },
    ShowStatus { text: String, kind: MessageKind },
    ClearStatus,
    PlayCue(Cue),
    StopCue(Cue),
    /// Дальность слышимости cue (публикуется на старте)
    ConfigureCue { cue: Cue, range: f32 },
    SetBlackout(bool),
    ShowHidingText(bool),
    FreezeTime(bool),
    OpenGate,
    RespawnPlaced(RespawnPlacement),
}

/// Resource: какие cues сейчас играют (по мнению ядра)
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct CuePlayback {
    pub lullaby: bool,
    pub chase: bool,
}

impl CuePlayback {
    pub fn is_playing(&self, cue: Cue) -> bool {
        match cue {
            Cue::Lullaby => self.lullaby,
            Cue::Chase => self.chase,
        }
    }

    /// Выставить состояние cue. `Some(command)`: только если оно поменялось.
    pub fn request(&mut self, cue: Cue, playing: bool) -> Option<PresentationCommand> {
        let slot = match cue {
            Cue::Lullaby => &mut self.lullaby,
            Cue::Chase => &mut self.chase,
        };

        if *slot == playing {
            return None;
        }
        *slot = playing;

        Some(if playing {
            PresentationCommand::PlayCue(cue)
        } else {
            PresentationCommand::StopCue(cue)
        })
    }
}

/// Resource: full-screen overlay (blackout + текст укрытия)
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct ScreenOverlay {
    pub blackout: bool,
    pub hiding_text: bool,
}

pub struct PresentationPlugin;

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PresentationCommand>()
            .init_resource::<CuePlayback>()
            .init_resource::<ScreenOverlay>();
    }
}

/// Хелпер: отправить команду из exclusive контекста
pub fn send_command(world: &mut World, command: PresentationCommand) {
    world.send_event(command);
}

/// Blackout + синхронизация `ScreenOverlay`
pub fn set_blackout(world: &mut World, on: bool) {
    world.resource_mut::<ScreenOverlay>().blackout = on;
    send_command(world, PresentationCommand::SetBlackout(on));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cue_request_only_emits_on_change() {
        let mut playback = CuePlayback::default();

        assert_eq!(
            playback.request(Cue::Lullaby, true),
            Some(PresentationCommand::PlayCue(Cue::Lullaby))
        );
        assert_eq!(playback.request(Cue::Lullaby, true), None);
        assert_eq!(playback.request(Cue::Chase, false), None);
        assert_eq!(
            playback.request(Cue::Lullaby, false),
            Some(PresentationCommand::StopCue(Cue::Lullaby))
        );
        assert!(!playback.is_playing(Cue::Lullaby));
    }
}
