//! Status message discipline (transient vs persistent)
//!
//! - transient: показываем, через `status_display_secs` чистим,
//!   но только если на экране всё ещё ровно этот текст
//! - persistent: отменяет pending clear, сам не исчезает

use bevy::prelude::*;

use crate::config::GameConfig;
use crate::presentation::{send_command, MessageKind, PresentationCommand};
use crate::scheduler::{Scheduler, TimerClass};

/// Resource: текущий status текст (как его видит игрок)
#[derive(Resource, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct StatusBoard {
    pub text: String,
    pub kind: Option<MessageKind>,
}

impl StatusBoard {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

pub fn show_transient(world: &mut World, text: impl Into<String>) {
    let text = text.into();
    let display_secs = world
        .get_resource::<GameConfig>()
        .map(|config| config.session.status_display_secs)
        .unwrap_or_default();

    write_status(world, text.clone(), MessageKind::Transient);

    world
        .resource_mut::<Scheduler>()
        .schedule_replacing(TimerClass::StatusMessage, display_secs, move |world: &mut World| {
            // Чистим только свой текст: его могли заменить
            if world.resource::<StatusBoard>().text == text {
                clear_status(world);
            }
        });
}

pub fn set_persistent(world: &mut World, text: impl Into<String>) {
    world.resource_mut::<Scheduler>().cancel_class(TimerClass::StatusMessage);
    write_status(world, text.into(), MessageKind::Persistent);
}

pub fn clear_status(world: &mut World) {
    {
        let mut board = world.resource_mut::<StatusBoard>();
        board.text.clear();
        board.kind = None;
    }
    send_command(world, PresentationCommand::ClearStatus);
}

fn write_status(world: &mut World, text: String, kind: MessageKind) {
    {
        let mut board = world.resource_mut::<StatusBoard>();
        board.text.clone_from(&text);
        board.kind = Some(kind);
    }
    send_command(world, PresentationCommand::ShowStatus { text, kind });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{run_scheduled_for, SimulationClock};

    const DT: f64 = 1.0 / 60.0;

    fn test_world() -> World {
        let mut world = World::new();
        world.init_resource::<Scheduler>();
        world.init_resource::<SimulationClock>();
        world.init_resource::<StatusBoard>();
        world.init_resource::<Events<PresentationCommand>>();
        world.insert_resource(GameConfig::default());
        world
    }

    fn run_secs(world: &mut World, secs: f64) {
        let ticks = (secs / DT).round() as usize;
        for _ in 0..ticks {
            run_scheduled_for(world, DT);
        }
    }

    #[test]
    fn test_transient_clears_after_display_window() {
        let mut world = test_world();
        show_transient(&mut world, "1/4 Generators Fixed");
        assert_eq!(world.resource::<StatusBoard>().text, "1/4 Generators Fixed");

        run_secs(&mut world, 3.0);

        assert!(world.resource::<StatusBoard>().is_empty());
    }

    #[test]
    fn test_newer_transient_survives_older_clear() {
        let mut world = test_world();
        show_transient(&mut world, "A");
        run_secs(&mut world, 1.0);
        show_transient(&mut world, "B");

        // Момент, когда должен был очиститься A
        run_secs(&mut world, 2.5);
        assert_eq!(world.resource::<StatusBoard>().text, "B");

        run_secs(&mut world, 1.0);
        assert!(world.resource::<StatusBoard>().is_empty());
    }

    #[test]
    fn test_persistent_cancels_pending_clear() {
        let mut world = test_world();
        show_transient(&mut world, "You Were Caught...");
        set_persistent(&mut world, "You Died.");

        run_secs(&mut world, 10.0);

        let board = world.resource::<StatusBoard>();
        assert_eq!(board.text, "You Died.");
        assert_eq!(board.kind, Some(MessageKind::Persistent));
    }

    #[test]
    fn test_status_changes_are_published() {
        let mut world = test_world();
        show_transient(&mut world, "Escape Gate Open!");

        let commands: Vec<_> = world
            .resource_mut::<Events<PresentationCommand>>()
            .drain()
            .collect();
        assert_eq!(
            commands,
            vec![PresentationCommand::ShowStatus {
                text: "Escape Gate Open!".to_string(),
                kind: MessageKind::Transient,
            }]
        );
    }
}
