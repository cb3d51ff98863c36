//! Interaction domain module
//!
//! Trigger collaborators ядра: генераторы, укрытия, escape zone.
//! Host пишет флаги близости/ввода, системы превращают их в session сигналы.

use bevy::prelude::*;

pub mod escape;
pub mod generator;
pub mod hiding;

pub use escape::detect_escape_zones;
pub use generator::{tick_generator_repairs, Generator, RepairPrompt};
pub use hiding::{apply_hide_toggles, HideToggleRequested, HidingSpot};

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<HideToggleRequested>();
    }
}
