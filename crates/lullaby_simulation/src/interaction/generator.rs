//! Generator repair contract
//!
//! Игрок рядом + держит "repair" → progress растёт на dt.
//! Иначе после `decay_delay_secs` простоя progress тает на `decay_rate × dt` (не ниже 0).
//! progress ≥ `repair_secs` → генератор починен, `SessionSignal::GeneratorFixed` ровно один раз.

use bevy::prelude::*;

use crate::config::{GameConfig, GeneratorConfig};
use crate::scheduler::SimulationClock;
use crate::session::SessionSignal;

/// Подсказка над генератором
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum RepairPrompt {
    /// Игрок не рядом
    #[default]
    Hidden,
    HoldToRepair,
    /// Секунд до конца (округление вверх)
    Repairing { secs_left: u32 },
    Fixed,
}

impl RepairPrompt {
    pub fn text(&self) -> String {
        match self {
            RepairPrompt::Hidden => String::new(),
            RepairPrompt::HoldToRepair => "Hold E to Repair".to_string(),
            RepairPrompt::Repairing { secs_left } => format!("Repairing: {}s", secs_left),
            RepairPrompt::Fixed => "Generator Fixed".to_string(),
        }
    }
}

/// Component: генератор
///
/// `player_nearby` / `repair_held` пишет host (trigger volume + input),
/// остальное: `tick_generator_repairs`.
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Generator {
    pub player_nearby: bool,
    pub repair_held: bool,
    pub progress: f32,
    pub repairing: bool,
    /// Секунды с момента, как перестали чинить
    pub idle_secs: f32,
    pub fixed: bool,
    pub prompt: RepairPrompt,
}

impl Generator {
    /// Один тик ремонта. `true`: генератор починен именно в этот тик.
    pub fn tick(&mut self, delta: f32, config: &GeneratorConfig) -> bool {
        if self.fixed {
            return false;
        }

        if self.player_nearby && self.repair_held {
            if !self.repairing {
                self.repairing = true;
                self.idle_secs = 0.0;
            }

            self.progress += delta;
            let secs_left = (config.repair_secs - self.progress).max(0.0).ceil() as u32;
            self.prompt = RepairPrompt::Repairing { secs_left };

            if self.progress >= config.repair_secs {
                self.fixed = true;
                self.repairing = false;
                self.prompt = RepairPrompt::Fixed;
                return true;
            }
        } else {
            self.prompt = if self.player_nearby {
                RepairPrompt::HoldToRepair
            } else {
                RepairPrompt::Hidden
            };

            if self.repairing {
                self.repairing = false;
                self.idle_secs = 0.0;
            }
        }

        if !self.repairing && self.progress > 0.0 {
            self.idle_secs += delta;

            if self.idle_secs >= config.decay_delay_secs {
                self.progress = (self.progress - delta * config.decay_rate).max(0.0);
            }
        }

        false
    }
}

/// System: ремонт генераторов (FixedUpdate)
pub fn tick_generator_repairs(
    clock: Res<SimulationClock>,
    time: Res<Time<Fixed>>,
    config: Res<GameConfig>,
    mut generators: Query<(Entity, &mut Generator)>,
    mut signals: EventWriter<SessionSignal>,
) {
    if clock.frozen {
        return;
    }

    let delta = time.delta_secs();

    for (entity, mut generator) in generators.iter_mut() {
        if generator.tick(delta, &config.generator) {
            crate::logger::log(&format!("🔧 {:?} repaired", entity));
            signals.write(SessionSignal::GeneratorFixed);
        }
    }
}
