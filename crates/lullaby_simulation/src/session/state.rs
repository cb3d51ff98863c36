//! SessionState: счётчики сессии и terminal outcome
//!
//! Только данные + чистые переходы. Side effects (сообщения, blackout,
//! freeze, respawn) делает coordinator по возвращённому outcome.

use bevy::prelude::*;

use crate::config::SessionConfig;
use crate::presentation::RespawnPlacement;

/// Итог сессии
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum SessionOutcome {
    #[default]
    InProgress,
    /// deaths == max_deaths
    Lost,
    /// Игрок дошёл до escape zone
    Won,
}

/// Что сделать после OnGeneratorFixed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorProgress {
    /// Terminal или уже все починены
    Ignored,
    Fixed { fixed: u32, total: u32 },
    /// Счётчик впервые достиг total → открыть ворота
    AllFixed,
}

/// Что сделать после OnPlayerCaught
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatchOutcome {
    /// Respawn уже идёт или сессия terminal
    Ignored,
    /// Запустить respawn sequence
    Respawn { deaths: u32 },
    /// Последняя смерть → проигрыш
    Died,
}

/// Resource: состояние сессии (владелец: SessionCoordinator)
#[derive(Resource, Debug, Clone, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct SessionState {
    pub generators_fixed: u32,
    pub total_generators: u32,
    pub deaths: u32,
    pub max_deaths: u32,
    pub outcome: SessionOutcome,
    /// Respawn sequence в процессе (catch игнорируется)
    pub respawning: bool,
    /// Последний respawn (телеметрия)
    pub last_respawn: Option<RespawnPlacement>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::from_config(&SessionConfig::default())
    }
}

impl SessionState {
    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            generators_fixed: 0,
            total_generators: config.total_generators,
            deaths: 0,
            max_deaths: config.max_deaths,
            outcome: SessionOutcome::InProgress,
            respawning: false,
            last_respawn: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome != SessionOutcome::InProgress
    }

    pub fn all_generators_fixed(&self) -> bool {
        self.generators_fixed >= self.total_generators
    }

    /// "{fixed}/{total} Generators Fixed"
    pub fn generator_status_text(&self) -> String {
        format!("{}/{} Generators Fixed", self.generators_fixed, self.total_generators)
    }

    pub fn record_generator_fixed(&mut self) -> GeneratorProgress {
        if self.is_terminal() || self.all_generators_fixed() {
            return GeneratorProgress::Ignored;
        }

        self.generators_fixed += 1;

        if self.all_generators_fixed() {
            GeneratorProgress::AllFixed
        } else {
            GeneratorProgress::Fixed {
                fixed: self.generators_fixed,
                total: self.total_generators,
            }
        }
    }

    pub fn record_catch(&mut self) -> CatchOutcome {
        if self.respawning || self.is_terminal() {
            return CatchOutcome::Ignored;
        }

        self.deaths += 1;

        if self.deaths >= self.max_deaths {
            self.outcome = SessionOutcome::Lost;
            CatchOutcome::Died
        } else {
            self.respawning = true;
            CatchOutcome::Respawn { deaths: self.deaths }
        }
    }

    /// true → побег засчитан (сессия выиграна)
    pub fn record_escape(&mut self) -> bool {
        if self.is_terminal() {
            return false;
        }

        self.outcome = SessionOutcome::Won;
        true
    }

    /// Второй шаг respawn sequence завершён
    pub fn finish_respawn(&mut self, placement: RespawnPlacement) {
        self.respawning = false;
        self.last_respawn = Some(placement);
    }
}
