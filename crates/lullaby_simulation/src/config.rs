//! GameConfig: load-time конфигурация сессии
//!
//! Все значения числовые, с дефолтами оригинальной игры.
//! Загружается один раз при старте (JSON), дальше только читается.
//! Отсутствующие поля → дефолт (`#[serde(default)]`).

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ошибки загрузки конфигурации (единственная fallible операция в crate)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Корневая конфигурация (Resource)
#[derive(Resource, Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub session: SessionConfig,
    pub arena: ArenaConfig,
    pub respawn: RespawnConfig,
    pub pursuit: PursuitSettings,
    pub audio: AudioConfig,
    pub generator: GeneratorConfig,
    pub simulation: SimulationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub total_generators: u32,
    pub max_deaths: u32,
    /// Сколько висит transient сообщение (секунды)
    pub status_display_secs: f32,
    /// Пауза между поимкой и respawn (экран затемнён)
    pub respawn_delay_secs: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            total_generators: 4,
            max_deaths: 3,
            status_display_secs: 3.0,
            respawn_delay_secs: 3.0,
        }
    }
}

/// Прямоугольник арены (XZ) + высота respawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
    pub respawn_elevation: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            min_x: -20.0,
            max_x: 20.0,
            min_z: -20.0,
            max_z: 20.0,
            respawn_elevation: 7.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RespawnConfig {
    /// Минимальная дистанция от призрака до точки respawn
    pub min_separation: f32,
    pub max_attempts: u32,
}

impl Default for RespawnConfig {
    fn default() -> Self {
        Self {
            min_separation: 30.0,
            max_attempts: 50,
        }
    }
}

/// Параметры преследования (vision + таймеры + скорости)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PursuitSettings {
    pub sight_range: f32,
    /// Полный угол обзора (градусы)
    pub field_of_view: f32,
    pub chase_memory_secs: f32,
    pub search_duration_secs: f32,
    pub patrol_speed: f32,
    pub chase_speed: f32,
    pub catch_distance: f32,
    pub patrol_radius: f32,
    pub search_jitter: f32,
    /// remaining distance ниже порога → destination "съеден"
    pub arrival_threshold: f32,
}

impl Default for PursuitSettings {
    fn default() -> Self {
        Self {
            sight_range: 20.0,
            field_of_view: 90.0,
            chase_memory_secs: 8.0,
            search_duration_secs: 10.0,
            patrol_speed: 4.0,
            chase_speed: 8.0,
            catch_distance: 2.0,
            patrol_radius: 50.0,
            search_jitter: 10.0,
            arrival_threshold: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub lullaby_range: f32,
    pub chase_range: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            lullaby_range: 15.0,
            chase_range: 25.0,
        }
    }
}

/// Контракт ремонта генератора (timer + decay)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub repair_secs: f32,
    /// Сколько простоя до начала decay
    pub decay_delay_secs: f32,
    /// Скорость decay (progress/сек)
    pub decay_rate: f32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            repair_secs: 20.0,
            decay_delay_secs: 5.0,
            decay_rate: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub tick_hz: f64,
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_hz: 60.0,
            seed: 42,
        }
    }
}

impl GameConfig {
    /// Парсит JSON и валидирует
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let session = &self.session;
        ensure(session.total_generators > 0, "session.total_generators", "must be at least 1")?;
        ensure(session.max_deaths > 0, "session.max_deaths", "must be at least 1")?;
        ensure_non_negative(session.status_display_secs, "session.status_display_secs")?;
        ensure_non_negative(session.respawn_delay_secs, "session.respawn_delay_secs")?;

        let arena = &self.arena;
        ensure(arena.min_x <= arena.max_x, "arena.min_x", "must not exceed arena.max_x")?;
        ensure(arena.min_z <= arena.max_z, "arena.min_z", "must not exceed arena.max_z")?;
        ensure(arena.respawn_elevation.is_finite(), "arena.respawn_elevation", "must be finite")?;

        ensure_non_negative(self.respawn.min_separation, "respawn.min_separation")?;
        ensure(self.respawn.max_attempts > 0, "respawn.max_attempts", "must be at least 1")?;

        let pursuit = &self.pursuit;
        ensure_positive(pursuit.sight_range, "pursuit.sight_range")?;
        ensure(
            pursuit.field_of_view > 0.0 && pursuit.field_of_view <= 360.0,
            "pursuit.field_of_view",
            "must be in (0, 360] degrees",
        )?;
        ensure_non_negative(pursuit.chase_memory_secs, "pursuit.chase_memory_secs")?;
        ensure_non_negative(pursuit.search_duration_secs, "pursuit.search_duration_secs")?;
        ensure_positive(pursuit.patrol_speed, "pursuit.patrol_speed")?;
        ensure_positive(pursuit.chase_speed, "pursuit.chase_speed")?;
        ensure_non_negative(pursuit.catch_distance, "pursuit.catch_distance")?;
        ensure_positive(pursuit.patrol_radius, "pursuit.patrol_radius")?;
        ensure_non_negative(pursuit.search_jitter, "pursuit.search_jitter")?;
        ensure_non_negative(pursuit.arrival_threshold, "pursuit.arrival_threshold")?;

        ensure_positive(self.generator.repair_secs, "generator.repair_secs")?;
        ensure_non_negative(self.generator.decay_delay_secs, "generator.decay_delay_secs")?;
        ensure_non_negative(self.generator.decay_rate, "generator.decay_rate")?;

        ensure_positive(self.simulation.tick_hz as f32, "simulation.tick_hz")?;

        Ok(())
    }
}

fn ensure(condition: bool, field: &'static str, reason: &str) -> Result<(), ConfigError> {
    if condition {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: reason.to_string(),
        })
    }
}

fn ensure_positive(value: f32, field: &'static str) -> Result<(), ConfigError> {
    ensure(value.is_finite() && value > 0.0, field, "must be a positive number")
}

fn ensure_non_negative(value: f32, field: &'static str) -> Result<(), ConfigError> {
    ensure(value.is_finite() && value >= 0.0, field, "must be a non-negative number")
}
