//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: игрок и призрак (Player, PlayerStatus, Antagonist)
//! - world: геометрия арены и триггеры (ArenaBounds, EscapeGate, EscapeZone)
//!
//! AI-компоненты (PursuitBrain, PursuitConfig) живут в `ai::components`,
//! навигация (NavAgent): в `navigation`.

pub mod actor;
pub mod world;

// Re-exports для удобного импорта
pub use actor::*;
pub use world::*;
