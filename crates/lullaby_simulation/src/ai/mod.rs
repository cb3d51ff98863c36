//! AI decision-making module
//!
//! Pursuit FSM призрака: tagged-state enum + чистая transition function.
//! Системы только собирают входы (perception, navigation) и применяют команды.

pub mod components;
pub mod systems;
pub mod transitions;

// Re-export основных типов
pub use components::{PursuitBrain, PursuitConfig, PursuitState};
pub use systems::{ai_audio_cues, ai_pursuit_tick};
pub use transitions::{transition, PursuitCommand, PursuitInput};
