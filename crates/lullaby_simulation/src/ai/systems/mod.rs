//! AI systems (pursuit tick + audio side effects)

pub mod audio;
pub mod pursuit;

// Re-export all systems
pub use audio::*;
pub use pursuit::*;
