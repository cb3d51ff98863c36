//! Tests for pursuit FSM components.

#[cfg(test)]
mod tests {
    use super::super::fsm::{PursuitBrain, PursuitConfig, PursuitState};

    #[test]
    fn test_brain_default() {
        let brain = PursuitBrain::default();
        assert_eq!(brain.state, PursuitState::Patrolling);
        assert!(brain.last_seen.is_none());
        assert!(brain.time_since_seen.is_infinite());
    }

    #[test]
    fn test_pursuit_config_default() {
        let config = PursuitConfig::default();
        assert_eq!(config.sight_range, 20.0);
        assert_eq!(config.field_of_view, 90.0);
        assert_eq!(config.patrol_speed, 4.0);
        assert_eq!(config.chase_speed, 8.0);
        assert_eq!(config.catch_distance, 2.0);
    }

    #[test]
    fn test_same_variant_ignores_timers() {
        let a = PursuitState::Searching { elapsed: 0.0, needs_destination: true };
        let b = PursuitState::Searching { elapsed: 4.2, needs_destination: false };

        assert!(a.same_variant(&b));
        assert!(!a.same_variant(&PursuitState::Chasing));
        assert_eq!(b.name(), "Searching");
    }
}
