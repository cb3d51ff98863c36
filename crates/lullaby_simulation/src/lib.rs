//! LULLABY Simulation Core
//!
//! ECS-симуляция на Bevy 0.16 (headless): призрак преследует игрока,
//! игрок чинит генераторы и бежит через ворота.
//!
//! HYBRID ARCHITECTURE:
//! - ECS = правила (pursuit FSM, сессия, respawn, таймеры)
//! - Движок = физика, рендер, NavMesh, звук (через traits и `PresentationCommand`)
//!
//! FixedUpdate (один chained set, порядок = контракт тика):
//! 1. advance_navigation_agents: агенты двигаются
//! 2. tick_generator_repairs: ремонт → GeneratorFixed
//! 3. apply_hide_toggles: вход/выход из укрытия
//! 4. ai_pursuit_tick: perception → transition → catch
//! 5. ai_audio_cues: lullaby/chase
//! 6. detect_escape_zones: PlayerEscaped
//! 7. process_session_signals: SessionCoordinator (exclusive)
//! 8. run_scheduled_actions: отложенные continuations (exclusive, последним)

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod components;
pub mod config;
pub mod interaction;
pub mod logger;
pub mod navigation;
pub mod perception;
pub mod presentation;
pub mod scheduler;
pub mod session;
pub mod spawn;

// Re-export базовых типов для удобства
pub use ai::{PursuitBrain, PursuitConfig, PursuitState};
pub use components::*;
pub use config::{ConfigError, GameConfig};
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel, LogPrinter};
pub use navigation::{NavAgent, NavigationAgent, StraightLineAgent};
pub use perception::{ObstacleField, Occlusion, OcclusionQuery};
pub use presentation::{Cue, MessageKind, PresentationCommand, RespawnPlacement};
pub use scheduler::{Scheduler, SimulationClock, TimerClass, TimerHandle};
pub use session::{SessionOutcome, SessionSignal, SessionState, StatusBoard};

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// `GameConfig` и `DeterministicRng`, вставленные до плагина, не перезаписываются.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<GameConfig>()
            .cloned()
            .unwrap_or_default();

        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(config.simulation.seed));
        }

        app
            // Fixed timestep для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(config.simulation.tick_hz))
            .insert_resource(SessionState::from_config(&config.session))
            .insert_resource(ArenaBounds::from_config(&config.arena))
            .init_resource::<EscapeGate>()
            .insert_resource(config)
            // Подсистемы
            .add_plugins((
                presentation::PresentationPlugin,
                scheduler::SchedulerPlugin,
                session::SessionPlugin,
                interaction::InteractionPlugin,
            ))
            .add_systems(
                FixedUpdate,
                (
                    navigation::advance_navigation_agents,
                    interaction::tick_generator_repairs,
                    interaction::apply_hide_toggles,
                    ai::ai_pursuit_tick,
                    ai::ai_audio_cues,
                    interaction::detect_escape_zones,
                    session::process_session_signals,
                    scheduler::run_scheduled_actions,
                )
                    .chain(), // Последовательное выполнение для детерминизма
            );
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт headless App с дефолтной конфигурацией и заданным seed
pub fn create_headless_app(seed: u64) -> App {
    let mut config = GameConfig::default();
    config.simulation.seed = seed;
    create_headless_app_with_config(config)
}

/// Создаёт headless App: MinimalPlugins + SimulationPlugin
pub fn create_headless_app_with_config(config: GameConfig) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(config)
        .add_plugins(SimulationPlugin);

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
