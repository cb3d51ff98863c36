//! Integration тесты сессии: генераторы, смерти, respawn, побег, укрытия
//!
//! Headless App + ручной fixed step (1/60 s на update).

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use lullaby_simulation::interaction::{Generator, HideToggleRequested, HidingSpot};
use lullaby_simulation::presentation::ScreenOverlay;
use lullaby_simulation::session::{on_generator_fixed, on_player_caught};
use lullaby_simulation::spawn::{spawn_antagonist, spawn_escape_zone, spawn_generator, spawn_hiding_spot, spawn_player};
use lullaby_simulation::{
    create_headless_app_with_config, Antagonist, ArenaBounds, EscapeGate, GameConfig, MessageKind, PlayerStatus,
    PresentationCommand, PursuitBrain, SessionOutcome, SessionSignal, SessionState, SimulationClock, StatusBoard,
    StraightLineAgent,
};

const TICKS_PER_SECOND: usize = 60;

struct Session {
    app: App,
    player: Entity,
    ghost: Entity,
}

/// Все presentation команды, которые видел хост
#[derive(Resource, Default)]
struct SentCommands(Vec<PresentationCommand>);

fn collect_commands(mut events: EventReader<PresentationCommand>, mut sent: ResMut<SentCommands>) {
    sent.0.extend(events.read().cloned());
}

/// Headless App без акторов: их спавнит сам тест
fn bare_app(config: GameConfig) -> App {
    let mut app = create_headless_app_with_config(config);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
        1.0 / TICKS_PER_SECOND as f64,
    )))
    .init_resource::<SentCommands>()
    .add_systems(Last, collect_commands);
    app
}

/// Сессия без Occlusion: призрак слепой, сам никого не ловит
fn session(config: GameConfig) -> Session {
    let mut app = bare_app(config);

    let bounds = *app.world().resource::<ArenaBounds>();
    let player = spawn_player(app.world_mut(), Vec3::new(10.0, 0.0, 10.0));
    let ghost = spawn_antagonist(
        app.world_mut(),
        StraightLineAgent::new(Vec3::new(-15.0, 0.0, -15.0)).with_walkable(bounds),
    );

    // Startup: "0/N Generators Fixed"
    app.update();

    Session { app, player, ghost }
}

fn run_secs(app: &mut App, secs: f32) {
    let ticks = (secs * TICKS_PER_SECOND as f32).ceil() as usize;
    for _ in 0..ticks {
        app.update();
    }
}

fn send(app: &mut App, signal: SessionSignal) {
    app.world_mut().send_event(signal);
    app.update();
}

fn status_text(app: &App) -> String {
    app.world().resource::<StatusBoard>().text.clone()
}

fn session_state(app: &App) -> SessionState {
    app.world().resource::<SessionState>().clone()
}

fn ghost_enabled(session: &Session) -> bool {
    session.app.world().get::<Antagonist>(session.ghost).map(|ghost| ghost.enabled).unwrap_or(false)
}

fn player_status(session: &Session) -> PlayerStatus {
    *session.app.world().get::<PlayerStatus>(session.player).unwrap()
}

#[test]
fn test_start_shows_generator_count() {
    let session = session(GameConfig::default());

    assert_eq!(status_text(&session.app), "0/4 Generators Fixed");
    assert_eq!(
        session.app.world().resource::<StatusBoard>().kind,
        Some(MessageKind::Transient)
    );
}

#[test]
fn test_start_message_clears_after_display_window() {
    let mut session = session(GameConfig::default());

    run_secs(&mut session.app, 3.5);

    assert_eq!(status_text(&session.app), "");
}

#[test]
fn test_generators_open_gate_on_last_fix() {
    let mut session = session(GameConfig::default());

    for _ in 0..3 {
        send(&mut session.app, SessionSignal::GeneratorFixed);
    }
    assert_eq!(status_text(&session.app), "3/4 Generators Fixed");
    assert!(!session.app.world().resource::<EscapeGate>().open);

    send(&mut session.app, SessionSignal::GeneratorFixed);
    assert_eq!(status_text(&session.app), "Escape Gate Open!");
    assert!(session.app.world().resource::<EscapeGate>().open);

    // Лишний сигнал: счётчик не растёт
    send(&mut session.app, SessionSignal::GeneratorFixed);
    assert_eq!(session_state(&session.app).generators_fixed, 4);
}

#[test]
fn test_catch_starts_respawn_sequence() {
    let mut session = session(GameConfig::default());

    send(&mut session.app, SessionSignal::PlayerCaught);

    let state = session_state(&session.app);
    assert_eq!(state.deaths, 1);
    assert!(state.respawning);
    assert_eq!(status_text(&session.app), "You Were Caught...");
    assert!(session.app.world().resource::<ScreenOverlay>().blackout);
    assert!(!ghost_enabled(&session));
    assert!(!player_status(&session).active);

    // Catch во время respawn игнорируется
    send(&mut session.app, SessionSignal::PlayerCaught);
    assert_eq!(session_state(&session.app).deaths, 1);
}

#[test]
fn test_respawn_completes_after_delay() {
    let mut session = session(GameConfig::default());
    send(&mut session.app, SessionSignal::PlayerCaught);

    run_secs(&mut session.app, 3.5);

    let state = session_state(&session.app);
    assert!(!state.respawning);
    assert!(player_status(&session).active);
    assert!(ghost_enabled(&session));
    assert!(!session.app.world().resource::<ScreenOverlay>().blackout);
    assert_eq!(status_text(&session.app), "0/4 Generators Fixed");

    let placement = state.last_respawn.expect("respawn placement recorded");
    let bounds = *session.app.world().resource::<ArenaBounds>();
    assert!(bounds.contains_xz(placement.position));
    assert_eq!(placement.position.y, bounds.respawn_elevation);
    assert!(placement.attempts >= 1 && placement.attempts <= 50);

    let player_position = session.app.world().get::<Transform>(session.player).unwrap().translation;
    assert_eq!(player_position, placement.position);

    let sent = &session.app.world().resource::<SentCommands>().0;
    assert!(sent.contains(&PresentationCommand::RespawnPlaced(placement)));
}

#[test]
fn test_three_catches_lose_session() {
    let mut session = session(GameConfig::default());

    for _ in 0..2 {
        send(&mut session.app, SessionSignal::PlayerCaught);
        run_secs(&mut session.app, 3.5);
    }
    send(&mut session.app, SessionSignal::PlayerCaught);

    let state = session_state(&session.app);
    assert_eq!(state.deaths, 3);
    assert_eq!(state.outcome, SessionOutcome::Lost);
    assert_eq!(status_text(&session.app), "You Died.");
    assert!(session.app.world().resource::<SimulationClock>().frozen);
    assert!(session.app.world().resource::<ScreenOverlay>().blackout);
    assert!(!ghost_enabled(&session));
    let brain = *session.app.world().get::<PursuitBrain>(session.ghost).unwrap();

    // Дальше ничего не меняется: ни смерти, ни генераторы, ни respawn, ни призрак
    on_player_caught(session.app.world_mut());
    on_generator_fixed(session.app.world_mut());
    run_secs(&mut session.app, 5.0);

    assert_eq!(*session.app.world().get::<PursuitBrain>(session.ghost).unwrap(), brain);

    let state = session_state(&session.app);
    assert_eq!(state.deaths, 3);
    assert_eq!(state.generators_fixed, 0);
    assert!(!state.respawning);
    assert!(!ghost_enabled(&session));
    assert!(!player_status(&session).active);
    assert_eq!(status_text(&session.app), "You Died.");
}

#[test]
fn test_escape_wins_session() {
    let mut session = session(GameConfig::default());

    send(&mut session.app, SessionSignal::PlayerEscaped);

    let state = session_state(&session.app);
    assert_eq!(state.outcome, SessionOutcome::Won);
    assert_eq!(status_text(&session.app), "You Escaped!");
    assert!(session.app.world().resource::<SimulationClock>().frozen);
    assert!(!ghost_enabled(&session));
    assert!(!player_status(&session).active);

    on_player_caught(session.app.world_mut());
    assert_eq!(session_state(&session.app).deaths, 0);
    assert_eq!(session_state(&session.app).outcome, SessionOutcome::Won);
}

#[test]
fn test_escape_zone_needs_open_gate() {
    let mut session = session(GameConfig::default());
    spawn_escape_zone(session.app.world_mut(), Vec3::new(0.0, 0.0, 19.0), Vec3::new(2.0, 2.0, 1.0));

    session.app.world_mut().get_mut::<Transform>(session.player).unwrap().translation = Vec3::new(0.5, 0.0, 19.0);
    run_secs(&mut session.app, 0.5);
    assert_eq!(session_state(&session.app).outcome, SessionOutcome::InProgress);

    for _ in 0..4 {
        send(&mut session.app, SessionSignal::GeneratorFixed);
    }
    run_secs(&mut session.app, 0.1);

    assert_eq!(session_state(&session.app).outcome, SessionOutcome::Won);
    assert_eq!(status_text(&session.app), "You Escaped!");
}

#[test]
fn test_generator_repair_fires_signal_once() {
    let mut config = GameConfig::default();
    config.generator.repair_secs = 2.0;
    let mut session = session(config);

    let generator = spawn_generator(session.app.world_mut(), Vec3::new(11.0, 0.0, 10.0));
    {
        let mut state = session.app.world_mut().get_mut::<Generator>(generator).unwrap();
        state.player_nearby = true;
        state.repair_held = true;
    }

    run_secs(&mut session.app, 2.5);

    assert!(session.app.world().get::<Generator>(generator).unwrap().fixed);
    assert_eq!(session_state(&session.app).generators_fixed, 1);
    assert_eq!(status_text(&session.app), "1/4 Generators Fixed");

    run_secs(&mut session.app, 2.0);
    assert_eq!(session_state(&session.app).generators_fixed, 1);
}

#[test]
fn test_hiding_toggle_in_range() {
    let mut session = session(GameConfig::default());
    let spot = spawn_hiding_spot(session.app.world_mut(), Vec3::new(10.0, 0.0, 11.0));

    // Вне укрытия: игнор
    send_toggle(&mut session.app);
    assert!(!player_status(&session).hidden);

    session.app.world_mut().get_mut::<HidingSpot>(spot).unwrap().player_in_range = true;

    send_toggle(&mut session.app);
    let status = player_status(&session);
    assert!(status.hidden);
    assert!(!status.active);
    let overlay = *session.app.world().resource::<ScreenOverlay>();
    assert!(overlay.blackout && overlay.hiding_text);

    send_toggle(&mut session.app);
    let status = player_status(&session);
    assert!(!status.hidden);
    assert!(status.active);
    let overlay = *session.app.world().resource::<ScreenOverlay>();
    assert!(!overlay.blackout && !overlay.hiding_text);
}

fn send_toggle(app: &mut App) {
    app.world_mut().send_event(HideToggleRequested);
    app.update();
}

#[test]
fn test_respawn_completes_without_player() {
    let mut app = bare_app(GameConfig::default());
    let bounds = *app.world().resource::<ArenaBounds>();
    let ghost = spawn_antagonist(
        app.world_mut(),
        StraightLineAgent::new(Vec3::new(-15.0, 0.0, -15.0)).with_walkable(bounds),
    );
    app.update();

    send(&mut app, SessionSignal::PlayerCaught);
    assert!(session_state(&app).respawning);

    run_secs(&mut app, 3.5);

    let state = session_state(&app);
    assert_eq!(state.deaths, 1);
    assert!(!state.respawning);
    let placement = state.last_respawn.expect("respawn placement recorded");
    assert!(bounds.contains_xz(placement.position));
    assert!(app.world().get::<Antagonist>(ghost).unwrap().enabled);
    assert!(!app.world().resource::<ScreenOverlay>().blackout);
}

#[test]
fn test_session_without_ghost_still_counts_generators() {
    let mut app = bare_app(GameConfig::default());
    let player = spawn_player(app.world_mut(), Vec3::new(10.0, 0.0, 10.0));
    app.update();

    send(&mut app, SessionSignal::GeneratorFixed);
    send(&mut app, SessionSignal::GeneratorFixed);
    assert_eq!(session_state(&app).generators_fixed, 2);
    assert_eq!(status_text(&app), "2/4 Generators Fixed");

    // Нет призрака: respawn отталкивается от начала координат
    send(&mut app, SessionSignal::PlayerCaught);
    run_secs(&mut app, 3.5);

    let state = session_state(&app);
    assert!(!state.respawning);
    assert!(state.last_respawn.is_some());
    assert!(app.world().get::<PlayerStatus>(player).unwrap().active);
    assert_eq!(status_text(&app), "2/4 Generators Fixed");
}
