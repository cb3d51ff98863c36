//! Headless симуляция LULLABY
//!
//! Seeded сессия без движка: прямолинейный призрак, AABB препятствия,
//! игрок стоит на месте и чинит генератор. Печатает исход.
//!
//! Usage: lullaby_simulation [config.json] [ticks]

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use lullaby_simulation::spawn::{spawn_antagonist, spawn_escape_zone, spawn_generator, spawn_player};
use lullaby_simulation::{
    create_headless_app_with_config, log_error, log_info, ArenaBounds, GameConfig, ObstacleField, Occlusion,
    SessionState, StatusBoard, StraightLineAgent,
};

fn main() {
    let mut args = std::env::args().skip(1);

    let config = match args.next() {
        Some(path) => match GameConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Failed to load config {}: {}", path, err);
                std::process::exit(1);
            }
        },
        None => GameConfig::default(),
    };
    let ticks: usize = args.next().and_then(|value| value.parse().ok()).unwrap_or(3600);

    println!(
        "Starting LULLABY headless simulation (seed: {}, ticks: {})",
        config.simulation.seed, ticks
    );

    let step = Duration::from_secs_f64(1.0 / config.simulation.tick_hz);
    let mut app = create_headless_app_with_config(config);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(step));

    setup_arena(app.world_mut());

    for tick in 0..ticks {
        app.update();

        if tick % 600 == 0 {
            let session = app.world().resource::<SessionState>();
            let status = app.world().resource::<StatusBoard>();
            log_info(&format!(
                "Tick {}: generators {}/{}, deaths {}/{}, status \"{}\"",
                tick,
                session.generators_fixed,
                session.total_generators,
                session.deaths,
                session.max_deaths,
                status.text
            ));
        }

        if app.world().resource::<SessionState>().is_terminal() {
            break;
        }
    }

    let session = app.world().resource::<SessionState>();
    match session.outcome {
        lullaby_simulation::SessionOutcome::InProgress => {
            println!("Simulation complete: session still in progress")
        }
        outcome => println!("Simulation complete: {:?}", outcome),
    }
}

/// Арена по умолчанию: пара колонн, призрак в углу, игрок у генератора
fn setup_arena(world: &mut World) {
    let bounds = *world.resource::<ArenaBounds>();
    let elevation = bounds.respawn_elevation;

    let mut obstacles = ObstacleField::default();
    obstacles.add_box(Vec3::new(0.0, elevation, 5.0), Vec3::new(2.0, 3.0, 2.0));
    obstacles.add_box(Vec3::new(-8.0, elevation, -6.0), Vec3::new(1.5, 3.0, 4.0));
    world.insert_resource(Occlusion::new(obstacles));

    spawn_player(world, Vec3::new(10.0, elevation, 10.0));

    let ghost = StraightLineAgent::new(Vec3::new(-15.0, elevation, -15.0))
        .with_forward(Vec3::new(1.0, 0.0, 1.0))
        .with_walkable(bounds);
    spawn_antagonist(world, ghost);

    let generator = spawn_generator(world, Vec3::new(11.0, elevation, 10.0));
    if let Some(mut generator) = world.get_mut::<lullaby_simulation::interaction::Generator>(generator) {
        generator.player_nearby = true;
        generator.repair_held = true;
    } else {
        log_error("Generator spawn failed");
    }

    spawn_escape_zone(world, Vec3::new(0.0, elevation, 19.0), Vec3::new(2.0, 2.0, 1.0));
}
