//! Headless demo driver
//!
//! Runs a scripted classic-mode session at a fixed 60 Hz, records the best
//! score into the player profile, and prints the final snapshot as JSON.
//! Real frontends drive [`Simulation`] the same way, one tick per frame.

use std::path::PathBuf;

use serpent_arena::sim::{Direction, GamePhase, Simulation, TickInput};
use serpent_arena::{PlayerProfile, SimConfig};

const PROFILE_FILE: &str = "serpent-profile.json";

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xC0FFEE);
    log::info!("demo run, seed {seed}");

    let profile_path = PathBuf::from(PROFILE_FILE);
    let mut profile = PlayerProfile::load(&profile_path);

    let mut cfg = SimConfig::classic();
    cfg.snake_color = profile.snake_color.clone();
    let mut sim = Simulation::classic(cfg, seed);
    sim.world.high_score = profile.high_score_classic;

    // Sweep the arena in a repeating box pattern until something ends the run
    let script = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];
    let dt = 1.0 / 60.0;
    let mut frame = 0u32;
    while sim.world.phase != GamePhase::GameOver && frame < 60 * 120 {
        let direction = (frame % 90 == 0).then(|| script[(frame / 90) as usize % script.len()]);
        let input = TickInput {
            direction,
            ..Default::default()
        };
        sim.tick(&input, dt);
        frame += 1;
    }

    if profile.record_classic(sim.world.high_score) {
        if let Err(err) = profile.save(&profile_path) {
            log::warn!("could not save profile: {err}");
        }
    }

    match serde_json::to_string_pretty(&sim.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("snapshot encoding failed: {err}"),
    }
}
