//! Pickleball Park headless host
//!
//! Runs the rally for a fixed number of frames and prints the final scene
//! snapshot as JSON. Pass a settings JSON path as the first argument.

use pickleball_park::consts::FRAME_DT;
use pickleball_park::sim::RallyEvent;
use pickleball_park::{RallySimulator, Settings};

/// One minute at the ~60 Hz frame cadence
const DEMO_TICKS: u32 = 60 * 60;

fn main() {
    env_logger::init();
    log::info!("Pickleball Park (headless) starting...");

    let settings = std::env::args()
        .nth(1)
        .map(Settings::load)
        .unwrap_or_default();
    log::info!("Simulation seed: {}", settings.seed);

    let mut sim = RallySimulator::from_settings(&settings);
    if sim.is_paused() {
        log::warn!("Settings start the simulation paused; resuming for the headless run");
        sim.set_paused(false);
    }

    for _ in 0..DEMO_TICKS {
        sim.tick();
        for event in &sim.events {
            match event {
                RallyEvent::PaddleHit { side, rally_count } => {
                    log::info!("Player {} hit! Rally: {}", side.number(), rally_count)
                }
                RallyEvent::EmergencyReset { server } => {
                    log::warn!("Emergency reset, player {} serves", server.number())
                }
                _ => {}
            }
        }
    }

    log::info!(
        "Finished {} ticks ({:.1}s simulated): rally {}, {} emergency resets",
        sim.time_ticks,
        sim.time_ticks as f32 * FRAME_DT,
        sim.rally.rally_count,
        sim.rally.emergency_resets
    );

    match serde_json::to_string_pretty(&sim.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Could not serialize snapshot: {}", e),
    }
}
