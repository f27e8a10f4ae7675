//! Geometry Shooter headless entry point
//!
//! Runs the simulation under the demo autopilot at a fixed frame rate and
//! logs the outcome. A renderer and input layer would drive [`Session`]
//! the same way, swapping the autopilot for real input.

use std::path::PathBuf;

use geometry_shooter::consts::SIM_DT;
use geometry_shooter::sim::GamePhase;
use geometry_shooter::{FileStore, Session, Settings, autopilot};

/// Stop after this many simulated minutes even if the pilot survives
const MAX_MINUTES: u32 = 10;

fn main() {
    env_logger::init();
    log::info!("Geometry Shooter (headless) starting...");

    let settings_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("settings.json"));
    let settings = Settings::load(&settings_path);
    let store = FileStore::new(settings.high_score_path.clone());
    let mut session = Session::new(&settings, store);

    let max_ticks = MAX_MINUTES * 60 * 60;
    for _ in 0..max_ticks {
        let on_menu = session.state().phase == GamePhase::Menu;
        let mut input = autopilot::drive(session.state(), on_menu);
        session.advance(SIM_DT, &mut input);

        if session.quit_requested() || session.state().phase == GamePhase::GameOver {
            break;
        }
    }

    let hud = session.view().hud;
    match serde_json::to_string(&hud) {
        Ok(json) => log::info!("Final HUD: {}", json),
        Err(e) => log::warn!("Could not serialize HUD: {}", e),
    }
    println!(
        "seed {} | score {} | wave {} | survived {:.1}s | best {}",
        session.seed(),
        hud.score,
        hud.wave,
        hud.survival_time,
        hud.high_score
    );
}
