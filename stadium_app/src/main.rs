//! Stadium scene viewer
//!
//! Loads `resources/stadium.toml` when present and opens the pitch scene.
//! F1 toggles the debug overlay, Escape quits.

use pitch_engine::config::{AppConfig, Config};
use pitch_engine::foundation::logging;
use pitch_engine::Engine;

const CONFIG_PATH: &str = "resources/stadium.toml";

fn main() {
    logging::init();
    log::info!("Starting stadium viewer...");

    let config = AppConfig::load_or_default(CONFIG_PATH);
    if let Err(e) = Engine::new(config).run() {
        log::error!("Stadium viewer failed: {}", e);
        std::process::exit(1);
    }
}
