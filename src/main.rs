//! Flapper entry point
//!
//! Runs the game in the current terminal on the default world. Set
//! `RUST_LOG=debug` and redirect stderr to a file to watch spawns and scoring.

use std::io;
use std::time::{SystemTime, UNIX_EPOCH};

use flapper::WorldConfig;
use flapper::platform;
use flapper::sim::GameState;

fn main() -> io::Result<()> {
    env_logger::init();
    log::info!("Flapper starting...");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);

    let mut state = GameState::new(WorldConfig::default(), seed)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    log::info!("Game initialized with seed: {}", seed);

    platform::run(&mut state)
}
