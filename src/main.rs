use std::fs::File;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use simplelog::WriteLogger;

use sense_snake::config::Config;
use sense_snake::game::{GameLoop, GameState};
use sense_snake::term::{Keyboard, TermManager};

fn main() -> Result<()> {
    let config = Config::parse();

    // The terminal belongs to the game, so logs go to a file
    let log_file = File::create(&config.log_file)
        .with_context(|| format!("failed to create log file {}", config.log_file.display()))?;
    WriteLogger::init(config.log_level, simplelog::Config::default(), log_file)
        .context("failed to initialize logger")?;
    info!("starting with {:?}", config);

    let mut term = TermManager::new().context("failed to read terminal size")?;
    // Dropping `term` puts the terminal back if anything below bails out
    term.setup().context("failed to set up terminal")?;

    let state = GameState::new(config.rng());
    let result = GameLoop::new(state, Keyboard, &mut term).with_tick(config.tick()).run();

    term.restore().context("failed to restore terminal")?;
    result.context("game stopped")
}
