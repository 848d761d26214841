use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use log::LevelFilter;
use rand::{rngs::StdRng, SeedableRng};

/// Snake on an 8x8 LED matrix, played in the terminal.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Milliseconds between game ticks. Smaller values make the snake faster.
    #[arg(
        long = "tick-ms",
        value_name = "MILLISECONDS",
        default_value_t = 250,
        value_parser = clap::value_parser!(u64).range(10..=5_000)
    )]
    pub tick_ms: u64,
    /// Seed for apple placement. Random when omitted.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,
    /// File that receives the game log while the terminal is in raw mode.
    #[arg(long = "log-file", value_name = "PATH", default_value = "sense-snake.log")]
    pub log_file: PathBuf,
    /// Maximum log level written to the log file.
    #[arg(long = "log-level", value_name = "LEVEL", default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,
}

impl Config {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
