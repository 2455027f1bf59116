use clap::Parser;
use std::path::PathBuf;
use tilemerge_core::{DEFAULT_SIZE, SessionConfig, SpawnConfig, Tile};

#[derive(Parser, Debug)]
#[command(version, about = "Slide and merge tiles until you reach 2048", long_about = None)]
pub(crate) struct Args {
    /// What log level to use
    #[command(flatten)]
    pub(crate) verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    pub(crate) seed: Option<u64>,

    /// Side length of the board
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    pub(crate) size: usize,

    /// Tile that wins the game, play continues afterwards
    #[arg(long, default_value_t = SessionConfig::DEFAULT_TARGET)]
    pub(crate) target: Tile,

    /// Chance that a new tile is a 4 instead of a 2
    #[arg(long, default_value_t = SpawnConfig::DEFAULT_FOUR_PROBABILITY)]
    pub(crate) four_chance: f64,

    /// Where the high score is kept
    #[arg(long, default_value = ".")]
    pub(crate) data_dir: PathBuf,
}

impl Args {
    pub(crate) fn session_config(&self) -> SessionConfig {
        SessionConfig::new(self.size, self.target, SpawnConfig::new(self.four_chance))
    }
}
