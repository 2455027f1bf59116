#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use engine::*;
pub use error::*;
pub use session::*;
pub use spawn::*;
pub use types::*;

mod board;
mod engine;
mod error;
mod session;
mod spawn;
mod types;

/// Parameters of a game session.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub size: usize,
    /// Tile value that counts as a win.
    pub target: Tile,
    pub spawn: SpawnConfig,
}

impl SessionConfig {
    pub const DEFAULT_TARGET: Tile = 2048;

    pub const fn new(size: usize, target: Tile, spawn: SpawnConfig) -> Self {
        Self {
            size,
            target,
            spawn,
        }
    }

    pub fn validate(&self) -> Result<Self> {
        if self.size < MIN_SIZE {
            return Err(GameError::InvalidArgument("board size must be at least 2"));
        }
        if self.target < 4 || !is_valid_tile(self.target) {
            return Err(GameError::InvalidArgument(
                "target must be a power of two of at least 4",
            ));
        }
        self.spawn.validate()?;
        Ok(*self)
    }

    pub const fn total_cells(&self) -> usize {
        self.size.saturating_mul(self.size)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE, Self::DEFAULT_TARGET, SpawnConfig::default())
    }
}

/// Result of sliding every line of a board in one direction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResult {
    /// Whether any cell changed.
    pub moved: bool,
    /// Sum of the tiles produced by merges.
    pub score_delta: Score,
}

impl MoveResult {
    pub const NO_CHANGE: Self = Self {
        moved: false,
        score_delta: 0,
    };
}

/// Outcome of a move applied to a session
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    NoChange,
    Moved,
    Won,
    GameOver,
}

impl MoveOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        use MoveOutcome::*;
        match self {
            NoChange => false,
            Moved => true,
            Won => true,
            GameOver => true,
        }
    }
}
