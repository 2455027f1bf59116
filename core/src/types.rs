use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::{GameError, Result};

/// Value stored in a single cell, `0` means empty.
pub type Tile = u64;

/// Score accumulated from merges.
pub type Score = u64;

/// Row/column position `(row, col)`, row 0 is the top edge.
pub type Pos = (usize, usize);

/// Smallest board side length the engine accepts.
pub const MIN_SIZE: usize = 2;

/// Side length used when nothing else is configured.
pub const DEFAULT_SIZE: usize = 4;

/// Largest tile representable in a [`Tile`]. Tiles of this value never merge.
pub const MAX_TILE: Tile = 1 << (Tile::BITS - 1);

/// Whether `value` may appear in a non-empty cell.
pub const fn is_valid_tile(value: Tile) -> bool {
    value >= 2 && value.is_power_of_two()
}

/// Checks a cell value, empty cells included.
pub fn validate_cell(value: Tile) -> Result<Tile> {
    if value == 0 || is_valid_tile(value) {
        Ok(value)
    } else {
        Err(GameError::InvalidTile(value))
    }
}

/// Direction tiles travel in; the board edge they move toward is the leading edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Rows are processed for horizontal moves, columns for vertical ones.
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Whether the leading edge sits at the high index end of each line.
    pub const fn is_reversed(self) -> bool {
        matches!(self, Self::Right | Self::Down)
    }

    pub const fn name(self) -> &'static str {
        use Direction::*;
        match self {
            Up => "up",
            Down => "down",
            Left => "left",
            Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        use Direction::*;
        let s = s.trim();
        let matches = |names: &[&str]| names.iter().any(|name| s.eq_ignore_ascii_case(name));
        if matches(&["up", "w", "k"]) {
            Ok(Up)
        } else if matches(&["down", "s", "j"]) {
            Ok(Down)
        } else if matches(&["left", "a", "h"]) {
            Ok(Left)
        } else if matches(&["right", "d", "l"]) {
            Ok(Right)
        } else {
            Err(GameError::InvalidArgument("unknown direction"))
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = GameError;

    fn try_from(index: u8) -> Result<Self> {
        Self::ALL
            .get(usize::from(index))
            .copied()
            .ok_or(GameError::InvalidArgument("direction index out of range"))
    }
}
