use thiserror::Error;

use crate::Tile;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("Board must be square with a side of at least 2")]
    InvalidBoardShape,
    #[error("Invalid tile value {0}, tiles must be powers of two starting at 2")]
    InvalidTile(Tile),
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
