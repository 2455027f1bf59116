use core::num::Saturating;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Playing -> Won
/// - Playing -> Over
/// - Won -> Over
/// - any -> Playing on restart
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Playing,
    /// Target tile reached, moves are still accepted
    Won,
    /// No move can change the board anymore
    Over,
}

impl SessionState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Over)
    }

    pub const fn has_won(self) -> bool {
        matches!(self, Self::Won)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Playing
    }
}

/// One game from the starting tiles until no moves are left, restartable.
#[derive(Clone, Debug)]
pub struct GameSession<S> {
    config: SessionConfig,
    board: Board,
    source: S,
    score: Saturating<Score>,
    high_score: Score,
    moves: Saturating<u32>,
    state: SessionState,
    reached_target: bool,
}

impl<S: TileSource> GameSession<S> {
    pub fn new(config: SessionConfig, mut source: S, high_score: Score) -> Result<Self> {
        let config = config.validate()?;
        let mut board = Board::new(config.size)?;
        board.reset_with(&mut source, &config.spawn);
        log::debug!("New {0}x{0} session, target {1}", config.size, config.target);

        Ok(Self {
            config,
            board,
            source,
            score: Saturating(0),
            high_score,
            moves: Saturating(0),
            state: Default::default(),
            reached_target: false,
        })
    }

    /// Resumes from an existing board, e.g. a saved game.
    pub fn with_board(
        config: SessionConfig,
        board: Board,
        source: S,
        score: Score,
        high_score: Score,
    ) -> Result<Self> {
        let config = config.validate()?;
        if board.size() != config.size {
            return Err(GameError::InvalidBoardShape);
        }

        let reached_target = board.has_tile(config.target);
        let state = if !board.has_available_moves() {
            SessionState::Over
        } else if reached_target {
            SessionState::Won
        } else {
            SessionState::Playing
        };

        Ok(Self {
            config,
            board,
            source,
            score: Saturating(score),
            high_score: high_score.max(score),
            moves: Saturating(0),
            state,
            reached_target,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> Score {
        self.score.0
    }

    pub fn high_score(&self) -> Score {
        self.high_score
    }

    /// Number of moves that changed the board since the last restart.
    pub fn moves(&self) -> u32 {
        self.moves.0
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn reached_target(&self) -> bool {
        self.reached_target
    }

    /// Slides the board, then spawns a tile if anything moved.
    pub fn apply_move(&mut self, direction: Direction) -> Result<MoveOutcome> {
        self.check_not_finished()?;

        let result = self.board.move_tiles(direction);
        if !result.moved {
            log::debug!("Move {} changed nothing", direction);
            return Ok(MoveOutcome::NoChange);
        }

        self.moves += 1;
        self.score += result.score_delta;
        if self.score.0 > self.high_score {
            self.high_score = self.score.0;
        }
        let spawned = self.board.spawn_tile_with(&mut self.source, &self.config.spawn);
        // a move that changed the grid always frees at least one cell
        debug_assert!(spawned);
        log::debug!(
            "Move {} scored {}, total {}",
            direction,
            result.score_delta,
            self.score
        );

        let first_win = !self.reached_target && self.board.has_tile(self.config.target);
        if first_win {
            self.reached_target = true;
            self.state = SessionState::Won;
            log::debug!("Reached {} after {} moves", self.config.target, self.moves);
        }

        Ok(if !self.board.has_available_moves() {
            self.state = SessionState::Over;
            log::debug!("No moves left, final score {}", self.score);
            MoveOutcome::GameOver
        } else if first_win {
            MoveOutcome::Won
        } else {
            MoveOutcome::Moved
        })
    }

    /// Starts over with a fresh board, the high score is kept.
    pub fn restart(&mut self) {
        self.board.reset_with(&mut self.source, &self.config.spawn);
        self.score = Saturating(0);
        self.moves = Saturating(0);
        self.state = SessionState::Playing;
        self.reached_target = false;
        log::debug!("Restarted, high score {}", self.high_score);
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
