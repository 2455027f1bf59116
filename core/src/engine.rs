use core::num::Saturating;
use smallvec::SmallVec;

use crate::*;

/// Scratch buffer for one row or column.
type Line = SmallVec<[Tile; 8]>;

/// Slides one line toward index 0: compact, merge each equal pair once, compact again.
///
/// Returns the sum of the merged tiles.
pub fn slide_line(line: &mut [Tile]) -> Score {
    compact(line);

    let mut delta = Saturating(0);
    let mut i = 0;
    while i + 1 < line.len() {
        let value = line[i];
        if value == 0 {
            break;
        }
        if value == line[i + 1] && value < MAX_TILE {
            line[i] = value * 2;
            line[i + 1] = 0;
            delta += line[i];
            // the pair is consumed, the doubled tile cannot merge again
            i += 2;
        } else {
            i += 1;
        }
    }

    compact(line);
    delta.0
}

/// Moves non-empty tiles to the front keeping their order.
fn compact(line: &mut [Tile]) {
    let mut write = 0;
    for read in 0..line.len() {
        if line[read] != 0 {
            line.swap(write, read);
            write += 1;
        }
    }
}

impl Board {
    /// Slides every row or column toward the edge `direction` points at.
    ///
    /// Never spawns; the caller decides what to do with [`MoveResult::moved`].
    pub fn move_tiles(&mut self, direction: Direction) -> MoveResult {
        let reversed = direction.is_reversed();
        let lanes = if direction.is_horizontal() {
            self.cells.rows_mut()
        } else {
            self.cells.columns_mut()
        };

        let mut result = MoveResult::NO_CHANGE;
        let mut score = Saturating(0);
        for (index, mut lane) in lanes.into_iter().enumerate() {
            let before: Line = if reversed {
                lane.iter().rev().copied().collect()
            } else {
                lane.iter().copied().collect()
            };
            let mut after = before.clone();
            score += slide_line(&mut after);

            if after == before {
                continue;
            }
            log::trace!("{} line {}: {:?} -> {:?}", direction, index, before, after);
            result.moved = true;

            if reversed {
                for (cell, &value) in lane.iter_mut().rev().zip(after.iter()) {
                    *cell = value;
                }
            } else {
                for (cell, &value) in lane.iter_mut().zip(after.iter()) {
                    *cell = value;
                }
            }
        }

        result.score_delta = score.0;
        result
    }

    /// Whether moving in `direction` would change the board, without changing it.
    pub fn can_move(&self, direction: Direction) -> bool {
        self.clone().move_tiles(direction).moved
    }

    /// Directions that would change the board.
    pub fn available_directions(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL
            .into_iter()
            .filter(|&direction| self.can_move(direction))
    }
}
