use core::fmt;
use core::num::Saturating;
use core::ops::Index;
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::*;

/// Square grid of tiles, indexed `(row, col)` from the top-left corner.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Array2<Tile>", into = "Array2<Tile>")]
pub struct Board {
    pub(crate) cells: Array2<Tile>,
}

impl Board {
    /// Empty board of `size × size` cells.
    pub fn new(size: usize) -> Result<Self> {
        if size < MIN_SIZE {
            return Err(GameError::InvalidArgument("board size must be at least 2"));
        }
        Ok(Self {
            cells: Array2::zeros((size, size)),
        })
    }

    /// Board with explicit contents, one array per row.
    pub fn from_rows<const N: usize>(rows: &[[Tile; N]]) -> Result<Self> {
        if rows.len() != N {
            return Err(GameError::InvalidBoardShape);
        }
        Self::from_cells(Array2::from_shape_fn((N, N), |(row, col)| rows[row][col]))
    }

    pub fn from_cells(cells: Array2<Tile>) -> Result<Self> {
        let (rows, cols) = cells.dim();
        if rows != cols {
            return Err(GameError::InvalidBoardShape);
        }
        if rows < MIN_SIZE {
            return Err(GameError::InvalidArgument("board size must be at least 2"));
        }
        for &value in cells.iter() {
            validate_cell(value)?;
        }
        Ok(Self { cells })
    }

    pub fn size(&self) -> usize {
        self.cells.nrows()
    }

    pub fn cells(&self) -> ArrayView2<'_, Tile> {
        self.cells.view()
    }

    pub fn get(&self, pos: Pos) -> Option<Tile> {
        self.cells.get(pos).copied()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&value| value == 0).count()
    }

    pub fn tile_count(&self) -> usize {
        self.cells.len() - self.empty_count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&value| value != 0)
    }

    pub fn max_tile(&self) -> Tile {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Sum of every tile, which merges leave unchanged.
    pub fn tile_sum(&self) -> Tile {
        self.cells
            .iter()
            .fold(Saturating(0), |sum, &value| sum + Saturating(value))
            .0
    }

    pub fn has_tile(&self, value: Tile) -> bool {
        self.cells.iter().any(|&cell| cell == value)
    }

    /// Whether any move could still change the grid: an empty cell, or two equal tiles side by side.
    pub fn has_available_moves(&self) -> bool {
        if !self.is_full() {
            return true;
        }

        let size = self.size();
        for row in 0..size {
            for col in 0..size {
                let value = self.cells[(row, col)];
                if col + 1 < size && self.cells[(row, col + 1)] == value && value < MAX_TILE {
                    return true;
                }
                if row + 1 < size && self.cells[(row + 1, col)] == value && value < MAX_TILE {
                    return true;
                }
            }
        }
        false
    }

    /// Positions of empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells
            .indexed_iter()
            .filter(|&(_, &value)| value == 0)
            .map(|(pos, _)| pos)
    }

    pub fn clear(&mut self) {
        self.cells.fill(0);
    }
}

impl Index<Pos> for Board {
    type Output = Tile;

    fn index(&self, pos: Pos) -> &Self::Output {
        &self.cells[pos]
    }
}

impl TryFrom<Array2<Tile>> for Board {
    type Error = GameError;

    fn try_from(cells: Array2<Tile>) -> Result<Self> {
        Self::from_cells(cells)
    }
}

impl From<Board> for Array2<Tile> {
    fn from(board: Board) -> Self {
        board.cells
    }
}

/// Renders rows of right-aligned values, `.` marks an empty cell.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.max_tile().checked_ilog10().map_or(1, |digits| digits + 1) as usize;
        for (i, row) in self.cells.rows().into_iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            for (j, &value) in row.iter().enumerate() {
                if j > 0 {
                    f.write_str(" ")?;
                }
                if value == 0 {
                    write!(f, "{:>width$}", ".")?;
                } else {
                    write!(f, "{:>width$}", value)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn new_board_is_empty() {
        let board = Board::new(4).unwrap();

        assert_eq!(board.size(), 4);
        assert_eq!(board.empty_count(), 16);
        assert_eq!(board.tile_count(), 0);
        assert_eq!(board.max_tile(), 0);
        assert!(board.has_available_moves());
    }

    #[test]
    fn new_rejects_tiny_boards() {
        assert!(matches!(Board::new(0), Err(GameError::InvalidArgument(_))));
        assert!(matches!(Board::new(1), Err(GameError::InvalidArgument(_))));
        assert!(Board::new(2).is_ok());
        assert!(Board::new(9).is_ok());
    }

    #[test]
    fn explicit_contents_reject_tiny_boards_like_new() {
        assert!(matches!(
            Board::from_rows(&[[2]]),
            Err(GameError::InvalidArgument(_))
        ));
        assert!(matches!(
            Board::from_cells(Array2::zeros((0, 0))),
            Err(GameError::InvalidArgument(_))
        ));
        assert_eq!(
            Board::from_cells(Array2::zeros((2, 3))),
            Err(GameError::InvalidBoardShape)
        );
    }

    #[test]
    fn from_rows_validates_shape_and_tiles() {
        assert_eq!(
            Board::from_rows(&[[2, 0, 0], [0, 0, 0]]),
            Err(GameError::InvalidBoardShape)
        );
        assert_eq!(
            Board::from_rows(&[[2, 3], [0, 0]]),
            Err(GameError::InvalidTile(3))
        );
        assert_eq!(
            Board::from_rows(&[[1, 0], [0, 0]]),
            Err(GameError::InvalidTile(1))
        );

        let board = Board::from_rows(&[[2, 0], [0, 4096]]).unwrap();
        assert_eq!(board[(0, 0)], 2);
        assert_eq!(board.get((1, 1)), Some(4096));
        assert_eq!(board.get((2, 0)), None);
    }

    #[test]
    fn has_tile_finds_values() {
        let board = Board::from_rows(&[[2, 2048], [0, 8]]).unwrap();

        assert!(board.has_tile(2048));
        assert!(board.has_tile(8));
        assert!(!board.has_tile(4096));
    }

    #[test]
    fn checkerboard_has_no_moves() {
        let board = Board::from_rows(&[
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 2],
        ])
        .unwrap();

        assert!(board.is_full());
        assert!(!board.has_available_moves());
    }

    #[test]
    fn full_board_with_equal_neighbors_has_moves() {
        let horizontal = Board::from_rows(&[[2, 2], [4, 8]]).unwrap();
        let vertical = Board::from_rows(&[[2, 4], [2, 8]]).unwrap();

        assert!(horizontal.has_available_moves());
        assert!(vertical.has_available_moves());
    }

    #[test]
    fn single_empty_cell_has_moves() {
        let board = Board::from_rows(&[[2, 4], [8, 0]]).unwrap();

        assert!(board.has_available_moves());
        assert_eq!(board.empty_cells().collect::<alloc::vec::Vec<_>>(), [(1, 1)]);
    }

    #[test]
    fn display_aligns_columns() {
        let board = Board::from_rows(&[[2, 0], [128, 16]]).unwrap();

        assert_eq!(format!("{board}"), "  2   .\n128  16");
    }

    #[test]
    fn serde_goes_through_validation() {
        let board = Board::from_rows(&[[2, 0], [0, 4]]).unwrap();
        let json = serde_json::to_string(&board).unwrap();
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);

        let bad = json.replace('4', "5");
        assert!(serde_json::from_str::<Board>(&bad).is_err());
    }
}
