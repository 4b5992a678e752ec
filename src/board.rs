//! The 3x3 playing grid and win/tie detection.

use core::fmt;

use crate::common::{BoardError, Cell, GameResult, Move, Symbol};
use crate::config::{BOARD_SIZE, LINES};

/// Board state. Owned by whoever drives the game; never shared globally.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Create an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents of a cell.
    ///
    /// # Panics
    /// Panics if `row` or `col` is not below [`BOARD_SIZE`].
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// `true` iff the cell holds no symbol.
    ///
    /// # Panics
    /// Panics if `row` or `col` is not below [`BOARD_SIZE`].
    pub fn is_empty(&self, row: usize, col: usize) -> bool {
        self.cells[row][col] == Cell::Empty
    }

    /// Write `symbol` into the cell, overwriting whatever was there.
    ///
    /// Callers check emptiness first; see [`Board::try_place`] for the checked form.
    ///
    /// # Panics
    /// Panics if `row` or `col` is not below [`BOARD_SIZE`].
    pub fn place(&mut self, symbol: Symbol, row: usize, col: usize) {
        self.cells[row][col] = Cell::Player(symbol);
    }

    /// Place `symbol` at `mv` only if that cell is empty.
    pub fn try_place(&mut self, symbol: Symbol, mv: Move) -> Result<(), BoardError> {
        let (row, col) = (mv.row(), mv.col());
        if !self.is_empty(row, col) {
            return Err(BoardError::Occupied { row, col });
        }
        self.place(symbol, row, col);
        Ok(())
    }

    /// Reset a single cell to empty.
    ///
    /// # Panics
    /// Panics if `row` or `col` is not below [`BOARD_SIZE`].
    pub fn clear(&mut self, row: usize, col: usize) {
        self.cells[row][col] = Cell::Empty;
    }

    /// Empty every cell.
    pub fn reset(&mut self) {
        self.cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
    }

    /// Iterator over the empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Move> + '_ {
        Move::all().filter(move |m| self.is_empty(m.row(), m.col()))
    }

    pub fn is_full(&self) -> bool {
        self.empty_cells().next().is_none()
    }

    /// Number of occupied cells.
    pub fn filled(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|c| **c != Cell::Empty)
            .count()
    }

    /// Evaluate the board. Every line is checked before falling back to tie detection.
    pub fn winner(&self) -> GameResult {
        for line in LINES {
            let [a, b, c] = line.map(|(row, col)| self.cells[row][col]);
            if let Cell::Player(s) = a {
                if a == b && b == c {
                    return GameResult::Winner(s);
                }
            }
        }
        if self.is_full() {
            GameResult::Tie
        } else {
            GameResult::InProgress
        }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("rows", &format_args!("{}", self))
            .finish()
    }
}

/// Plain text rendering: ` X | O |   ` rows separated by dashes.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.cells.iter().enumerate() {
            write!(f, " {} | {} | {} ", row[0], row[1], row[2])?;
            if r != BOARD_SIZE - 1 {
                write!(f, "\n-----------\n")?;
            }
        }
        Ok(())
    }
}
