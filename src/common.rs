//! Common types for tic-tac-toe: symbols, cells, moves, results and board errors.

use core::fmt;

use crate::config::BOARD_SIZE;

/// A player's token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Symbol {
    X,
    O,
}

impl Symbol {
    /// The other symbol.
    pub const fn opponent(self) -> Symbol {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }

    pub const fn as_char(self) -> char {
        match self {
            Symbol::X => 'X',
            Symbol::O => 'O',
        }
    }

    /// Parse a symbol, accepting either case.
    pub fn from_char(c: char) -> Option<Symbol> {
        match c.to_ascii_uppercase() {
            'X' => Some(Symbol::X),
            'O' => Some(Symbol::O),
            _ => None,
        }
    }

    /// Stable index, X = 0 and O = 1.
    pub const fn index(self) -> usize {
        match self {
            Symbol::X => 0,
            Symbol::O => 1,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Contents of one board square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Player(Symbol),
}

impl Cell {
    pub fn symbol(self) -> Option<Symbol> {
        match self {
            Cell::Empty => None,
            Cell::Player(s) => Some(s),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => write!(f, " "),
            Cell::Player(s) => write!(f, "{}", s),
        }
    }
}

/// A validated (row, column) pair. Serialized as the array `[row, col]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "[usize; 2]", into = "[usize; 2]")
)]
pub struct Move {
    row: usize,
    col: usize,
}

impl Move {
    /// Build a move, rejecting coordinates outside the board.
    pub fn new(row: usize, col: usize) -> Result<Self, BoardError> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(BoardError::OutOfBounds { row, col });
        }
        Ok(Self { row, col })
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    /// Every cell in row-major order.
    pub fn all() -> impl Iterator<Item = Move> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Move { row, col }))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl TryFrom<[usize; 2]> for Move {
    type Error = BoardError;

    fn try_from([row, col]: [usize; 2]) -> Result<Self, Self::Error> {
        Move::new(row, col)
    }
}

impl From<Move> for [usize; 2] {
    fn from(mv: Move) -> Self {
        [mv.row, mv.col]
    }
}

/// Outcome derived from the board contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Winner(Symbol),
    Tie,
    InProgress,
}

impl GameResult {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameResult::InProgress)
    }
}

/// Errors returned by Board operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Row or column outside `0..BOARD_SIZE`.
    OutOfBounds { row: usize, col: usize },
    /// Target cell already holds a symbol.
    Occupied { row: usize, col: usize },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::OutOfBounds { row, col } => {
                write!(f, "Cell ({}, {}) is outside the board", row, col)
            }
            BoardError::Occupied { row, col } => {
                write!(f, "Cell ({}, {}) is already taken", row, col)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
