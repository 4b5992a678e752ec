// Greedy one-ply move selection for the computer opponent.
// Uses no_std and avoids heap allocations.

use crate::{
    board::Board,
    common::{GameResult, Move, Symbol},
};
use rand::Rng;

/// Find the first empty cell, in row-major order, that completes a line for `symbol`.
///
/// Works on a scratch copy; `board` is left untouched.
pub fn winning_move(board: &Board, symbol: Symbol) -> Option<Move> {
    let mut scratch = *board;
    for mv in board.empty_cells() {
        scratch.place(symbol, mv.row(), mv.col());
        let wins = scratch.winner() == GameResult::Winner(symbol);
        scratch.clear(mv.row(), mv.col());
        if wins {
            return Some(mv);
        }
    }
    None
}

/// Choose uniformly among the empty cells.
pub fn random_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Move> {
    let count = board.empty_cells().count();
    if count == 0 {
        return None;
    }
    board.empty_cells().nth(rng.random_range(0..count))
}

/// Pick the CPU's move: win if possible, else block `human`, else a random empty cell.
///
/// Returns `None` only when the board is full.
pub fn decide<R: Rng + ?Sized>(
    board: &Board,
    cpu: Symbol,
    human: Symbol,
    rng: &mut R,
) -> Option<Move> {
    winning_move(board, cpu)
        .or_else(|| winning_move(board, human))
        .or_else(|| random_move(board, rng))
}
