use proptest::prelude::*;
use tictactoe::{Board, BoardError, GameResult, Move, Symbol, BOARD_SIZE, LINES};

fn symbol() -> impl Strategy<Value = Symbol> {
    prop_oneof![Just(Symbol::X), Just(Symbol::O)]
}

/// Fill the board in a pattern that never completes a line.
fn drawn_board() -> Board {
    let mut board = Board::new();
    let layout = [
        [Symbol::X, Symbol::O, Symbol::X],
        [Symbol::X, Symbol::O, Symbol::O],
        [Symbol::O, Symbol::X, Symbol::X],
    ];
    for (r, row) in layout.iter().enumerate() {
        for (c, s) in row.iter().enumerate() {
            board.place(*s, r, c);
        }
    }
    board
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn any_full_line_wins(line in 0..LINES.len(), s in symbol(), noise in prop::collection::vec((0..BOARD_SIZE, 0..BOARD_SIZE), 0..3)) {
        let mut board = Board::new();
        let cells = LINES[line];
        // A couple of opponent marks off the line must not matter.
        for (r, c) in noise {
            if !cells.contains(&(r, c)) {
                board.place(s.opponent(), r, c);
            }
        }
        for (r, c) in cells {
            board.place(s, r, c);
        }
        prop_assert_eq!(board.winner(), GameResult::Winner(s));
    }

    #[test]
    fn two_in_a_line_is_not_a_win(line in 0..LINES.len(), skip in 0..3usize, s in symbol()) {
        let mut board = Board::new();
        for (i, (r, c)) in LINES[line].into_iter().enumerate() {
            if i != skip {
                board.place(s, r, c);
            }
        }
        prop_assert_eq!(board.winner(), GameResult::InProgress);
    }

    #[test]
    fn try_place_rejects_taken_cells(row in 0..BOARD_SIZE, col in 0..BOARD_SIZE, s in symbol()) {
        let mut board = Board::new();
        let mv = Move::new(row, col).unwrap();
        board.try_place(s, mv).unwrap();
        prop_assert_eq!(board.try_place(s.opponent(), mv), Err(BoardError::Occupied { row, col }));
        prop_assert_eq!(board.cell(row, col).symbol(), Some(s));
        prop_assert_eq!(board.filled(), 1);
    }

    #[test]
    fn empty_cells_shrink_with_each_move(moves in prop::sample::subsequence((0..9).collect::<Vec<usize>>(), 0..=9)) {
        let mut board = Board::new();
        for (i, idx) in moves.iter().enumerate() {
            board.place(if i % 2 == 0 { Symbol::X } else { Symbol::O }, idx / 3, idx % 3);
        }
        prop_assert_eq!(board.empty_cells().count(), 9 - moves.len());
        prop_assert_eq!(board.is_full(), moves.len() == 9);
    }
}

#[test]
fn full_board_without_line_is_a_tie() {
    assert_eq!(drawn_board().winner(), GameResult::Tie);
}

#[test]
fn win_on_last_cell_beats_tie() {
    let mut board = Board::new();
    let layout = [
        [Some(Symbol::X), Some(Symbol::O), Some(Symbol::X)],
        [Some(Symbol::O), Some(Symbol::X), Some(Symbol::O)],
        [Some(Symbol::O), Some(Symbol::X), None],
    ];
    for (r, row) in layout.iter().enumerate() {
        for (c, s) in row.iter().enumerate() {
            if let Some(s) = s {
                board.place(*s, r, c);
            }
        }
    }
    assert_eq!(board.winner(), GameResult::InProgress);
    board.try_place(Symbol::X, Move::new(2, 2).unwrap()).unwrap();
    assert!(board.is_full());
    assert_eq!(board.winner(), GameResult::Winner(Symbol::X));
}
