use std::io::{self, Write};

use crate::{
    board::Board,
    common::{GameResult, Symbol},
    config::BOARD_SIZE,
    game::Outcome,
};

/// Callbacks the game loop uses to keep a user interface up to date.
pub trait GameView: Send {
    /// `symbol` (shown as `label`) is about to move.
    fn turn_started(&mut self, _symbol: Symbol, _label: &str) {}

    /// The board was created or a move was applied.
    fn board_changed(&mut self, _board: &Board) {}

    /// Final outcome: a result, a connection failure, or an abort.
    fn report_result(&mut self, _outcome: &Outcome) {}
}

/// A view that ignores every callback.
#[derive(Debug, Default)]
pub struct NullView;

impl GameView for NullView {}

/// Render the board framed with box-drawing characters.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    out.push_str("       0   1   2\n");
    out.push_str("     ╔═══╦═══╦═══╗\n");
    for r in 0..BOARD_SIZE {
        out.push_str(&format!("   {} ║", r));
        for c in 0..BOARD_SIZE {
            out.push_str(&format!(" {} ║", board.cell(r, c)));
        }
        out.push('\n');
        if r + 1 < BOARD_SIZE {
            out.push_str("     ╠═══╬═══╬═══╣\n");
        }
    }
    out.push_str("     ╚═══╩═══╩═══╝");
    out
}

/// Text shown for a finished game, from the point of view of `local` if set.
pub fn describe_outcome(outcome: &Outcome, local: Option<Symbol>) -> String {
    match outcome {
        Outcome::Completed(GameResult::Winner(s)) => match local {
            Some(me) if me == *s => "🎉 You win! 🎉".to_string(),
            Some(_) => format!("Player {} wins. Better luck next time.", s),
            None => format!("Player {} wins!", s),
        },
        Outcome::Completed(_) => "It's a tie!".to_string(),
        Outcome::ConnectionLost(e) => format!("Connection lost: {}. Exiting game...", e),
        Outcome::Aborted => "Game aborted.".to_string(),
    }
}

/// Plain stdout rendering.
#[derive(Debug, Default)]
pub struct TerminalView {
    /// Symbol played at this terminal, when only one side is local.
    local: Option<Symbol>,
}

impl TerminalView {
    pub fn new(local: Option<Symbol>) -> Self {
        Self { local }
    }
}

impl GameView for TerminalView {
    fn turn_started(&mut self, symbol: Symbol, label: &str) {
        match self.local {
            Some(me) if me != symbol => println!("Waiting for {}...", label),
            _ => println!("It's {}'s turn ({}).", label, symbol),
        }
    }

    fn board_changed(&mut self, board: &Board) {
        println!("\n{}\n", render_board(board));
        let _ = io::stdout().flush();
    }

    fn report_result(&mut self, outcome: &Outcome) {
        println!("\n{}\n", describe_outcome(outcome, self.local));
    }
}
