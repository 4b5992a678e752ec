//! Sources of moves.
//!
//! The game driver asks whichever player owns the current turn for a move and
//! then tells the other player what was played:
//! - AiPlayer: win / block / random heuristic
//! - CliPlayer: a human at the terminal
//! - RemotePlayer: the peer on the other end of a [`Session`](crate::session::Session)

use crate::board::Board;
use crate::common::{Move, Symbol};
use crate::protocol::SessionError;

/// Interface implemented by different player types.
#[async_trait::async_trait]
pub trait Player: Send {
    /// Short label for prompts and results.
    fn label(&self) -> String;

    /// Choose a move for `symbol` on `board`. Must return an empty cell.
    async fn select_move(&mut self, board: &Board, symbol: Symbol) -> Result<Move, SessionError>;

    /// Inform the player that its opponent (`symbol`) just played `mv`.
    async fn opponent_moved(&mut self, _mv: Move, _symbol: Symbol) -> Result<(), SessionError> {
        Ok(())
    }

    /// Release any resources once the game is over or abandoned.
    async fn close(&mut self) {}
}

pub mod ai;
pub use ai::AiPlayer;

pub mod cli;
pub use cli::{read_line, stdin_input, CliPlayer, SharedInput};

pub mod remote;
pub use remote::RemotePlayer;
