use rand::rngs::SmallRng;

use crate::{ai, board::Board, common::Move, common::Symbol, protocol::SessionError};

use super::Player;

/// Computer opponent: win if possible, else block, else random.
pub struct AiPlayer {
    rng: SmallRng,
}

impl AiPlayer {
    pub fn new(rng: SmallRng) -> Self {
        Self { rng }
    }
}

#[async_trait::async_trait]
impl Player for AiPlayer {
    fn label(&self) -> String {
        "CPU".to_string()
    }

    async fn select_move(&mut self, board: &Board, symbol: Symbol) -> Result<Move, SessionError> {
        ai::decide(board, symbol, symbol.opponent(), &mut self.rng)
            .ok_or(SessionError::NoMoveAvailable)
    }
}
