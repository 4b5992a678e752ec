use crate::{
    board::Board,
    common::{Move, Symbol},
    protocol::SessionError,
    session::Session,
};

use super::Player;

/// The peer at the other end of a session. Its moves arrive over the wire and
/// every local move is forwarded to it.
pub struct RemotePlayer {
    session: Session,
}

impl RemotePlayer {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}

#[async_trait::async_trait]
impl Player for RemotePlayer {
    fn label(&self) -> String {
        match self.session.opponent_name() {
            Some(name) => format!("{} ({})", name, self.session.remote()),
            None => format!("Opponent ({})", self.session.remote()),
        }
    }

    async fn select_move(&mut self, _board: &Board, symbol: Symbol) -> Result<Move, SessionError> {
        if symbol != self.session.remote() {
            return Err(SessionError::OutOfTurn(symbol));
        }
        self.session.recv_move().await
    }

    async fn opponent_moved(&mut self, mv: Move, _symbol: Symbol) -> Result<(), SessionError> {
        self.session.send_move(mv).await
    }

    async fn close(&mut self) {
        self.session.close().await;
    }
}
