//! Mode-agnostic game loop: ask the current seat for a move, apply it, tell
//! the other seat, check for a result.

use std::boxed::Box;
use std::future::Future;

use log::{debug, info};

use crate::{
    board::Board,
    common::{BoardError, GameResult, Move, Symbol},
    player::Player,
    protocol::SessionError,
    turn::TurnCoordinator,
    ui::GameView,
};

/// How a game ended.
#[derive(Debug)]
pub enum Outcome {
    /// Someone won or the board filled up.
    Completed(GameResult),
    /// The peer vanished or sent something unusable. Never a win or tie.
    ConnectionLost(SessionError),
    /// A local player quit.
    Aborted,
}

impl Outcome {
    pub fn result(&self) -> Option<GameResult> {
        match self {
            Outcome::Completed(result) => Some(*result),
            _ => None,
        }
    }

    fn from_error(e: SessionError) -> Self {
        match e {
            SessionError::Aborted => Outcome::Aborted,
            other => Outcome::ConnectionLost(other),
        }
    }
}

/// Board, turn order and one player per symbol.
pub struct Game {
    board: Board,
    turns: TurnCoordinator,
    seats: [Box<dyn Player>; 2],
    moves: usize,
}

impl Game {
    /// `x` plays X and `o` plays O; the sequence starts with `turns.current()`.
    pub fn new(turns: TurnCoordinator, x: Box<dyn Player>, o: Box<dyn Player>) -> Self {
        Self {
            board: Board::new(),
            turns,
            seats: [x, o],
            moves: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_turn(&self) -> Symbol {
        self.turns.current()
    }

    pub fn turns(&self) -> &TurnCoordinator {
        &self.turns
    }

    /// Moves applied since the last [`Game::new_game`].
    pub fn moves(&self) -> usize {
        self.moves
    }

    pub fn winner(&self) -> GameResult {
        self.board.winner()
    }

    pub fn player(&self, symbol: Symbol) -> &dyn Player {
        self.seats[symbol.index()].as_ref()
    }

    /// Place the current symbol at `mv` and pass the turn unless the game is over.
    pub fn apply_move(&mut self, mv: Move) -> Result<GameResult, BoardError> {
        let symbol = self.turns.current();
        self.board.try_place(symbol, mv)?;
        self.moves += 1;
        debug!("{} played {}", symbol, mv);
        let result = self.board.winner();
        if !result.is_terminal() {
            self.turns.advance();
        }
        Ok(result)
    }

    /// Clear the board and start the turn sequence over.
    pub fn new_game(&mut self) {
        self.board.reset();
        self.turns.reset();
        self.moves = 0;
    }

    /// Clear the board and start a sequence that opens with `first`.
    pub fn restart_with(&mut self, first: Symbol) {
        let mut turns = TurnCoordinator::new(first);
        if let Some(local) = self.turns.local() {
            turns = turns.with_local(local);
        }
        self.turns = turns;
        self.new_game();
    }

    /// Play until the board reaches a result or a player fails, then close both players.
    pub async fn play(&mut self, view: &mut dyn GameView) -> Outcome {
        let outcome = self.run(view).await;
        self.finish(view, outcome).await
    }

    /// Like [`Game::play`], but abort as soon as `cancel` resolves.
    pub async fn play_until<F>(&mut self, view: &mut dyn GameView, cancel: F) -> Outcome
    where
        F: Future<Output = ()> + Send,
    {
        tokio::pin!(cancel);
        let outcome = tokio::select! {
            outcome = self.run(view) => outcome,
            _ = &mut cancel => {
                info!("game cancelled");
                Outcome::Aborted
            }
        };
        self.finish(view, outcome).await
    }

    async fn run(&mut self, view: &mut dyn GameView) -> Outcome {
        view.board_changed(&self.board);
        loop {
            match self.step(view).await {
                Ok(GameResult::InProgress) => continue,
                Ok(result) => return Outcome::Completed(result),
                Err(e) => return Outcome::from_error(e),
            }
        }
    }

    async fn finish(&mut self, view: &mut dyn GameView, outcome: Outcome) -> Outcome {
        info!("game over after {} moves: {:?}", self.moves, outcome);
        self.close().await;
        view.report_result(&outcome);
        outcome
    }

    async fn step(&mut self, view: &mut dyn GameView) -> Result<GameResult, SessionError> {
        let symbol = self.turns.current();
        view.turn_started(symbol, &self.seats[symbol.index()].label());
        let mv = self.seats[symbol.index()]
            .select_move(&self.board, symbol)
            .await?;
        let result = self
            .apply_move(mv)
            .map_err(|source| SessionError::IllegalMove { symbol, source })?;
        self.seats[symbol.opponent().index()]
            .opponent_moved(mv, symbol)
            .await?;
        view.board_changed(&self.board);
        Ok(result)
    }

    /// Close both players, e.g. to shut down a network session.
    pub async fn close(&mut self) {
        for seat in self.seats.iter_mut() {
            seat.close().await;
        }
    }
}
