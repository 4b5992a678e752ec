//! Commonly used types and utilities for ease of import.

pub use crate::{Board, GameResult, Move, Symbol, TurnCoordinator};

#[cfg(feature = "std")]
pub use crate::{
    AiPlayer, CliPlayer, Game, GameView, NetConfig, Outcome, Player, RemotePlayer, Session,
    SessionError, TerminalView,
};

#[cfg(feature = "std")]
pub use crate::transport::{in_memory::InMemoryTransport, tcp::TcpTransport, Transport};
