use core::fmt;
use std::net::SocketAddr;
use std::string::String;
use std::time::Duration;

use thiserror::Error;

use crate::common::{BoardError, Move, Symbol};

/// Messages exchanged between the two peers.
///
/// On the wire these are untagged: a bare `X`/`O` byte, a JSON string or a
/// JSON array, distinguished by their first byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Host tells the joiner which symbol it plays.
    Assign(Symbol),
    /// Display name, sent during negotiation when both peers opted in.
    Name(String),
    /// A move `[row, col]`.
    Move(Move),
}

impl Message {
    pub fn kind(&self) -> &'static str {
        match self {
            Message::Assign(_) => "symbol assignment",
            Message::Name(_) => "name",
            Message::Move(_) => "move",
        }
    }
}

/// Which end of the connection this peer is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Host,
    Joiner,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Host => write!(f, "host"),
            Role::Joiner => write!(f, "joiner"),
        }
    }
}

/// Lifecycle of a networked session once the connection is up. Connecting
/// happens in [`Session::accept`](crate::session::Session::accept) and
/// [`Session::join`](crate::session::Session::join), before a session exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Negotiating,
    Playing,
    Finished,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Negotiating => "negotiating",
            SessionState::Playing => "playing",
            SessionState::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// Malformed wire payloads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("empty payload")]
    Empty,
    #[error("payload ended mid-message")]
    Truncated,
    #[error("malformed payload: {0}")]
    Malformed(String),
    #[error("move ({row}, {col}) is off the board")]
    OutOfRange { row: usize, col: usize },
    #[error("unexpected byte 0x{0:02x} at start of message")]
    UnexpectedByte(u8),
}

/// Everything that can end or interrupt a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("could not decode peer message: {0}")]
    Decode(#[from] DecodeError),
    #[error("timed out connecting to {addr} after {timeout:?}")]
    ConnectionTimeout { addr: SocketAddr, timeout: Duration },
    #[error("peer closed the connection")]
    PeerDisconnected,
    #[error("`{0}` is not a valid IP address")]
    InvalidAddress(String),
    #[error("expected {expected} while {state}, got {got}")]
    UnexpectedMessage {
        state: SessionState,
        expected: &'static str,
        got: &'static str,
    },
    #[error("{symbol} played an illegal move: {source}")]
    IllegalMove { symbol: Symbol, source: BoardError },
    #[error("it is not {0}'s turn")]
    OutOfTurn(Symbol),
    #[error("no empty cell left to play")]
    NoMoveAvailable,
    #[error("session already finished")]
    SessionFinished,
    #[error("game aborted by the user")]
    Aborted,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SessionError {
    /// Errors during connection setup after which the user may simply try again.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SessionError::ConnectionTimeout { .. }
                | SessionError::InvalidAddress(_)
                | SessionError::Io(_)
        )
    }

    /// The peer went away or sent something unusable, as opposed to a local decision.
    pub fn is_connection_failure(&self) -> bool {
        matches!(
            self,
            SessionError::PeerDisconnected
                | SessionError::Decode(_)
                | SessionError::UnexpectedMessage { .. }
                | SessionError::IllegalMove { .. }
                | SessionError::OutOfTurn(_)
                | SessionError::Io(_)
        )
    }
}
