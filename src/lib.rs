#![cfg_attr(not(feature = "std"), no_std)]

mod ai;
mod board;
mod common;
mod config;
mod turn;

#[cfg(feature = "std")]
pub mod codec;
#[cfg(feature = "std")]
mod game;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod player;
#[cfg(feature = "std")]
pub mod protocol;
#[cfg(feature = "std")]
pub mod session;
#[cfg(feature = "std")]
pub mod transport;
#[cfg(feature = "std")]
pub mod ui;

pub mod prelude;

pub use ai::*;
pub use board::*;
pub use common::*;
pub use config::*;
pub use turn::*;

#[cfg(feature = "std")]
pub use game::*;
#[cfg(feature = "std")]
pub use logging::init_logging;
#[cfg(feature = "std")]
pub use player::{AiPlayer, CliPlayer, Player, RemotePlayer};
#[cfg(feature = "std")]
pub use protocol::*;
#[cfg(feature = "std")]
pub use session::Session;
#[cfg(feature = "std")]
pub use transport::{in_memory::InMemoryTransport, tcp::TcpTransport, Transport};
#[cfg(feature = "std")]
pub use ui::{GameView, NullView, TerminalView};
