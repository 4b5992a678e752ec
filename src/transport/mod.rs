use crate::protocol::{Message, SessionError};

/// A bidirectional message pipe to the other peer.
#[async_trait::async_trait]
pub trait Transport: Send {
    async fn send(&mut self, msg: Message) -> Result<(), SessionError>;

    /// Wait for the next message. A zero-length read surfaces as
    /// [`SessionError::PeerDisconnected`].
    async fn recv(&mut self) -> Result<Message, SessionError>;

    /// Close our side of the connection.
    async fn shutdown(&mut self) -> Result<(), SessionError> {
        Ok(())
    }
}

pub mod in_memory;
pub mod tcp;
