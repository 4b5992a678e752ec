use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::codec::{encode_message, FrameBuffer};
use crate::protocol::{DecodeError, Message, SessionError};
use crate::transport::Transport;

/// In-process byte pipe that goes through the same wire encoding as TCP.
///
/// Dropping one end, or sending an empty chunk, reads as a disconnect on the other.
pub struct InMemoryTransport {
    tx: Option<UnboundedSender<Vec<u8>>>,
    rx: UnboundedReceiver<Vec<u8>>,
    frames: FrameBuffer,
}

impl InMemoryTransport {
    pub fn pair() -> (Self, Self) {
        let (tx1, rx1) = unbounded_channel();
        let (tx2, rx2) = unbounded_channel();
        (
            Self {
                tx: Some(tx2),
                rx: rx1,
                frames: FrameBuffer::new(),
            },
            Self {
                tx: Some(tx1),
                rx: rx2,
                frames: FrameBuffer::new(),
            },
        )
    }

    /// Push arbitrary bytes to the peer, bypassing the encoder.
    pub fn send_raw(&mut self, bytes: &[u8]) -> Result<(), SessionError> {
        let tx = self.tx.as_ref().ok_or(SessionError::SessionFinished)?;
        tx.send(bytes.to_vec())
            .map_err(|_| SessionError::PeerDisconnected)
    }
}

#[async_trait::async_trait]
impl Transport for InMemoryTransport {
    async fn send(&mut self, msg: Message) -> Result<(), SessionError> {
        let data = encode_message(&msg);
        self.send_raw(&data)
    }

    async fn recv(&mut self) -> Result<Message, SessionError> {
        loop {
            if let Some(msg) = self.frames.next_message()? {
                return Ok(msg);
            }
            match self.rx.recv().await {
                Some(chunk) if !chunk.is_empty() => self.frames.extend(&chunk),
                _ if self.frames.is_idle() => return Err(SessionError::PeerDisconnected),
                _ => return Err(DecodeError::Truncated.into()),
            }
        }
    }

    async fn shutdown(&mut self) -> Result<(), SessionError> {
        self.tx = None;
        Ok(())
    }
}
