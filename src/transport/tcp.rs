use std::io::ErrorKind;
use std::net::SocketAddr;

use log::debug;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::{timeout, Duration};

use crate::codec::{encode_message, FrameBuffer};
use crate::config::RECV_BUFFER_SIZE;
use crate::protocol::{DecodeError, Message, SessionError};
use crate::transport::Transport;

/// Messages over a raw TCP stream, one write per message.
pub struct TcpTransport {
    stream: TcpStream,
    frames: FrameBuffer,
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> Self {
        Self {
            stream,
            frames: FrameBuffer::new(),
        }
    }

    /// Connect, giving up after `limit`.
    pub async fn connect(addr: SocketAddr, limit: Duration) -> Result<Self, SessionError> {
        let stream = timeout(limit, TcpStream::connect(addr))
            .await
            .map_err(|_| SessionError::ConnectionTimeout {
                addr,
                timeout: limit,
            })??;
        Ok(Self::new(stream))
    }
}

fn map_io(e: std::io::Error) -> SessionError {
    match e.kind() {
        ErrorKind::UnexpectedEof | ErrorKind::ConnectionReset | ErrorKind::BrokenPipe => {
            SessionError::PeerDisconnected
        }
        _ => SessionError::Io(e),
    }
}

#[async_trait::async_trait]
impl Transport for TcpTransport {
    async fn send(&mut self, msg: Message) -> Result<(), SessionError> {
        let data = encode_message(&msg);
        debug!("tcp send {:?} as {} bytes", msg, data.len());
        self.stream.write_all(&data).await.map_err(map_io)?;
        self.stream.flush().await.map_err(map_io)?;
        Ok(())
    }

    async fn recv(&mut self) -> Result<Message, SessionError> {
        let mut chunk = [0u8; RECV_BUFFER_SIZE];
        loop {
            if let Some(msg) = self.frames.next_message()? {
                debug!("tcp recv {:?}", msg);
                return Ok(msg);
            }
            let n = self.stream.read(&mut chunk).await.map_err(map_io)?;
            if n == 0 {
                if self.frames.is_idle() {
                    return Err(SessionError::PeerDisconnected);
                }
                return Err(DecodeError::Truncated.into());
            }
            self.frames.extend(&chunk[..n]);
        }
    }

    async fn shutdown(&mut self) -> Result<(), SessionError> {
        match self.stream.shutdown().await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotConnected => Ok(()),
            Err(e) => Err(map_io(e)),
        }
    }
}
