//! Wire encoding for moves and negotiation messages.
//!
//! Moves travel as a JSON array `[row, col]`, the symbol assignment as a
//! single un-encoded `X`/`O` byte and names as JSON strings. Nothing is
//! length-prefixed, so [`FrameBuffer`] recovers message boundaries from a
//! byte stream that may split or coalesce writes.

use std::string::{String, ToString};
use std::vec::Vec;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::common::{Move, Symbol};
use crate::protocol::{DecodeError, Message};

/// Serialize a move as compact `[row,col]`.
pub fn encode(mv: Move) -> Vec<u8> {
    Value::from(vec![mv.row(), mv.col()]).to_string().into_bytes()
}

/// Parse a complete payload holding exactly one move.
pub fn decode(bytes: &[u8]) -> Result<Move, DecodeError> {
    let trimmed = bytes.trim_ascii();
    if trimmed.is_empty() {
        return Err(DecodeError::Empty);
    }
    let pair: [usize; 2] = serde_json::from_slice(trimmed).map_err(|e| {
        if e.is_eof() {
            DecodeError::Truncated
        } else {
            DecodeError::Malformed(e.to_string())
        }
    })?;
    to_move(pair)
}

/// Serialize any message for a single write.
pub fn encode_message(msg: &Message) -> Vec<u8> {
    match msg {
        Message::Assign(symbol) => {
            let mut buf = [0u8; 4];
            symbol.as_char().encode_utf8(&mut buf).as_bytes().to_vec()
        }
        Message::Name(name) => Value::String(name.clone()).to_string().into_bytes(),
        Message::Move(mv) => encode(*mv),
    }
}

/// Try to pull one message off the front of `buf`.
///
/// Returns the message and the number of bytes it used, `Ok(None)` when more
/// bytes are needed, or an error if the bytes can never form a message.
pub fn decode_message(buf: &[u8]) -> Result<Option<(Message, usize)>, DecodeError> {
    let skip = buf.iter().take_while(|b| b.is_ascii_whitespace()).count();
    let rest = &buf[skip..];
    let Some(&first) = rest.first() else {
        return Ok(None);
    };
    match first {
        b'X' => Ok(Some((Message::Assign(Symbol::X), skip + 1))),
        b'O' => Ok(Some((Message::Assign(Symbol::O), skip + 1))),
        b'[' => match json_prefix::<[usize; 2]>(rest)? {
            Some((pair, used)) => Ok(Some((Message::Move(to_move(pair)?), skip + used))),
            None => Ok(None),
        },
        b'"' => match json_prefix::<String>(rest)? {
            Some((name, used)) => Ok(Some((Message::Name(name), skip + used))),
            None => Ok(None),
        },
        other => Err(DecodeError::UnexpectedByte(other)),
    }
}

fn to_move([row, col]: [usize; 2]) -> Result<Move, DecodeError> {
    Move::new(row, col).map_err(|_| DecodeError::OutOfRange { row, col })
}

fn json_prefix<T: DeserializeOwned>(buf: &[u8]) -> Result<Option<(T, usize)>, DecodeError> {
    let mut stream = serde_json::Deserializer::from_slice(buf).into_iter::<T>();
    match stream.next() {
        Some(Ok(value)) => Ok(Some((value, stream.byte_offset()))),
        Some(Err(e)) if e.is_eof() => Ok(None),
        Some(Err(e)) => Err(DecodeError::Malformed(e.to_string())),
        None => Ok(None),
    }
}

/// Accumulates received bytes and hands out whole messages.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    buf: Vec<u8>,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Next complete message, if one is buffered.
    pub fn next_message(&mut self) -> Result<Option<Message>, DecodeError> {
        match decode_message(&self.buf)? {
            Some((msg, used)) => {
                self.buf.drain(..used);
                Ok(Some(msg))
            }
            None => Ok(None),
        }
    }

    /// `true` if only whitespace (or nothing) is buffered.
    pub fn is_idle(&self) -> bool {
        self.buf.iter().all(|b| b.is_ascii_whitespace())
    }
}
