#![cfg(feature = "std")]

use serde::{Deserialize, Serialize};

use crate::document::GameDocument;

/// Protocol version used in handshake and snapshot messages.
pub const PROTOCOL_VERSION: u32 = 1;

/// Maximum frame body (1 MB); a full snapshot is a few hundred bytes.
pub const MAX_MESSAGE_SIZE: u32 = 1_000_000;

/// Messages exchanged between two replicas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    /// Opening message from the replica that created the game.
    Handshake { version: u32 },
    /// Reply to [`Message::Handshake`].
    HandshakeAck { version: u32 },
    /// Full state published after a completed move. `seq` counts the
    /// sender's publications and is informational only.
    Snapshot {
        version: u32,
        seq: u64,
        document: GameDocument,
    },
    /// The sender has no action to offer and leaves the game.
    Resign { version: u32 },
}

impl Message {
    pub fn version(&self) -> u32 {
        match self {
            Message::Handshake { version }
            | Message::HandshakeAck { version }
            | Message::Snapshot { version, .. }
            | Message::Resign { version } => *version,
        }
    }
}

/// Encode a message as a length-prefixed bincode frame.
pub fn encode_frame(msg: &Message) -> anyhow::Result<Vec<u8>> {
    let data =
        bincode::serialize(msg).map_err(|e| anyhow::anyhow!("Serialization error: {}", e))?;
    if data.len() as u64 > MAX_MESSAGE_SIZE as u64 {
        return Err(anyhow::anyhow!(
            "Message too large: {} bytes (max: {})",
            data.len(),
            MAX_MESSAGE_SIZE
        ));
    }
    let mut frame = Vec::with_capacity(4 + data.len());
    frame.extend_from_slice(&(data.len() as u32).to_be_bytes());
    frame.extend_from_slice(&data);
    Ok(frame)
}

/// Decode one frame produced by [`encode_frame`]. The buffer must hold
/// exactly one frame.
pub fn decode_frame(frame: &[u8]) -> anyhow::Result<Message> {
    if frame.len() < 4 {
        return Err(anyhow::anyhow!("Truncated frame header: {} bytes", frame.len()));
    }
    let (len_buf, body) = frame.split_at(4);
    let len = u32::from_be_bytes([len_buf[0], len_buf[1], len_buf[2], len_buf[3]]);
    if len == 0 {
        return Err(anyhow::anyhow!("Invalid message length: 0"));
    }
    if len > MAX_MESSAGE_SIZE {
        return Err(anyhow::anyhow!(
            "Message too large: {} bytes (max: {})",
            len,
            MAX_MESSAGE_SIZE
        ));
    }
    if body.len() != len as usize {
        return Err(anyhow::anyhow!(
            "Frame length mismatch: header says {}, got {}",
            len,
            body.len()
        ));
    }
    bincode::deserialize(body).map_err(|e| anyhow::anyhow!("Deserialization error: {}", e))
}
