//! Message transports between replicas.
//!
//! Only the in-memory pair ships here. It already moves the length-prefixed
//! frames of [`crate::protocol`], so a socket transport only swaps the queue.

use crate::protocol::Message;

#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()>;
    async fn recv(&mut self) -> anyhow::Result<Message>;
}

pub mod in_memory;
