use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tokio::task::yield_now;

use crate::protocol::{decode_frame, encode_frame, Message};
use crate::transport::Transport;

type FrameQueue = Arc<Mutex<VecDeque<Vec<u8>>>>;

/// One end of a FIFO channel pair living in process memory. Messages travel
/// as the same length-prefixed frames a socket would carry. `recv` fails once
/// the other end is dropped and its queue drained.
pub struct InMemoryTransport {
    recv_queue: FrameQueue,
    send_queue: FrameQueue,
}

impl InMemoryTransport {
    pub fn pair() -> (Self, Self) {
        let q1: FrameQueue = Arc::new(Mutex::new(VecDeque::new()));
        let q2: FrameQueue = Arc::new(Mutex::new(VecDeque::new()));
        (
            Self {
                recv_queue: q1.clone(),
                send_queue: q2.clone(),
            },
            Self {
                recv_queue: q2,
                send_queue: q1,
            },
        )
    }

    /// Frames waiting to be received on this end.
    pub fn pending(&self) -> usize {
        self.recv_queue.lock().map(|q| q.len()).unwrap_or(0)
    }
}

#[async_trait::async_trait]
impl Transport for InMemoryTransport {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        if Arc::strong_count(&self.send_queue) == 1 {
            return Err(anyhow::anyhow!("Channel closed"));
        }
        let frame = encode_frame(&msg)?;
        self.send_queue
            .lock()
            .map_err(|_| anyhow::anyhow!("Channel poisoned"))?
            .push_back(frame);
        Ok(())
    }

    async fn recv(&mut self) -> anyhow::Result<Message> {
        loop {
            let next = self
                .recv_queue
                .lock()
                .map_err(|_| anyhow::anyhow!("Channel poisoned"))?
                .pop_front();
            if let Some(frame) = next {
                return decode_frame(&frame);
            }
            if Arc::strong_count(&self.recv_queue) == 1 {
                return Err(anyhow::anyhow!("Channel closed"));
            }
            yield_now().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::PROTOCOL_VERSION;

    #[tokio::test]
    async fn messages_arrive_in_order() {
        let (mut a, mut b) = InMemoryTransport::pair();
        a.send(Message::Handshake { version: PROTOCOL_VERSION }).await.unwrap();
        a.send(Message::Resign { version: PROTOCOL_VERSION }).await.unwrap();
        assert_eq!(b.pending(), 2);
        assert_eq!(
            b.recv().await.unwrap(),
            Message::Handshake { version: PROTOCOL_VERSION }
        );
        assert_eq!(
            b.recv().await.unwrap(),
            Message::Resign { version: PROTOCOL_VERSION }
        );
    }

    #[tokio::test]
    async fn corrupt_frame_is_reported_on_recv() {
        let (a, mut b) = InMemoryTransport::pair();
        a.send_queue.lock().unwrap().push_back(vec![0, 0, 0, 0]);
        let err = b.recv().await.unwrap_err();
        assert!(err.to_string().contains("Invalid message length"));
    }

    #[tokio::test]
    async fn dropped_peer_closes_the_channel() {
        let (mut a, b) = InMemoryTransport::pair();
        drop(b);
        assert!(a.recv().await.is_err());
        assert!(a.send(Message::Resign { version: PROTOCOL_VERSION }).await.is_err());
    }
}
