#![cfg(feature = "std")]

//! Replicated play: each participant runs its own engine and publishes full
//! snapshots after every completed move. Received snapshots overwrite the
//! local state (last write wins) once they pass validation.

use rand::rngs::SmallRng;

use crate::core::{GameState, Intent, Outcome, PlayerId, TurnController, TurnPhase};
use crate::document::GameDocument;
use crate::local::SessionEnd;
use crate::player::Player;
use crate::protocol::{Message, PROTOCOL_VERSION};
use crate::transport::Transport;

/// Fail unless a peer message speaks our protocol version.
fn expect_version(kind: &str, version: u32) -> anyhow::Result<()> {
    if version == PROTOCOL_VERSION {
        return Ok(());
    }
    log::warn!("{} from protocol {}, expected {}", kind, version, PROTOCOL_VERSION);
    Err(anyhow::anyhow!(
        "Protocol version mismatch in {}: expected {}, got {}",
        kind,
        PROTOCOL_VERSION,
        version
    ))
}

/// One participant's engine plus its publication counter.
#[derive(Debug, Clone)]
pub struct Replica {
    controller: TurnController,
    published: u64,
    last_received: Option<u64>,
}

impl Replica {
    pub fn new(identity: Option<PlayerId>) -> Self {
        Self::from_controller(TurnController::new(identity))
    }

    pub fn from_controller(controller: TurnController) -> Self {
        Self {
            controller,
            published: 0,
            last_received: None,
        }
    }

    pub fn state(&self) -> &GameState {
        self.controller.state()
    }

    pub fn controller(&self) -> &TurnController {
        &self.controller
    }

    pub fn identity(&self) -> Option<PlayerId> {
        self.controller.identity()
    }

    pub fn is_my_turn(&self) -> bool {
        self.controller.is_my_turn()
    }

    /// Number of snapshots published so far.
    pub fn published(&self) -> u64 {
        self.published
    }

    /// Sequence number of the last snapshot applied from the peer.
    pub fn last_received(&self) -> Option<u64> {
        self.last_received
    }

    /// Run a local intent. Completed moves come back with the snapshot to
    /// publish; selections, carries and ignored intents stay local.
    pub fn handle(&mut self, intent: Intent) -> (Outcome, Option<Message>) {
        let outcome = self.controller.handle(intent);
        let publish = outcome.is_move().then(|| self.snapshot());
        (outcome, publish)
    }

    /// Snapshot of the current state, consuming one sequence number.
    pub fn snapshot(&mut self) -> Message {
        let seq = self.published;
        self.published += 1;
        Message::Snapshot {
            version: PROTOCOL_VERSION,
            seq,
            document: GameDocument::from(self.controller.state()),
        }
    }

    /// Apply one snapshot from the peer. Impossible snapshots, foreign
    /// protocol versions and any other message are refused and the local
    /// state is kept.
    pub fn receive(&mut self, msg: Message) -> anyhow::Result<()> {
        match msg {
            Message::Snapshot {
                version,
                seq,
                document,
            } => {
                expect_version("Snapshot", version)?;
                let state = document.to_state().map_err(|e| {
                    log::warn!("Rejected snapshot {}: {}", seq, e);
                    anyhow::anyhow!(e)
                })?;
                if let Some(prev) = self.last_received {
                    if seq <= prev {
                        log::debug!("Snapshot {} arrived after {}; applying anyway", seq, prev);
                    }
                }
                self.last_received = Some(seq);
                self.controller.replace_state(state);
                Ok(())
            }
            other => {
                log::warn!("Unexpected message outside handshake: {:?}", other);
                Err(anyhow::anyhow!("Unexpected message: {:?}", other))
            }
        }
    }
}

/// Drives one replica with a player over a transport.
pub struct PlayerNode {
    player: Box<dyn Player>,
    replica: Replica,
    transport: Box<dyn Transport>,
    max_turns: Option<u32>,
}

impl PlayerNode {
    pub fn new(player: Box<dyn Player>, replica: Replica, transport: Box<dyn Transport>) -> Self {
        Self {
            player,
            replica,
            transport,
            max_turns: None,
        }
    }

    /// Stop after `turns` completed turns (one slide plus one relocation each).
    pub fn with_max_turns(mut self, turns: u32) -> Self {
        self.max_turns = Some(turns);
        self
    }

    pub fn replica(&self) -> &Replica {
        &self.replica
    }

    /// Exchange `Handshake` and `HandshakeAck`; the initiator speaks first.
    async fn handshake(&mut self, initiator: bool) -> anyhow::Result<()> {
        if initiator {
            self.transport
                .send(Message::Handshake {
                    version: PROTOCOL_VERSION,
                })
                .await?;
        }
        match (initiator, self.transport.recv().await?) {
            (true, Message::HandshakeAck { version }) => expect_version("HandshakeAck", version),
            (false, Message::Handshake { version }) => {
                expect_version("Handshake", version)?;
                self.transport
                    .send(Message::HandshakeAck {
                        version: PROTOCOL_VERSION,
                    })
                    .await
            }
            (_, other) => {
                let wanted = if initiator { "HandshakeAck" } else { "Handshake" };
                log::warn!("Expected {}, got {:?}", wanted, other);
                Err(anyhow::anyhow!(
                    "Expected {}, got unexpected message (closing session)",
                    wanted
                ))
            }
        }
    }

    /// Submit one intent and publish the snapshot if it completed a move.
    async fn act(&mut self, intent: Intent) -> anyhow::Result<Outcome> {
        let (outcome, publish) = self.replica.handle(intent);
        self.player.handle_outcome(&outcome);
        if let Some(msg) = publish {
            self.transport.send(msg).await?;
        }
        Ok(outcome)
    }

    /// Play one full turn for the local identity. Returns `false` when the
    /// player offered no action.
    async fn play_turn(&mut self, rng: &mut SmallRng) -> anyhow::Result<bool> {
        while !self.replica.state().is_over() && self.replica.is_my_turn() {
            let state = self.replica.state().clone();
            let outcome = match state.phase {
                TurnPhase::MovePawn => {
                    let Some((from, to)) = self.player.choose_pawn_move(&state, rng) else {
                        return Ok(false);
                    };
                    self.act(Intent::MovePawn { from, to }).await?
                }
                TurnPhase::RelocateRing => {
                    let Some((from, to)) = self.player.choose_relocation(&state, rng) else {
                        return Ok(false);
                    };
                    match self.act(Intent::PickUpRing(from)).await? {
                        Outcome::Carrying(_) => self.act(Intent::DropRing(to)).await?,
                        ignored => ignored,
                    }
                }
            };
            if let Outcome::Ignored(reason) = outcome {
                return Err(anyhow::anyhow!("Player chose an illegal action: {}", reason));
            }
        }
        Ok(true)
    }

    /// Wait until the peer hands the turn back or the game ends. Returns
    /// `false` when the peer resigned instead.
    async fn await_peer(&mut self) -> anyhow::Result<bool> {
        while !self.replica.state().is_over() && !self.replica.is_my_turn() {
            match self.transport.recv().await? {
                Message::Resign { version } if version == PROTOCOL_VERSION => return Ok(false),
                msg => {
                    self.replica.receive(msg)?;
                    self.player.handle_opponent_state(self.replica.state());
                }
            }
        }
        Ok(true)
    }

    /// Run the session: handshake, then alternate between playing and
    /// waiting until someone wins or the turn cap is reached.
    pub async fn run(&mut self, rng: &mut SmallRng, initiator: bool) -> anyhow::Result<SessionEnd> {
        self.handshake(initiator).await?;
        let me = self
            .replica
            .identity()
            .ok_or_else(|| anyhow::anyhow!("Replicated play needs a local identity"))?;

        let mut turns = 0u32;
        loop {
            if let Some(winner) = self.replica.state().winner {
                log::info!("Session over: {} won", winner);
                return Ok(SessionEnd::Won(winner));
            }
            if self.max_turns.is_some_and(|cap| turns >= cap) {
                log::info!("Session over: turn limit {} reached", turns);
                return Ok(SessionEnd::TurnLimit);
            }
            if self.replica.is_my_turn() {
                if !self.play_turn(rng).await? {
                    log::info!("{} has no action to offer", me);
                    self.transport
                        .send(Message::Resign {
                            version: PROTOCOL_VERSION,
                        })
                        .await?;
                    return Ok(SessionEnd::Resigned(me));
                }
            } else if !self.await_peer().await? {
                log::info!("{} resigned", me.opponent());
                return Ok(SessionEnd::Resigned(me.opponent()));
            }
            turns += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Hex;

    fn h(q: i32, r: i32) -> Hex {
        Hex::new(q, r)
    }

    #[test]
    fn only_completed_moves_are_published() {
        let mut replica = Replica::new(Some(PlayerId::One));
        let (outcome, publish) = replica.handle(Intent::Click(h(0, -2)));
        assert_eq!(outcome, Outcome::Selected(h(0, -2)));
        assert!(publish.is_none());

        let (_, publish) = replica.handle(Intent::Click(h(0, 1)));
        assert!(matches!(publish, Some(Message::Snapshot { seq: 0, .. })));

        let (_, publish) = replica.handle(Intent::PickUpRing(h(1, 1)));
        assert!(publish.is_none());
        let (_, publish) = replica.handle(Intent::DropRing(h(3, -1)));
        assert!(matches!(publish, Some(Message::Snapshot { seq: 1, .. })));
        assert_eq!(replica.published(), 2);
    }

    #[test]
    fn peer_snapshot_overwrites_local_state() {
        let mut one = Replica::new(Some(PlayerId::One));
        let mut two = Replica::new(Some(PlayerId::Two));
        let (_, msg) = one.handle(Intent::MovePawn { from: h(0, -2), to: h(0, 1) });
        two.receive(msg.unwrap()).unwrap();
        assert_eq!(two.state(), one.state());
        assert_eq!(two.last_received(), Some(0));
    }

    #[test]
    fn impossible_snapshot_is_refused() {
        let mut replica = Replica::new(Some(PlayerId::Two));
        let mut document = GameDocument::from(&GameState::new());
        document.rings.pop();
        let result = replica.receive(Message::Snapshot {
            version: PROTOCOL_VERSION,
            seq: 0,
            document,
        });
        assert!(result.is_err());
        assert_eq!(replica.state(), &GameState::new());
    }

    #[test]
    fn foreign_version_is_refused() {
        let mut replica = Replica::new(Some(PlayerId::Two));
        let result = replica.receive(Message::Snapshot {
            version: PROTOCOL_VERSION + 1,
            seq: 0,
            document: GameDocument::from(&GameState::new()),
        });
        assert!(result.unwrap_err().to_string().contains("version mismatch"));
    }

    #[test]
    fn handshake_outside_session_start_is_refused() {
        let mut replica = Replica::new(Some(PlayerId::Two));
        let err = replica
            .receive(Message::Handshake { version: PROTOCOL_VERSION })
            .unwrap_err();
        assert!(err.to_string().contains("Unexpected message"));
        assert_eq!(replica.state(), &GameState::new());
    }
}
