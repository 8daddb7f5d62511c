//! Commonly used types and utilities for ease of import.

pub use crate::core::{
    check_win, rules, Action, Board, GameState, Hex, Intent, MoveError, Outcome,
    PlayerId, Stage, TurnController, TurnPhase,
};
pub use crate::local::{play_local, SessionEnd};
pub use crate::player::{AiPlayer, Player};

#[cfg(feature = "std")]
pub use crate::{
    document::GameDocument,
    node::{PlayerNode, Replica},
    player::CliPlayer,
    protocol::Message,
    transport::{in_memory::InMemoryTransport, Transport},
};
