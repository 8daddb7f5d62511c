#![cfg_attr(not(feature = "std"), no_std)]

//! Nonaga: hexagonal ring board, sliding pawns, relocatable rings.
//!
//! [`core`] holds the rule engine and builds without `std`. The remaining
//! modules (snapshot documents, protocol frames, replicas, terminal players)
//! need the `std` feature.

extern crate alloc;

pub mod core;
pub mod local;
pub mod player;
pub mod prelude;

#[cfg(feature = "std")]
pub mod document;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod node;
#[cfg(feature = "std")]
pub mod protocol;
#[cfg(feature = "std")]
pub mod transport;
#[cfg(feature = "std")]
pub mod ui;

pub use crate::core::*;
pub use local::{play_local, Finished, SessionEnd};
pub use player::{AiPlayer, Player};

#[cfg(feature = "std")]
pub use document::{GameDocument, RingDoc, SnapshotError};
#[cfg(feature = "std")]
pub use logging::init_logging;
#[cfg(feature = "std")]
pub use node::{PlayerNode, Replica};
#[cfg(feature = "std")]
pub use player::CliPlayer;
#[cfg(feature = "std")]
pub use protocol::{decode_frame, encode_frame, Message, MAX_MESSAGE_SIZE, PROTOCOL_VERSION};
