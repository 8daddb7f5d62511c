//! Core rule engine (no_std compatible)
//!
//! Pure game logic: hex arithmetic, the ring board, move validation, win
//! detection and the turn state machine. Needs only `alloc`, `libm` and the
//! `log` facade, so it can run in a browser build or on a device.

pub mod board;
pub mod common;
pub mod config;
pub mod controller;
pub mod game;
pub mod hex;
pub mod rules;
pub mod win;

// Re-export commonly used types
pub use board::{is_connected, neighbors_within, Board, Ring, RingSet};
pub use common::{BoardError, InvalidPlayerId, MoveError, PlayerId, TurnPhase};
pub use config::*;
pub use controller::{Intent, TurnController};
pub use game::{Action, GameState, Outcome, Stage, StateError};
pub use hex::{Hex, Layout, DIRECTIONS};
pub use win::check_win;
