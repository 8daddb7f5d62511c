//! Player trait and implementations
//!
//! - AiPlayer: takes a winning slide when it sees one, otherwise plays a
//!   random legal action
//! - CliPlayer: interactive terminal player

use crate::core::{GameState, Hex, Outcome};
use rand::rngs::SmallRng;

/// Decides actions for one side of the game.
///
/// Choices are (from, to) pairs; `None` means the player has nothing to
/// offer (no legal action, or input closed).
pub trait Player: Send {
    /// Pick a pawn slide for `state.current_player`.
    fn choose_pawn_move(&mut self, state: &GameState, rng: &mut SmallRng) -> Option<(Hex, Hex)>;

    /// Pick a ring to lift and where to drop it.
    fn choose_relocation(&mut self, state: &GameState, rng: &mut SmallRng)
        -> Option<(Hex, Hex)>;

    /// Inform the player of the outcome of its own action.
    fn handle_outcome(&mut self, _outcome: &Outcome) {}

    /// Inform the player of a position published by the opponent.
    fn handle_opponent_state(&mut self, _state: &GameState) {}
}

pub mod ai;
pub use ai::AiPlayer;

#[cfg(feature = "std")]
pub mod cli;
#[cfg(feature = "std")]
pub use cli::CliPlayer;
