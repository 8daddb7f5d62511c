use rand::rngs::SmallRng;
use rand::Rng;

use crate::core::{check_win, GameState, Hex};

use super::Player;

/// Greedy-then-random player.
#[derive(Debug, Default)]
pub struct AiPlayer;

impl AiPlayer {
    pub fn new() -> Self {
        Self
    }
}

/// A slide for the current player that ends the game, if any.
pub fn winning_move(state: &GameState) -> Option<(Hex, Hex)> {
    state.legal_pawn_moves().into_iter().find(|&(from, to)| {
        let mut board = state.board.clone();
        board.move_pawn(from, to).is_ok() && check_win(&board, state.current_player)
    })
}

fn pick<T: Copy>(items: &[T], rng: &mut SmallRng) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    Some(items[rng.random_range(0..items.len())])
}

impl Player for AiPlayer {
    fn choose_pawn_move(&mut self, state: &GameState, rng: &mut SmallRng) -> Option<(Hex, Hex)> {
        winning_move(state).or_else(|| pick(&state.legal_pawn_moves(), rng))
    }

    fn choose_relocation(
        &mut self,
        state: &GameState,
        rng: &mut SmallRng,
    ) -> Option<(Hex, Hex)> {
        pick(&state.legal_relocations(), rng)
    }
}
