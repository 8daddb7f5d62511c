//! Single-process games: both sides share one controller with no local
//! identity (hot-seat), so every intent is admitted for whoever is to move.

use alloc::boxed::Box;

use rand::rngs::SmallRng;

use crate::core::{GameState, Intent, MoveError, Outcome, PlayerId, TurnController, TurnPhase};
use crate::player::Player;

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Won(PlayerId),
    /// The turn cap was reached with no winner.
    TurnLimit,
    /// The side to move produced no action.
    Resigned(PlayerId),
}

/// Result of [`play_local`].
#[derive(Debug, Clone)]
pub struct Finished {
    pub state: GameState,
    pub end: SessionEnd,
    /// Completed turns (slide plus relocation) before the end.
    pub turns: u32,
}

/// Run one turn phase for `player`: a slide, or a pickup followed by a drop.
/// `None` when the player has nothing to offer.
pub fn play_phase(
    controller: &mut TurnController,
    player: &mut dyn Player,
    rng: &mut SmallRng,
) -> Option<Outcome> {
    let state = controller.state().clone();
    let outcome = match state.phase {
        TurnPhase::MovePawn => {
            let (from, to) = player.choose_pawn_move(&state, rng)?;
            controller.handle(Intent::MovePawn { from, to })
        }
        TurnPhase::RelocateRing => {
            let (from, to) = player.choose_relocation(&state, rng)?;
            match controller.handle(Intent::PickUpRing(from)) {
                Outcome::Carrying(_) => controller.handle(Intent::DropRing(to)),
                other => other,
            }
        }
    };
    player.handle_outcome(&outcome);
    Some(outcome)
}

/// Play a hot-seat game from the opening until a win, a resignation or
/// `max_turns` completed turns. `players[0]` is player one.
pub fn play_local(
    players: &mut [Box<dyn Player>; 2],
    rng: &mut SmallRng,
    max_turns: Option<u32>,
) -> Result<Finished, MoveError> {
    let mut controller = TurnController::new(None);
    let mut turns = 0u32;
    loop {
        let state = controller.state();
        let end = match state.winner {
            Some(winner) => Some(SessionEnd::Won(winner)),
            None if max_turns.is_some_and(|cap| turns >= cap) => Some(SessionEnd::TurnLimit),
            None => None,
        };
        if let Some(end) = end {
            log::info!("Game over after {} turns: {:?}", turns, end);
            return Ok(Finished {
                state: state.clone(),
                end,
                turns,
            });
        }

        let mover = state.current_player;
        let player = &mut players[usize::from(mover.number() - 1)];
        match play_phase(&mut controller, player.as_mut(), rng) {
            None => {
                log::info!("{} has no action to offer", mover);
                return Ok(Finished {
                    state: controller.state().clone(),
                    end: SessionEnd::Resigned(mover),
                    turns,
                });
            }
            Some(Outcome::Ignored(reason)) => return Err(reason),
            Some(Outcome::RingRelocated { .. }) => turns += 1,
            Some(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::AiPlayer;
    use rand::SeedableRng;

    fn ai_pair() -> [Box<dyn Player>; 2] {
        [Box::new(AiPlayer::new()), Box::new(AiPlayer::new())]
    }

    #[test]
    fn ai_game_respects_the_turn_cap() {
        let mut rng = SmallRng::seed_from_u64(12345);
        let finished = play_local(&mut ai_pair(), &mut rng, Some(5)).unwrap();
        assert!(finished.turns <= 5);
        match finished.end {
            SessionEnd::TurnLimit => assert_eq!(finished.turns, 5),
            SessionEnd::Won(player) => assert_eq!(finished.state.winner, Some(player)),
            SessionEnd::Resigned(_) => {}
        }
        assert!(finished.state.verify().is_ok());
    }

    #[test]
    fn same_seed_same_game() {
        let a = play_local(&mut ai_pair(), &mut SmallRng::seed_from_u64(7), Some(30)).unwrap();
        let b = play_local(&mut ai_pair(), &mut SmallRng::seed_from_u64(7), Some(30)).unwrap();
        assert_eq!(a.state, b.state);
        assert_eq!(a.end, b.end);
        assert_eq!(a.turns, b.turns);
    }
}
