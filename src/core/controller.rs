//! Turn controller: routes renderer intents through the rules, holds the
//! local-only "carried ring" and applies the advisory turn check.

use alloc::vec::Vec;

use super::common::{MoveError, PlayerId, TurnPhase};
use super::game::{GameState, Outcome, Stage};
use super::hex::Hex;
use super::rules;

/// A user intent reported by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Click on a cell during the pawn phase.
    Click(Hex),
    MovePawn { from: Hex, to: Hex },
    PickUpRing(Hex),
    DropRing(Hex),
}

/// Owns one participant's view of the game.
///
/// Every rejected intent is a silent no-op: the returned outcome is
/// [`Outcome::Ignored`] and neither the state nor the carry changes, except
/// for a failed drop, which always ends the carry.
#[derive(Debug, Clone)]
pub struct TurnController {
    state: GameState,
    carrying: Option<Hex>,
    identity: Option<PlayerId>,
}

impl TurnController {
    /// New game from the standard opening. `identity` is the local player in
    /// an online game, or `None` for hot-seat play.
    pub fn new(identity: Option<PlayerId>) -> Self {
        Self::from_state(GameState::new(), identity)
    }

    pub fn from_state(state: GameState, identity: Option<PlayerId>) -> Self {
        Self {
            state,
            carrying: None,
            identity,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn identity(&self) -> Option<PlayerId> {
        self.identity
    }

    /// Origin of the ring currently carried, if any.
    pub fn carrying(&self) -> Option<Hex> {
        self.carrying
    }

    /// Whether the local participant may act now.
    pub fn is_my_turn(&self) -> bool {
        self.identity.map_or(true, |me| me == self.state.current_player)
    }

    /// Overwrite the local state wholesale with a newer snapshot. Any carried
    /// ring is abandoned.
    pub fn replace_state(&mut self, state: GameState) {
        self.carrying = None;
        self.state = state;
    }

    /// Evaluate one intent against the current state.
    pub fn handle(&mut self, intent: Intent) -> Outcome {
        match self.try_handle(intent) {
            Ok(outcome) => {
                match outcome {
                    Outcome::Won { player, .. } => log::info!("{} wins", player),
                    o if o.is_move() => log::info!("{:?}", o),
                    o => log::debug!("{:?}", o),
                }
                outcome
            }
            Err(reason) => {
                log::debug!("Ignored {:?}: {}", intent, reason);
                Outcome::Ignored(reason)
            }
        }
    }

    fn try_handle(&mut self, intent: Intent) -> Result<Outcome, MoveError> {
        if self.state.is_over() {
            return Err(MoveError::GameOver);
        }
        if !self.is_my_turn() {
            return Err(MoveError::NotYourTurn);
        }
        match intent {
            Intent::Click(pos) => self.state.click(pos),
            Intent::MovePawn { from, to } => self.state.move_pawn(from, to),
            Intent::PickUpRing(pos) => self.pick_up(pos),
            Intent::DropRing(target) => self.drop_ring(target),
        }
    }

    fn pick_up(&mut self, pos: Hex) -> Result<Outcome, MoveError> {
        if self.state.phase != TurnPhase::RelocateRing {
            return Err(MoveError::WrongPhase);
        }
        if self.carrying.is_some() {
            return Err(MoveError::AlreadyCarrying);
        }
        rules::check_ring_to_remove(&self.state.board, pos, self.state.last_relocated)?;
        self.carrying = Some(pos);
        Ok(Outcome::Carrying(pos))
    }

    fn drop_ring(&mut self, target: Hex) -> Result<Outcome, MoveError> {
        let origin = self.carrying.take().ok_or(MoveError::NotCarrying)?;
        self.state.relocate_ring(origin, target)
    }

    /// Cells to highlight: drop targets while carrying, otherwise whatever
    /// the state offers for its phase. Empty when it is not our turn.
    pub fn highlights(&self) -> Vec<Hex> {
        if !self.is_my_turn() {
            return Vec::new();
        }
        match (self.state.stage(), self.carrying) {
            (Stage::RelocateRing, Some(origin)) => rules::ring_targets(&self.state.board, origin),
            _ => self.state.highlights(),
        }
    }
}
