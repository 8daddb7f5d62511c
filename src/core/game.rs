//! The replicated game state and the pure transitions between states.

use alloc::vec::Vec;
use core::fmt;

use super::board::Board;
use super::common::{MoveError, PlayerId, TurnPhase};
use super::config::{PAWNS_PER_PLAYER, RING_COUNT};
use super::hex::Hex;
use super::{rules, win};

/// Full snapshot exchanged between participants and handed to renderers.
///
/// `selected_pawn` and `last_relocated` are coordinates, never references
/// into the board, so a clone is always self-contained.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    pub current_player: PlayerId,
    pub phase: TurnPhase,
    pub selected_pawn: Option<Hex>,
    pub last_relocated: Option<Hex>,
    pub winner: Option<PlayerId>,
}

/// Where the turn state machine currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    MovePawn,
    RelocateRing,
    GameOver,
}

/// A complete move, independent of any pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Click on a cell during the pawn phase (select, deselect, move).
    Click(Hex),
    MovePawn { from: Hex, to: Hex },
    RelocateRing { from: Hex, to: Hex },
}

/// What an intent did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Selected(Hex),
    SelectionCleared,
    PawnMoved { from: Hex, to: Hex },
    /// The slide completed a winning formation.
    Won { player: PlayerId, from: Hex, to: Hex },
    /// A ring was lifted and is now carried locally.
    Carrying(Hex),
    RingRelocated { from: Hex, to: Hex },
    /// Rejected; nothing changed.
    Ignored(MoveError),
}

impl Outcome {
    /// True for outcomes that completed a move and should be published.
    pub fn is_move(&self) -> bool {
        matches!(
            self,
            Outcome::PawnMoved { .. } | Outcome::Won { .. } | Outcome::RingRelocated { .. }
        )
    }
}

/// A snapshot that could not have been produced by legal play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    RingCount(usize),
    PawnCount { player: PlayerId, count: usize },
    Disconnected,
    SelectionNotOwnPawn(Hex),
    SelectionOutOfPhase,
    MissingRelocatedRing(Hex),
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::RingCount(n) => {
                write!(f, "Board has {} rings, expected {}", n, RING_COUNT)
            }
            StateError::PawnCount { player, count } => write!(
                f,
                "{} has {} pawns, expected {}",
                player, count, PAWNS_PER_PLAYER
            ),
            StateError::Disconnected => write!(f, "Rings do not form a single cluster"),
            StateError::SelectionNotOwnPawn(h) => {
                write!(f, "Selected cell {} is not a pawn of the current player", h)
            }
            StateError::SelectionOutOfPhase => {
                write!(f, "A pawn is selected outside the pawn phase")
            }
            StateError::MissingRelocatedRing(h) => {
                write!(f, "Last relocated ring {} is not on the board", h)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StateError {}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Opening position: standard board, player one to move a pawn.
    pub fn new() -> Self {
        Self::with_board(Board::standard())
    }

    /// Fresh turn state over an arbitrary board.
    pub fn with_board(board: Board) -> Self {
        Self {
            board,
            current_player: PlayerId::One,
            phase: TurnPhase::MovePawn,
            selected_pawn: None,
            last_relocated: None,
            winner: None,
        }
    }

    pub fn stage(&self) -> Stage {
        match (self.winner, self.phase) {
            (Some(_), _) => Stage::GameOver,
            (None, TurnPhase::MovePawn) => Stage::MovePawn,
            (None, TurnPhase::RelocateRing) => Stage::RelocateRing,
        }
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    fn expect_phase(&self, phase: TurnPhase) -> Result<(), MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        if self.phase != phase {
            return Err(MoveError::WrongPhase);
        }
        Ok(())
    }

    /// Apply `action`, leaving `self` untouched when it is rejected.
    pub fn perform(&mut self, action: Action) -> Result<Outcome, MoveError> {
        match action {
            Action::Click(pos) => self.click(pos),
            Action::MovePawn { from, to } => self.move_pawn(from, to),
            Action::RelocateRing { from, to } => self.relocate_ring(from, to),
        }
    }

    /// Pure form of [`perform`](Self::perform): the state after `action`, or
    /// an unchanged copy when the action is illegal.
    pub fn apply(&self, action: Action) -> GameState {
        let mut next = self.clone();
        match next.perform(action) {
            Ok(_) => next,
            Err(_) => self.clone(),
        }
    }

    /// Click handling for the pawn phase.
    ///
    /// Selects an own pawn, deselects on a second click of the same cell,
    /// moves to a legal target, switches to another own pawn, and otherwise
    /// drops the selection without moving.
    pub fn click(&mut self, pos: Hex) -> Result<Outcome, MoveError> {
        self.expect_phase(TurnPhase::MovePawn)?;
        let own = self.board.pawn_at(pos) == Some(self.current_player);
        match self.selected_pawn {
            None if own => {
                self.selected_pawn = Some(pos);
                Ok(Outcome::Selected(pos))
            }
            None => match self.board.ring_at(pos) {
                None => Err(MoveError::NoRing(pos)),
                Some(_) => Err(MoveError::NotOwnPawn),
            },
            Some(selected) if selected == pos => {
                self.selected_pawn = None;
                Ok(Outcome::SelectionCleared)
            }
            Some(selected) if rules::is_valid_pawn_move(&self.board, selected, pos) => {
                self.move_pawn(selected, pos)
            }
            Some(_) if own => {
                self.selected_pawn = Some(pos);
                Ok(Outcome::Selected(pos))
            }
            Some(_) => {
                self.selected_pawn = None;
                Ok(Outcome::SelectionCleared)
            }
        }
    }

    /// Slide the current player's pawn from `from` to `to`.
    pub fn move_pawn(&mut self, from: Hex, to: Hex) -> Result<Outcome, MoveError> {
        self.expect_phase(TurnPhase::MovePawn)?;
        match self.board.pawn_at(from) {
            Some(p) if p == self.current_player => {}
            Some(_) => return Err(MoveError::NotOwnPawn),
            None if self.board.contains(from) => return Err(MoveError::NotOwnPawn),
            None => return Err(MoveError::NoRing(from)),
        }
        rules::check_pawn_move(&self.board, from, to)?;

        let player = self
            .board
            .move_pawn(from, to)
            .map_err(|_| MoveError::NoRing(from))?;
        self.selected_pawn = None;

        if win::check_win(&self.board, player) {
            self.winner = Some(player);
            Ok(Outcome::Won { player, from, to })
        } else {
            self.phase = TurnPhase::RelocateRing;
            Ok(Outcome::PawnMoved { from, to })
        }
    }

    /// Move the ring at `from` to `to` and pass the turn.
    pub fn relocate_ring(&mut self, from: Hex, to: Hex) -> Result<Outcome, MoveError> {
        self.expect_phase(TurnPhase::RelocateRing)?;
        rules::check_ring_to_remove(&self.board, from, self.last_relocated)?;
        rules::check_ring_target(&self.board, from, to)?;

        self.board
            .relocate_ring(from, to)
            .map_err(|_| MoveError::TargetOccupied(to))?;
        self.last_relocated = Some(to);
        self.current_player = self.current_player.opponent();
        self.phase = TurnPhase::MovePawn;
        Ok(Outcome::RingRelocated { from, to })
    }

    /// Cells a renderer should highlight for the current selection and phase.
    pub fn highlights(&self) -> Vec<Hex> {
        match (self.stage(), self.selected_pawn) {
            (Stage::MovePawn, Some(from)) => rules::pawn_targets(&self.board, from),
            (Stage::RelocateRing, _) => rules::removable_rings(&self.board, self.last_relocated),
            _ => Vec::new(),
        }
    }

    /// Every slide available to the current player.
    pub fn legal_pawn_moves(&self) -> Vec<(Hex, Hex)> {
        if self.stage() != Stage::MovePawn {
            return Vec::new();
        }
        rules::pawn_moves(&self.board, &self.board.pawns(self.current_player))
    }

    /// Every (pickup, drop) pair available to the current player.
    pub fn legal_relocations(&self) -> Vec<(Hex, Hex)> {
        if self.stage() != Stage::RelocateRing {
            return Vec::new();
        }
        rules::relocations(&self.board, self.last_relocated)
    }

    /// Reject snapshots that legal play from the standard opening cannot
    /// produce: wrong ring or pawn counts, a split board, or dangling
    /// selection / relocation markers.
    pub fn verify(&self) -> Result<(), StateError> {
        if self.board.len() != RING_COUNT {
            return Err(StateError::RingCount(self.board.len()));
        }
        for player in PlayerId::ALL {
            let count = self.board.pawns(player).len();
            if count != PAWNS_PER_PLAYER {
                return Err(StateError::PawnCount { player, count });
            }
        }
        if !self.board.is_connected() {
            return Err(StateError::Disconnected);
        }
        if let Some(sel) = self.selected_pawn {
            if self.phase != TurnPhase::MovePawn {
                return Err(StateError::SelectionOutOfPhase);
            }
            if self.board.pawn_at(sel) != Some(self.current_player) {
                return Err(StateError::SelectionNotOwnPawn(sel));
            }
        }
        if let Some(last) = self.last_relocated {
            if !self.board.contains(last) {
                return Err(StateError::MissingRelocatedRing(last));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(q: i32, r: i32) -> Hex {
        Hex::new(q, r)
    }

    #[test]
    fn opening_state() {
        let state = GameState::new();
        assert_eq!(state.stage(), Stage::MovePawn);
        assert_eq!(state.current_player, PlayerId::One);
        assert_eq!(state.winner, None);
        assert!(state.verify().is_ok());
        assert!(state.highlights().is_empty());
    }

    #[test]
    fn click_selects_deselects_and_moves() {
        let mut state = GameState::new();
        assert_eq!(state.click(h(0, -2)), Ok(Outcome::Selected(h(0, -2))));
        assert_eq!(state.highlights().len(), 3);
        assert_eq!(state.click(h(0, -2)), Ok(Outcome::SelectionCleared));
        assert_eq!(state.selected_pawn, None);

        state.click(h(0, -2)).unwrap();
        assert_eq!(state.click(h(2, 0)), Ok(Outcome::Selected(h(2, 0))));
        assert_eq!(
            state.click(h(0, 1)),
            Ok(Outcome::SelectionCleared),
            "illegal target clears the selection"
        );
        assert_eq!(state.phase, TurnPhase::MovePawn);

        state.click(h(0, -2)).unwrap();
        assert_eq!(
            state.click(h(0, 1)),
            Ok(Outcome::PawnMoved { from: h(0, -2), to: h(0, 1) })
        );
        assert_eq!(state.phase, TurnPhase::RelocateRing);
        assert_eq!(state.selected_pawn, None);
        assert_eq!(state.board.pawn_at(h(0, 1)), Some(PlayerId::One));
    }

    #[test]
    fn cannot_select_opponent_pawn() {
        let mut state = GameState::new();
        assert_eq!(state.click(h(2, -2)), Err(MoveError::NotOwnPawn));
        assert_eq!(state.click(h(7, 7)), Err(MoveError::NoRing(h(7, 7))));
        assert_eq!(state.selected_pawn, None);
    }

    #[test]
    fn full_turn_passes_control() {
        let mut state = GameState::new();
        state.move_pawn(h(0, -2), h(0, 1)).unwrap();
        assert_eq!(
            state.move_pawn(h(2, 0), h(1, 0)),
            Err(MoveError::WrongPhase),
            "only one slide per turn"
        );
        let outcome = state.relocate_ring(h(1, 1), h(3, -1)).unwrap();
        assert_eq!(outcome, Outcome::RingRelocated { from: h(1, 1), to: h(3, -1) });
        assert_eq!(state.current_player, PlayerId::Two);
        assert_eq!(state.phase, TurnPhase::MovePawn);
        assert_eq!(state.last_relocated, Some(h(3, -1)));
        assert!(state.verify().is_ok());
    }

    #[test]
    fn rejected_actions_leave_state_untouched() {
        let state = GameState::new();
        let after = state.apply(Action::MovePawn { from: h(0, -2), to: h(0, 0) });
        assert_eq!(after, state);
        let after = state.apply(Action::RelocateRing { from: h(1, 1), to: h(3, -1) });
        assert_eq!(after, state);
        let after = state.apply(Action::MovePawn { from: h(2, -2), to: h(1, -2) });
        assert_eq!(after, state, "player two cannot move on player one's turn");
    }

    #[test]
    fn winning_slide_skips_relocation() {
        let mut state = GameState::new();
        // Bring player one's pawns next to each other by hand.
        state.board.move_pawn(h(2, 0), h(1, 0)).unwrap();
        state.board.move_pawn(h(-2, 2), h(-1, 1)).unwrap();
        // (0,-2) slides down the column, stops before the pawn at (0,2) and
        // lands between (1,0) and (-1,1).
        let outcome = state.move_pawn(h(0, -2), h(0, 1)).unwrap();
        assert_eq!(
            outcome,
            Outcome::Won { player: PlayerId::One, from: h(0, -2), to: h(0, 1) }
        );
        assert_eq!(state.stage(), Stage::GameOver);
        assert_eq!(state.phase, TurnPhase::MovePawn);
        assert_eq!(state.click(h(0, 1)), Err(MoveError::GameOver));
        assert!(state.legal_pawn_moves().is_empty());
    }

    #[test]
    fn verify_rejects_impossible_snapshots() {
        let mut state = GameState::new();
        state.board.relocate_ring(h(1, 1), h(9, 9)).unwrap();
        assert_eq!(state.verify(), Err(StateError::Disconnected));

        let mut state = GameState::new();
        state.selected_pawn = Some(h(2, -2));
        assert_eq!(state.verify(), Err(StateError::SelectionNotOwnPawn(h(2, -2))));

        let state = GameState::with_board(Board::from_coords(Hex::spiral(1)).unwrap());
        assert_eq!(state.verify(), Err(StateError::RingCount(7)));
    }

    #[test]
    fn legal_moves_follow_the_phase() {
        let mut state = GameState::new();
        assert!(!state.legal_pawn_moves().is_empty());
        assert!(state.legal_relocations().is_empty());
        state.move_pawn(h(0, -2), h(0, 1)).unwrap();
        assert!(state.legal_pawn_moves().is_empty());
        let relocations = state.legal_relocations();
        assert!(!relocations.is_empty());
        for (from, to) in relocations {
            let next = state.apply(Action::RelocateRing { from, to });
            assert_eq!(next.current_player, PlayerId::Two);
            assert!(next.verify().is_ok());
        }
    }
}
