#![cfg(feature = "std")]
//! The flat snapshot document shared with the synchronization layer and
//! renderers:
//!
//! ```json
//! { "rings": [{"q": 0, "r": -2, "pawn": 1}, ...],
//!   "currentPlayer": 1, "turnPhase": "MOVE_PAWN", "selectedPawn": null,
//!   "lastRelocatedRingCoordinate": {"q": 3, "r": -1}, "winner": null }
//! ```

use std::fmt;
use std::string::String;
use std::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::core::{Board, BoardError, GameState, Hex, PlayerId, Ring, StateError, TurnPhase};

/// One ring entry of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RingDoc {
    pub q: i32,
    pub r: i32,
    pub pawn: Option<PlayerId>,
}

/// Serializable form of [`GameState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDocument {
    pub rings: Vec<RingDoc>,
    pub current_player: PlayerId,
    pub turn_phase: TurnPhase,
    #[serde(default)]
    pub selected_pawn: Option<Hex>,
    #[serde(default, alias = "lastRelocatedRingCoords")]
    pub last_relocated_ring_coordinate: Option<Hex>,
    #[serde(default)]
    pub winner: Option<PlayerId>,
}

/// Why a received snapshot was refused.
#[derive(Debug)]
pub enum SnapshotError {
    /// The document could not be parsed.
    Malformed(String),
    /// Two rings share a coordinate.
    Board(BoardError),
    /// The document parses but describes an unreachable position.
    Impossible(StateError),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Malformed(e) => write!(f, "Malformed snapshot: {}", e),
            SnapshotError::Board(e) => write!(f, "Invalid board in snapshot: {}", e),
            SnapshotError::Impossible(e) => write!(f, "Impossible snapshot: {}", e),
        }
    }
}

impl std::error::Error for SnapshotError {}

impl From<BoardError> for SnapshotError {
    fn from(err: BoardError) -> Self {
        SnapshotError::Board(err)
    }
}

impl From<StateError> for SnapshotError {
    fn from(err: StateError) -> Self {
        SnapshotError::Impossible(err)
    }
}

impl From<&GameState> for GameDocument {
    fn from(state: &GameState) -> Self {
        GameDocument {
            rings: state
                .board
                .rings()
                .map(|ring| RingDoc {
                    q: ring.pos.q,
                    r: ring.pos.r,
                    pawn: ring.pawn,
                })
                .collect(),
            current_player: state.current_player,
            turn_phase: state.phase,
            selected_pawn: state.selected_pawn,
            last_relocated_ring_coordinate: state.last_relocated,
            winner: state.winner,
        }
    }
}

impl GameDocument {
    /// Rebuild the state exactly as described, checking only that ring
    /// coordinates are unique.
    pub fn to_state_unchecked(&self) -> Result<GameState, SnapshotError> {
        let board = Board::from_rings(
            self.rings
                .iter()
                .map(|doc| Ring::new(Hex::new(doc.q, doc.r), doc.pawn)),
        )?;
        Ok(GameState {
            board,
            current_player: self.current_player,
            phase: self.turn_phase,
            selected_pawn: self.selected_pawn,
            last_relocated: self.last_relocated_ring_coordinate,
            winner: self.winner,
        })
    }

    /// Rebuild the state and refuse positions legal play cannot reach.
    pub fn to_state(&self) -> Result<GameState, SnapshotError> {
        let state = self.to_state_unchecked()?;
        state.verify()?;
        Ok(state)
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(text).map_err(|e| SnapshotError::Malformed(e.to_string()))
    }
}

impl TryFrom<GameDocument> for GameState {
    type Error = SnapshotError;

    fn try_from(doc: GameDocument) -> Result<Self, Self::Error> {
        doc.to_state()
    }
}

/// Serialize a state straight to its JSON document.
pub fn state_to_json(state: &GameState) -> anyhow::Result<String> {
    GameDocument::from(state).to_json()
}

/// Parse and validate a JSON document.
pub fn state_from_json(text: &str) -> Result<GameState, SnapshotError> {
    GameDocument::from_json(text)?.to_state()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_follow_the_document_shape() {
        let json = state_to_json(&GameState::new()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["currentPlayer"], 1);
        assert_eq!(value["turnPhase"], "MOVE_PAWN");
        assert!(value["selectedPawn"].is_null());
        assert!(value["lastRelocatedRingCoordinate"].is_null());
        assert!(value["winner"].is_null());
        assert_eq!(value["rings"].as_array().unwrap().len(), 19);
        let corner = value["rings"]
            .as_array()
            .unwrap()
            .iter()
            .find(|r| r["q"] == 0 && r["r"] == -2)
            .unwrap();
        assert_eq!(corner["pawn"], 1);
    }

    #[test]
    fn legacy_field_name_is_accepted() {
        let mut value: serde_json::Value =
            serde_json::from_str(&state_to_json(&GameState::new()).unwrap()).unwrap();
        let obj = value.as_object_mut().unwrap();
        obj.remove("lastRelocatedRingCoordinate");
        obj.insert(
            "lastRelocatedRingCoords".into(),
            serde_json::json!({"q": 1, "r": 1}),
        );
        let state = state_from_json(&value.to_string()).unwrap();
        assert_eq!(state.last_relocated, Some(Hex::new(1, 1)));
    }

    #[test]
    fn unknown_player_number_is_malformed() {
        let json = state_to_json(&GameState::new())
            .unwrap()
            .replace("\"currentPlayer\":1", "\"currentPlayer\":3");
        assert!(matches!(
            state_from_json(&json),
            Err(SnapshotError::Malformed(_))
        ));
    }

    #[test]
    fn duplicate_rings_are_rejected() {
        let mut doc = GameDocument::from(&GameState::new());
        let first = doc.rings[0];
        doc.rings.push(first);
        assert!(matches!(doc.to_state(), Err(SnapshotError::Board(_))));
    }

    #[test]
    fn wrong_ring_count_is_rejected() {
        let mut doc = GameDocument::from(&GameState::new());
        doc.rings.retain(|r| !(r.q == 1 && r.r == 1));
        assert!(matches!(
            doc.to_state(),
            Err(SnapshotError::Impossible(StateError::RingCount(18)))
        ));
        assert!(doc.to_state_unchecked().is_ok());
    }
}
