//! Common types for the engine: player ids, phases and rejection reasons.

use super::hex::Hex;
use core::fmt;

/// One of the two seats at the table. Encoded as `1` / `2` on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    pub fn opponent(self) -> PlayerId {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            PlayerId::One => 1,
            PlayerId::Two => 2,
        }
    }
}

impl From<PlayerId> for u8 {
    fn from(player: PlayerId) -> u8 {
        player.number()
    }
}

/// Raised when a player number other than 1 or 2 is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidPlayerId(pub u8);

impl fmt::Display for InvalidPlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid player id {} (expected 1 or 2)", self.0)
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = InvalidPlayerId;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PlayerId::One),
            2 => Ok(PlayerId::Two),
            other => Err(InvalidPlayerId(other)),
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.number())
    }
}

/// The two halves of a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnPhase {
    #[cfg_attr(feature = "std", serde(rename = "MOVE_PAWN"))]
    MovePawn,
    #[cfg_attr(feature = "std", serde(rename = "RELOCATE_RING"))]
    RelocateRing,
}

/// Why an intent was not applied. The engine itself treats every one of these
/// as a no-op; the value only exists for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// A winner has already been declared.
    GameOver,
    /// The intent does not belong to the current phase.
    WrongPhase,
    /// The local participant is not the current player.
    NotYourTurn,
    /// No ring at the given coordinate.
    NoRing(Hex),
    /// Destination ring already holds a pawn.
    Occupied(Hex),
    /// Source and destination are not on a common axial line.
    NotColinear,
    /// A missing ring or a pawn interrupts the slide.
    PathBlocked(Hex),
    /// The pawn could slide further; it must travel to the limit.
    NotAtLimit,
    /// The clicked pawn does not belong to the current player.
    NotOwnPawn,
    /// Ring carries a pawn and cannot be lifted.
    CarriesPawn,
    /// Ring is fully surrounded.
    NotPeripheral,
    /// Ring was placed by the immediately preceding relocation.
    JustRelocated,
    /// Lifting the ring would split the board.
    WouldDisconnect,
    /// Ring dropped back where it came from.
    SameCell,
    /// Drop target already holds a ring.
    TargetOccupied(Hex),
    /// Drop target touches fewer than the required number of rings.
    InsufficientAnchors { touching: usize },
    /// A drop arrived without a ring being carried.
    NotCarrying,
    /// A pickup arrived while a ring is already carried.
    AlreadyCarrying,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::GameOver => write!(f, "Game is already over"),
            MoveError::WrongPhase => write!(f, "Action does not belong to the current phase"),
            MoveError::NotYourTurn => write!(f, "Not your turn"),
            MoveError::NoRing(h) => write!(f, "No ring at {}", h),
            MoveError::Occupied(h) => write!(f, "Ring at {} already holds a pawn", h),
            MoveError::NotColinear => write!(f, "Pawns only move along straight lines"),
            MoveError::PathBlocked(h) => write!(f, "Slide is blocked at {}", h),
            MoveError::NotAtLimit => write!(f, "Pawn must slide as far as it can"),
            MoveError::NotOwnPawn => write!(f, "That pawn belongs to the other player"),
            MoveError::CarriesPawn => write!(f, "Ring carries a pawn"),
            MoveError::NotPeripheral => write!(f, "Only rings on the edge may move"),
            MoveError::JustRelocated => write!(f, "Ring was moved on the previous turn"),
            MoveError::WouldDisconnect => write!(f, "Removing the ring would split the board"),
            MoveError::SameCell => write!(f, "Ring dropped on its own cell"),
            MoveError::TargetOccupied(h) => write!(f, "A ring already sits at {}", h),
            MoveError::InsufficientAnchors { touching } => {
                write!(f, "Target touches {} ring(s); at least 2 required", touching)
            }
            MoveError::NotCarrying => write!(f, "No ring is being carried"),
            MoveError::AlreadyCarrying => write!(f, "A ring is already being carried"),
        }
    }
}

/// Structural errors raised while building or mutating a board directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Two rings were given the same coordinate.
    DuplicateRing(Hex),
    /// No ring at the coordinate.
    MissingRing(Hex),
    /// Ring already holds a pawn.
    Occupied(Hex),
    /// Ring holds no pawn.
    NoPawn(Hex),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::DuplicateRing(h) => write!(f, "Duplicate ring at {}", h),
            BoardError::MissingRing(h) => write!(f, "No ring at {}", h),
            BoardError::Occupied(h) => write!(f, "Ring at {} is occupied", h),
            BoardError::NoPawn(h) => write!(f, "No pawn on ring at {}", h),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MoveError {}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}

#[cfg(feature = "std")]
impl std::error::Error for InvalidPlayerId {}
