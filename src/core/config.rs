use super::common::PlayerId;
use super::hex::Hex;

/// Radius of the starting hexagon.
pub const BOARD_RADIUS: i32 = 2;

/// Rings on the standard board; relocation never changes this.
pub const RING_COUNT: usize = 19;

pub const PAWNS_PER_PLAYER: usize = 3;

/// Rings a relocated ring must touch at its destination.
pub const MIN_ANCHORS: usize = 2;

/// Starting pawn positions, alternating around the rim.
pub const INITIAL_PAWNS: [(Hex, PlayerId); 2 * PAWNS_PER_PLAYER] = [
    (Hex::new(0, -2), PlayerId::One),
    (Hex::new(2, 0), PlayerId::One),
    (Hex::new(-2, 2), PlayerId::One),
    (Hex::new(2, -2), PlayerId::Two),
    (Hex::new(0, 2), PlayerId::Two),
    (Hex::new(-2, 0), PlayerId::Two),
];
