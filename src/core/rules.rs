//! Move legality: pawn slides, ring pickup and ring placement, plus the
//! enumerations used for highlighting and by computer players.
//!
//! Every check is a pure function of the board and its arguments.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use super::board::Board;
use super::common::MoveError;
use super::config::MIN_ANCHORS;
use super::hex::Hex;

/// Validate a pawn slide from `from` to `to`.
///
/// The destination must be the last free ring reachable along the line:
/// pawns never stop short of an obstruction or the board edge.
pub fn check_pawn_move(board: &Board, from: Hex, to: Hex) -> Result<(), MoveError> {
    if !board.contains(from) {
        return Err(MoveError::NoRing(from));
    }
    match board.ring_at(to) {
        None => return Err(MoveError::NoRing(to)),
        Some(ring) if !ring.is_empty() => return Err(MoveError::Occupied(to)),
        Some(_) => {}
    }
    let step = from.line_step(to).ok_or(MoveError::NotColinear)?;
    let dist = from.distance(to) as i32;

    for i in 1..dist {
        let cell = from + step * i;
        if !board.is_free(cell) {
            return Err(MoveError::PathBlocked(cell));
        }
    }

    if board.is_free(to + step) {
        return Err(MoveError::NotAtLimit);
    }
    Ok(())
}

pub fn is_valid_pawn_move(board: &Board, from: Hex, to: Hex) -> bool {
    check_pawn_move(board, from, to).is_ok()
}

/// Validate lifting the ring at `pos` for relocation.
pub fn check_ring_to_remove(
    board: &Board,
    pos: Hex,
    last_relocated: Option<Hex>,
) -> Result<(), MoveError> {
    let ring = board.ring_at(pos).ok_or(MoveError::NoRing(pos))?;
    if !ring.is_empty() {
        return Err(MoveError::CarriesPawn);
    }
    if !board.is_peripheral(pos) {
        return Err(MoveError::NotPeripheral);
    }
    if last_relocated == Some(pos) {
        return Err(MoveError::JustRelocated);
    }
    if !board.is_connected_without(pos) {
        return Err(MoveError::WouldDisconnect);
    }
    Ok(())
}

pub fn is_valid_ring_to_remove(board: &Board, pos: Hex, last_relocated: Option<Hex>) -> bool {
    check_ring_to_remove(board, pos, last_relocated).is_ok()
}

/// Validate dropping the ring carried from `origin` at `target`, judged
/// against the board with `origin` already lifted.
pub fn check_ring_target(board: &Board, origin: Hex, target: Hex) -> Result<(), MoveError> {
    if target == origin {
        return Err(MoveError::SameCell);
    }
    if board.contains(target) {
        return Err(MoveError::TargetOccupied(target));
    }
    let touching = target
        .neighbors()
        .iter()
        .filter(|&&n| n != origin && board.contains(n))
        .count();
    if touching < MIN_ANCHORS {
        return Err(MoveError::InsufficientAnchors { touching });
    }
    Ok(())
}

pub fn is_valid_ring_target(board: &Board, origin: Hex, target: Hex) -> bool {
    check_ring_target(board, origin, target).is_ok()
}

/// Legal slide destinations for the pawn on `from`, found by running the
/// validator over every ring.
pub fn pawn_targets(board: &Board, from: Hex) -> Vec<Hex> {
    board
        .rings()
        .map(|ring| ring.pos)
        .filter(|&to| is_valid_pawn_move(board, from, to))
        .collect()
}

/// Rings that may be picked up this relocation phase.
pub fn removable_rings(board: &Board, last_relocated: Option<Hex>) -> Vec<Hex> {
    board
        .rings()
        .map(|ring| ring.pos)
        .filter(|&pos| is_valid_ring_to_remove(board, pos, last_relocated))
        .collect()
}

/// Legal drop cells for the ring carried from `origin`.
///
/// Only cells next to some ring can gather two anchors, so the candidates are
/// the empty neighbours of every ring other than `origin`.
pub fn ring_targets(board: &Board, origin: Hex) -> Vec<Hex> {
    let candidates: BTreeSet<Hex> = board
        .rings()
        .filter(|ring| ring.pos != origin)
        .flat_map(|ring| ring.pos.neighbors())
        .filter(|&cell| !board.contains(cell))
        .collect();
    candidates
        .into_iter()
        .filter(|&target| is_valid_ring_target(board, origin, target))
        .collect()
}

/// Every legal pawn slide for the pawns at `pawns`.
pub fn pawn_moves(board: &Board, pawns: &[Hex]) -> Vec<(Hex, Hex)> {
    pawns
        .iter()
        .flat_map(|&from| {
            pawn_targets(board, from)
                .into_iter()
                .map(move |to| (from, to))
        })
        .collect()
}

/// Every legal (pickup, drop) pair.
pub fn relocations(board: &Board, last_relocated: Option<Hex>) -> Vec<(Hex, Hex)> {
    removable_rings(board, last_relocated)
        .into_iter()
        .flat_map(|origin| {
            ring_targets(board, origin)
                .into_iter()
                .map(move |target| (origin, target))
        })
        .collect()
}
