//! Board state: the set of rings keyed by coordinate and their pawns.

use alloc::collections::{BTreeMap, BTreeSet, VecDeque};
use alloc::vec::Vec;
use core::fmt;

use super::common::{BoardError, PlayerId};
use super::config::{BOARD_RADIUS, INITIAL_PAWNS};
use super::hex::Hex;

/// A ring on the board and its occupant, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ring {
    pub pos: Hex,
    pub pawn: Option<PlayerId>,
}

impl Ring {
    pub const fn new(pos: Hex, pawn: Option<PlayerId>) -> Self {
        Self { pos, pawn }
    }

    pub const fn empty(pos: Hex) -> Self {
        Self { pos, pawn: None }
    }

    pub fn is_empty(&self) -> bool {
        self.pawn.is_none()
    }
}

/// Coordinates only; used for hypothetical boards during connectivity checks.
pub type RingSet = BTreeSet<Hex>;

/// Rings addressed by coordinate. Coordinates are unique by construction.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Board {
    rings: BTreeMap<Hex, Option<PlayerId>>,
}

impl Board {
    /// Board with no rings at all.
    pub fn new() -> Self {
        Self {
            rings: BTreeMap::new(),
        }
    }

    /// The radius-2 opening layout with three pawns per player.
    pub fn standard() -> Self {
        let mut rings: BTreeMap<Hex, Option<PlayerId>> =
            Hex::spiral(BOARD_RADIUS).map(|h| (h, None)).collect();
        for (pos, player) in INITIAL_PAWNS {
            rings.insert(pos, Some(player));
        }
        Self { rings }
    }

    /// Build a board from explicit rings, rejecting duplicate coordinates.
    pub fn from_rings<I>(rings: I) -> Result<Self, BoardError>
    where
        I: IntoIterator<Item = Ring>,
    {
        let mut map = BTreeMap::new();
        for ring in rings {
            if map.insert(ring.pos, ring.pawn).is_some() {
                return Err(BoardError::DuplicateRing(ring.pos));
            }
        }
        Ok(Self { rings: map })
    }

    /// Empty rings at the given coordinates; handy for scenario setups.
    pub fn from_coords<I>(coords: I) -> Result<Self, BoardError>
    where
        I: IntoIterator<Item = Hex>,
    {
        Self::from_rings(coords.into_iter().map(Ring::empty))
    }

    pub fn len(&self) -> usize {
        self.rings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    pub fn contains(&self, pos: Hex) -> bool {
        self.rings.contains_key(&pos)
    }

    /// The ring at `pos`, if one exists.
    pub fn ring_at(&self, pos: Hex) -> Option<Ring> {
        self.rings.get(&pos).map(|&pawn| Ring::new(pos, pawn))
    }

    /// Pawn standing at `pos`; `None` for empty or absent rings.
    pub fn pawn_at(&self, pos: Hex) -> Option<PlayerId> {
        self.rings.get(&pos).copied().flatten()
    }

    /// True when a ring exists at `pos` and carries no pawn.
    pub fn is_free(&self, pos: Hex) -> bool {
        matches!(self.rings.get(&pos), Some(None))
    }

    /// All rings in coordinate order.
    pub fn rings(&self) -> impl Iterator<Item = Ring> + '_ {
        self.rings.iter().map(|(&pos, &pawn)| Ring::new(pos, pawn))
    }

    pub fn positions(&self) -> RingSet {
        self.rings.keys().copied().collect()
    }

    /// Positions of `player`'s pawns in coordinate order.
    pub fn pawns(&self, player: PlayerId) -> Vec<Hex> {
        self.rings
            .iter()
            .filter(|&(_, pawn)| *pawn == Some(player))
            .map(|(&pos, _)| pos)
            .collect()
    }

    /// Rings adjacent to `pos`.
    pub fn neighbors(&self, pos: Hex) -> Vec<Ring> {
        pos.neighbors()
            .into_iter()
            .filter_map(|n| self.ring_at(n))
            .collect()
    }

    /// Number of rings adjacent to `pos`.
    pub fn touching(&self, pos: Hex) -> usize {
        pos.neighbors()
            .iter()
            .filter(|&n| self.rings.contains_key(n))
            .count()
    }

    /// A ring is peripheral when at least one of its six neighbours is absent.
    pub fn is_peripheral(&self, pos: Hex) -> bool {
        self.contains(pos) && self.touching(pos) < 6
    }

    /// Whether the board would stay in one piece without the ring at `pos`.
    pub fn is_connected_without(&self, pos: Hex) -> bool {
        let mut rest = self.positions();
        rest.remove(&pos);
        is_connected(&rest)
    }

    /// Whether every ring on the board belongs to a single cluster.
    pub fn is_connected(&self) -> bool {
        is_connected(&self.positions())
    }

    /// Move the pawn on `from` to the empty ring `to`. No rule checks.
    pub fn move_pawn(&mut self, from: Hex, to: Hex) -> Result<PlayerId, BoardError> {
        let pawn = match self.rings.get(&from) {
            None => return Err(BoardError::MissingRing(from)),
            Some(None) => return Err(BoardError::NoPawn(from)),
            Some(Some(p)) => *p,
        };
        match self.rings.get_mut(&to) {
            None => Err(BoardError::MissingRing(to)),
            Some(Some(_)) => Err(BoardError::Occupied(to)),
            Some(slot) => {
                *slot = Some(pawn);
                self.rings.insert(from, None);
                Ok(pawn)
            }
        }
    }

    /// Lift the empty ring at `from` and put it down at `to`. No rule checks.
    pub fn relocate_ring(&mut self, from: Hex, to: Hex) -> Result<(), BoardError> {
        match self.rings.get(&from) {
            None => return Err(BoardError::MissingRing(from)),
            Some(Some(_)) => return Err(BoardError::Occupied(from)),
            Some(None) => {}
        }
        if self.rings.contains_key(&to) {
            return Err(BoardError::DuplicateRing(to));
        }
        self.rings.remove(&from);
        self.rings.insert(to, None);
        Ok(())
    }
}

/// Rings of `subset` adjacent to `pos`.
pub fn neighbors_within(pos: Hex, subset: &RingSet) -> impl Iterator<Item = Hex> + '_ {
    pos.neighbors()
        .into_iter()
        .filter(move |n| subset.contains(n))
}

/// Breadth-first search from any member of `subset`, restricted to `subset`.
/// Empty and single-ring sets are trivially connected.
pub fn is_connected(subset: &RingSet) -> bool {
    let Some(&start) = subset.iter().next() else {
        return true;
    };
    let mut visited = BTreeSet::new();
    let mut queue = VecDeque::new();
    visited.insert(start);
    queue.push_back(start);
    while let Some(current) = queue.pop_front() {
        for n in neighbors_within(current, subset) {
            if visited.insert(n) {
                queue.push_back(n);
            }
        }
    }
    visited.len() == subset.len()
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.rings.iter()).finish()
    }
}
