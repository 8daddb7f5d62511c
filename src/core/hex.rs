//! Axial hex coordinates: arithmetic, distance, straight lines and the
//! pixel snapping contract shared with renderers.

use core::fmt;
use core::ops::{Add, Mul, Sub};

/// Axial coordinate `(q, r)`. The cube coordinate `s = -q - r` is derived.
///
/// Arithmetic wraps at the `i32` bounds, so cells snapped from far off-board
/// pixels stay ordinary values that simply touch no ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Hex {
    pub q: i32,
    pub r: i32,
}

/// The six unit directions, in the order used throughout the engine.
pub const DIRECTIONS: [Hex; 6] = [
    Hex::new(1, 0),
    Hex::new(1, -1),
    Hex::new(0, -1),
    Hex::new(-1, 0),
    Hex::new(-1, 1),
    Hex::new(0, 1),
];

impl Hex {
    pub const ORIGIN: Hex = Hex::new(0, 0);

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Derived third cube coordinate.
    pub const fn s(self) -> i32 {
        self.q.wrapping_neg().wrapping_sub(self.r)
    }

    /// Translate by a direction (or any offset).
    pub const fn add(self, dir: Hex) -> Hex {
        Hex::new(self.q.wrapping_add(dir.q), self.r.wrapping_add(dir.r))
    }

    pub const fn scale(self, k: i32) -> Hex {
        Hex::new(self.q.wrapping_mul(k), self.r.wrapping_mul(k))
    }

    /// Hex distance: `(|dq| + |dr| + |ds|) / 2`.
    pub fn distance(self, other: Hex) -> u32 {
        let d = other - self;
        let sum = u64::from(d.q.unsigned_abs())
            + u64::from(d.r.unsigned_abs())
            + u64::from(d.s().unsigned_abs());
        // Each term is at most 2^31, so the half always fits.
        (sum / 2) as u32
    }

    /// Distance from the origin.
    pub fn length(self) -> u32 {
        self.distance(Hex::ORIGIN)
    }

    /// True when `other` lies on one of the three axial lines through `self`.
    pub fn is_colinear(self, other: Hex) -> bool {
        let d = other - self;
        d.q == 0 || d.r == 0 || d.s() == 0
    }

    /// Unit direction from `self` toward `other`.
    ///
    /// Only defined for distinct, colinear cells; `None` otherwise.
    pub fn line_step(self, other: Hex) -> Option<Hex> {
        if self == other || !self.is_colinear(other) {
            return None;
        }
        let d = other - self;
        let dist = self.distance(other) as i32;
        Some(Hex::new(d.q / dist, d.r / dist))
    }

    /// The six surrounding cells.
    pub fn neighbors(self) -> [Hex; 6] {
        DIRECTIONS.map(|dir| self.add(dir))
    }

    pub fn is_adjacent(self, other: Hex) -> bool {
        self.distance(other) == 1
    }

    /// Every cell within `radius` of the origin, ordered by `q` then `r`.
    pub fn spiral(radius: i32) -> impl Iterator<Item = Hex> {
        (-radius..=radius).flat_map(move |q| {
            (-radius..=radius)
                .filter(move |r| (q + r).abs() <= radius)
                .map(move |r| Hex::new(q, r))
        })
    }
}

impl Add for Hex {
    type Output = Hex;

    fn add(self, rhs: Hex) -> Hex {
        Hex::add(self, rhs)
    }
}

impl Sub for Hex {
    type Output = Hex;

    fn sub(self, rhs: Hex) -> Hex {
        Hex::new(self.q.wrapping_sub(rhs.q), self.r.wrapping_sub(rhs.r))
    }
}

impl Mul<i32> for Hex {
    type Output = Hex;

    fn mul(self, k: i32) -> Hex {
        self.scale(k)
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.q, self.r)
    }
}

/// Resolve fractional cube coordinates to the nearest cell.
///
/// Each component is rounded independently; the one with the largest
/// rounding error is then recomputed from the other two so `q + r + s == 0`.
pub fn round(q: f64, r: f64, s: f64) -> Hex {
    let mut rq = libm::round(q);
    let mut rr = libm::round(r);
    let rs = libm::round(s);

    let q_diff = libm::fabs(rq - q);
    let r_diff = libm::fabs(rr - r);
    let s_diff = libm::fabs(rs - s);

    if q_diff > r_diff && q_diff > s_diff {
        rq = -rr - rs;
    } else if r_diff > s_diff {
        rr = -rq - rs;
    }
    Hex::new(rq as i32, rr as i32)
}

/// Flat-topped pixel layout centred on the origin cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    /// Centre-to-corner distance of one cell, in pixels.
    pub size: f64,
}

impl Layout {
    pub const fn new(size: f64) -> Self {
        Self { size }
    }

    /// Centre of `hex` relative to the board centre.
    pub fn to_pixel(&self, hex: Hex) -> (f64, f64) {
        let q = hex.q as f64;
        let r = hex.r as f64;
        let sqrt3 = libm::sqrt(3.0);
        let x = self.size * (1.5 * q);
        let y = self.size * (sqrt3 / 2.0 * q + sqrt3 * r);
        (x, y)
    }

    /// Cell containing the point `(x, y)` relative to the board centre.
    pub fn from_pixel(&self, x: f64, y: f64) -> Hex {
        let sqrt3 = libm::sqrt(3.0);
        let q = (2.0 / 3.0 * x) / self.size;
        let r = (-1.0 / 3.0 * x + sqrt3 / 3.0 * y) / self.size;
        round(q, r, -q - r)
    }
}
