use std::fmt;

/// Unique identifier for a unit on the battlefield.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Player (or AI faction) that controls a set of units and takes turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Owner(pub u32);

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "owner-{}", self.0)
    }
}

/// Monotonic turn counter supplied by the caller; the core never advances it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnNumber(pub u32);

impl TurnNumber {
    pub const ZERO: Self = Self(0);

    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for TurnNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Axial hex coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hex {
    pub q: i32,
    pub r: i32,
}

impl Hex {
    pub const ORIGIN: Self = Self { q: 0, r: 0 };

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Cube coordinates `(x, y, z)` with `x + y + z == 0`.
    pub const fn to_cube(self) -> (i64, i64, i64) {
        let x = self.q as i64;
        let z = self.r as i64;
        (x, -x - z, z)
    }

    /// Hex distance: Chebyshev distance between the cube projections.
    pub fn distance_to(self, other: Hex) -> u32 {
        let (ax, ay, az) = self.to_cube();
        let (bx, by, bz) = other.to_cube();
        let d = (ax - bx).abs().max((ay - by).abs()).max((az - bz).abs());
        u32::try_from(d).unwrap_or(u32::MAX)
    }

    /// Textual bucket key used by the world hex-effect container (`"q,r"`).
    pub fn key(self) -> String {
        format!("{},{}", self.q, self.r)
    }

    /// Parses a `"q,r"` bucket key. Whitespace around components is tolerated.
    pub fn from_key(key: &str) -> Option<Hex> {
        let (q, r) = key.split_once(',')?;
        Some(Hex::new(q.trim().parse().ok()?, r.trim().parse().ok()?))
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

/// Integer resource meter (hp, mp, ap) tracked per unit.
///
/// `current` is kept within `[0, maximum]` by every mutating helper.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: i32,
    pub maximum: i32,
}

impl ResourceMeter {
    pub fn new(current: i32, maximum: i32) -> Self {
        let maximum = maximum.max(0);
        Self {
            current: current.clamp(0, maximum),
            maximum,
        }
    }

    pub fn full(maximum: i32) -> Self {
        Self::new(maximum, maximum)
    }

    pub fn is_empty(&self) -> bool {
        self.current <= 0
    }

    pub fn refill(&mut self) {
        self.current = self.maximum;
    }

    /// Removes up to `amount` points, never going below zero.
    ///
    /// Returns the points actually removed.
    pub fn drain(&mut self, amount: i32) -> i32 {
        let before = self.current;
        self.current = (self.current - amount.max(0)).max(0);
        before - self.current
    }

    /// Restores up to `amount` points, never exceeding the maximum.
    ///
    /// Returns the points actually restored.
    pub fn restore(&mut self, amount: i32) -> i32 {
        let before = self.current;
        self.current = (self.current + amount.max(0)).min(self.maximum).max(before);
        self.current - before
    }

    /// Applies a signed delta clamped at zero from below only.
    pub fn shift_floor_zero(&mut self, delta: i32) {
        self.current = self.current.saturating_add(delta).max(0);
    }
}
