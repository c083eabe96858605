//! Logical time model.
//!
//! # Design
//!
//! Time is an abstract integer `Tick` supplied by the command stream.  There
//! is no wall-clock mapping: a tick is whatever unit the order durations are
//! expressed in.
//!
//! The clock only moves forward.  Asking `SimClock` to go back (or stay put)
//! is silently ignored rather than rejected, because commands routinely carry
//! timestamps that are not later than the last one seen.
//!
//! All `Tick` arithmetic saturates: `finish` advances the clock to
//! `Tick::MAX`, and an order created after that must not overflow.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute logical time.
///
/// Signed so that ETA shifts (which subtract twice a duration) can never
/// underflow an unsigned type mid-cascade.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub i64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The latest representable instant.  Advancing to it flushes every order.
    pub const MAX: Tick = Tick(i64::MAX);

    /// Return the tick `n` steps after `self` (or before, for negative `n`).
    #[inline]
    pub fn offset(self, n: i64) -> Tick {
        Tick(self.0.saturating_add(n))
    }

    /// Ticks elapsed from `earlier` to `self` (negative if `earlier` is later).
    #[inline]
    pub fn since(self, earlier: Tick) -> i64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<i64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: i64) -> Tick {
        self.offset(rhs)
    }
}

impl std::ops::AddAssign<i64> for Tick {
    #[inline]
    fn add_assign(&mut self, rhs: i64) {
        *self = self.offset(rhs);
    }
}

impl std::ops::Sub<i64> for Tick {
    type Output = Tick;
    #[inline]
    fn sub(self, rhs: i64) -> Tick {
        Tick(self.0.saturating_sub(rhs))
    }
}

impl std::ops::Sub for Tick {
    type Output = i64;
    #[inline]
    fn sub(self, rhs: Tick) -> i64 {
        self.since(rhs)
    }
}

impl From<i64> for Tick {
    #[inline]
    fn from(raw: i64) -> Self {
        Tick(raw)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The engine's notion of "now".
///
/// Starts at `Tick::ZERO` and is moved forward only by
/// [`advance_to`][Self::advance_to].
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    current: Tick,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current tick.
    #[inline]
    pub fn now(&self) -> Tick {
        self.current
    }

    /// Move the clock to `tick` if it is strictly later than now.
    ///
    /// Returns `true` if the clock moved.
    #[inline]
    pub fn advance_to(&mut self, tick: Tick) -> bool {
        if tick <= self.current {
            return false;
        }
        self.current = tick;
        true
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={}", self.current)
    }
}
