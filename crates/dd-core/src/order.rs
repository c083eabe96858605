//! The order entity and its derived priority.
//!
//! # Timing model
//!
//! One agent serves every order with a round trip from base:
//!
//! ```text
//! delivery_start ──duration──▶ eta ──duration──▶ back at base
//! ```
//!
//! `eta` is the only timing field the scheduler moves; `delivery_start` is
//! kept at exactly `eta - duration` by every setter.

use std::cmp::Ordering;
use std::fmt;

use crate::{DispatchConfig, OrderId, Tick};

// ── Priority ──────────────────────────────────────────────────────────────────

/// Derived order priority.  Larger is more urgent.
///
/// Totally ordered via [`f64::total_cmp`] so it can key an ordered index.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Priority(pub f64);

impl Priority {
    /// Evaluate the priority formula for an order.
    ///
    /// `value / value_bucket` truncates.  The weighting runs in `f32` and is
    /// widened afterwards, which fixes which priorities compare equal.
    pub fn compute(value: i64, created_at: Tick, config: &DispatchConfig) -> Self {
        let bucket = (value / config.value_bucket) as f32;
        let age = created_at.0 as f32;
        let p = config.value_weight * bucket - config.time_weight * age;
        Priority(f64::from(p))
    }
}

impl PartialEq for Priority {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Priority {}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

// ── Order ─────────────────────────────────────────────────────────────────────

/// A delivery request, active or historical.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Order {
    id:             OrderId,
    created_at:     Tick,
    value:          i64,
    duration:       i64,
    priority:       Priority,
    eta:            Tick,
    delivery_start: Tick,
}

impl Order {
    /// Build an order and derive its priority.
    ///
    /// The ETA is provisional (`created_at + duration`) until the scheduler
    /// assigns the real one with [`set_eta`][Self::set_eta].
    pub fn new(
        id:         OrderId,
        created_at: Tick,
        value:      i64,
        duration:   i64,
        config:     &DispatchConfig,
    ) -> Self {
        Self {
            id,
            created_at,
            value,
            duration,
            priority:       Priority::compute(value, created_at, config),
            eta:            created_at + duration,
            delivery_start: created_at,
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn created_at(&self) -> Tick {
        self.created_at
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    /// One-way travel time from base to the customer.
    pub fn duration(&self) -> i64 {
        self.duration
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn eta(&self) -> Tick {
        self.eta
    }

    /// When the agent leaves base for this order.
    pub fn delivery_start(&self) -> Tick {
        self.delivery_start
    }

    /// When the agent is back at base after delivering this order.
    #[inline]
    pub fn returned_at(&self) -> Tick {
        self.eta + self.duration
    }

    /// Set the ETA; `delivery_start` follows.
    pub fn set_eta(&mut self, eta: Tick) {
        self.eta = eta;
        self.delivery_start = eta - self.duration;
    }

    /// Move the ETA by `delta` ticks.
    pub fn shift_eta(&mut self, delta: i64) {
        self.set_eta(self.eta + delta);
    }

    /// Change the travel time, keeping the departure fixed.
    ///
    /// Returns the change in duration (`new - old`).
    pub fn set_duration(&mut self, duration: i64) -> i64 {
        let delta = duration.saturating_sub(self.duration);
        let start = self.delivery_start;
        self.duration = duration;
        self.set_eta(start + duration);
        delta
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}, {}]",
            self.id, self.created_at, self.value, self.duration, self.eta
        )
    }
}
