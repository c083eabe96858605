//! Index keys projected from an [`Order`].
//!
//! The indices never hold orders.  They hold small `Copy` keys that carry
//! just what their comparator reads plus the id to find the order again in
//! the identity map.  Whenever an order's ETA moves, its old `EtaKey` is
//! removed and a fresh one is inserted.

use std::cmp::Ordering;

use dd_core::{Order, OrderId, Priority, Tick};
use dd_index::Comparator;

// ── Priority ──────────────────────────────────────────────────────────────────

/// Position of an order in the priority index.  Immutable for the order's
/// lifetime.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PriorityKey {
    pub priority:   Priority,
    pub created_at: Tick,
    pub id:         OrderId,
}

impl PriorityKey {
    pub fn of(order: &Order) -> Self {
        Self {
            priority:   order.priority(),
            created_at: order.created_at(),
            id:         order.id(),
        }
    }
}

/// Ascending priority.  Among equal priorities the earlier-created order is
/// greater, then the smaller id.
#[derive(Copy, Clone, Debug, Default)]
pub struct ByPriority;

impl Comparator<PriorityKey> for ByPriority {
    fn compare(&self, a: &PriorityKey, b: &PriorityKey) -> Ordering {
        a.priority
            .cmp(&b.priority)
            .then_with(|| b.created_at.cmp(&a.created_at))
            .then_with(|| b.id.cmp(&a.id))
    }
}

// ── ETA ───────────────────────────────────────────────────────────────────────

/// Position of an order in the ETA index.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EtaKey {
    pub eta: Tick,
    pub id:  OrderId,
}

impl EtaKey {
    pub fn of(order: &Order) -> Self {
        Self { eta: order.eta(), id: order.id() }
    }

    /// Lower search bound: sorts before every key at `eta`.
    pub fn first_at(eta: Tick) -> Self {
        Self { eta, id: OrderId(i64::MIN) }
    }

    /// Upper search bound: sorts after every key at `eta`.
    pub fn last_at(eta: Tick) -> Self {
        Self { eta, id: OrderId(i64::MAX) }
    }
}

/// Ascending ETA, then id.
///
/// The schedule normally keeps ETAs distinct.  The id tie-break keeps an
/// order indexed when a priority inversion behind the in-flight order makes
/// two ETAs meet.
#[derive(Copy, Clone, Debug, Default)]
pub struct ByEta;

impl Comparator<EtaKey> for ByEta {
    #[inline]
    fn compare(&self, a: &EtaKey, b: &EtaKey) -> Ordering {
        a.eta.cmp(&b.eta).then_with(|| a.id.cmp(&b.id))
    }
}
