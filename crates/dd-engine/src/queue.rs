//! `DeliveryQueue` — ETA-ordered holding area for orders that left the
//! active indices.
//!
//! The engine keeps two of these:
//!
//! - the **due-now queue**, filled by a clock advance and emptied by the
//!   drain at the end of the same command;
//! - the **history**, append-only, consulted for the last order the agent
//!   delivered.
//!
//! Orders in either queue are frozen: nothing re-times them after they
//! arrive, so the `BTreeMap` key stays valid.
//!
//! `BTreeMap` gives O(log E) push and O(1)-amortised access to the latest
//! ETA, where E = number of distinct ETAs held.

use std::collections::BTreeMap;
use std::mem;

use dd_core::{Order, Tick};

/// Orders grouped by ETA.
#[derive(Default, Debug)]
pub struct DeliveryQueue {
    inner: BTreeMap<Tick, Vec<Order>>,
    /// Cached total order count for O(1) `len()`.
    total: usize,
}

impl DeliveryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `order` under its current ETA.
    pub fn push(&mut self, order: Order) {
        self.inner.entry(order.eta()).or_default().push(order);
        self.total += 1;
    }

    /// The order with the greatest ETA, or `None` if empty.
    ///
    /// Among orders sharing that ETA, the one pushed last.
    pub fn latest(&self) -> Option<&Order> {
        self.inner.last_key_value().and_then(|(_, orders)| orders.last())
    }

    /// Remove every order, returned in ascending ETA order.
    pub fn drain_ascending(&mut self) -> Vec<Order> {
        self.total = 0;
        mem::take(&mut self.inner).into_values().flatten().collect()
    }

    /// Ascending-ETA view of the held orders.
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.inner.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
