//! The `DispatchEngine` struct and its command cycle.

use dd_core::{DispatchConfig, Order, OrderId, SimClock, Tick};
use dd_index::AvlTree;
use tracing::{debug, trace, warn};

use crate::keys::{ByEta, ByPriority, EtaKey, PriorityKey};
use crate::{DeliveryQueue, EngineError, EngineResult, EtaUpdate, Report};

#[cfg(feature = "fx-hash")]
type OrderMap = rustc_hash::FxHashMap<OrderId, Order>;
#[cfg(not(feature = "fx-hash"))]
type OrderMap = std::collections::HashMap<OrderId, Order>;

// ── DispatchEngine ────────────────────────────────────────────────────────────

/// Schedules orders behind a single delivery agent.
///
/// The agent serves orders one at a time, highest priority first, making a
/// round trip from base for each.  Every active order is reachable three
/// ways, and all three are updated together inside each call:
///
/// - `orders`: identity map, the only place an `Order` is stored and mutated;
/// - `by_priority`: [`PriorityKey`]s, to find who an order queues behind and
///   who queues behind it;
/// - `by_eta`: [`EtaKey`]s, delivery order, for the clock sweep, rank, and
///   window queries.
///
/// Orders leave all three when delivered (into `due`, then `delivered`) or
/// cancelled (dropped).
pub struct DispatchEngine {
    config: DispatchConfig,

    clock: SimClock,

    orders: OrderMap,

    by_priority: AvlTree<PriorityKey, ByPriority>,

    by_eta: AvlTree<EtaKey, ByEta>,

    /// Reached by the current command's clock advance, not yet reported.
    due: DeliveryQueue,

    /// Every order ever delivered.
    delivered: DeliveryQueue,
}

impl Default for DispatchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatchEngine {
    /// An idle engine at `Tick::ZERO` with the default priority formula.
    pub fn new() -> Self {
        Self::build(DispatchConfig::default())
    }

    /// An idle engine using `config` for order priorities.
    pub fn with_config(config: DispatchConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: DispatchConfig) -> Self {
        Self {
            config,
            clock:       SimClock::new(),
            orders:      OrderMap::default(),
            by_priority: AvlTree::with_comparator(ByPriority),
            by_eta:      AvlTree::with_comparator(ByEta),
            due:         DeliveryQueue::new(),
            delivered:   DeliveryQueue::new(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    pub fn now(&self) -> Tick {
        self.clock.now()
    }

    /// An active (pending or in-flight) order.
    pub fn order(&self, id: OrderId) -> Option<&Order> {
        self.orders.get(&id)
    }

    pub fn active_len(&self) -> usize {
        self.orders.len()
    }

    pub fn delivered_len(&self) -> usize {
        self.delivered.len()
    }

    /// Delivered orders, ascending by ETA.
    pub fn delivered(&self) -> impl Iterator<Item = &Order> {
        self.delivered.iter()
    }

    /// Active orders in delivery sequence.
    pub fn active_by_eta(&self) -> impl Iterator<Item = &Order> {
        self.by_eta.iter().filter_map(|k| self.orders.get(&k.id))
    }

    /// The order the agent has already left base for, if any.
    ///
    /// Only the earliest-ETA order can be in flight, and only once the clock
    /// is strictly past its departure.
    pub fn currently_delivering(&self) -> Option<&Order> {
        let first = self.by_eta.find_min()?;
        let order = self.orders.get(&first.id)?;
        (self.now() > order.delivery_start()).then_some(order)
    }

    /// The latest-ETA order that has left the active set, preferring one
    /// still waiting to be reported.
    pub fn last_delivered_or_collected(&self) -> Option<&Order> {
        self.due.latest().or_else(|| self.delivered.latest())
    }

    // ── Commands ──────────────────────────────────────────────────────────

    /// Schedule a new order.
    ///
    /// An `id` that is already active is ignored; the clock still advances
    /// and due orders are still reported.
    pub fn create(
        &mut self,
        id:         OrderId,
        created_at: Tick,
        value:      i64,
        duration:   i64,
    ) -> Vec<Report> {
        self.advance_time(created_at);
        let mut reports = Vec::new();

        if self.orders.contains_key(&id) {
            debug!(order = %id, "duplicate order id ignored");
        } else {
            let mut order = Order::new(id, created_at, value, duration, &self.config);
            let key = PriorityKey::of(&order);
            self.by_priority.insert(key);

            let eta = self.compute_eta(&key, duration);
            order.set_eta(eta);
            let lower = self.lower_priority_orders(&key);
            self.orders.insert(id, order);

            // The new order joins the ETA index only after the lower-priority
            // orders have moved out of its way.
            let updates = self.shift_etas(&lower, duration.saturating_mul(2));
            self.reindex(&updates);
            self.index_eta(EtaKey { eta, id });

            debug!(order = %id, %eta, shifted = updates.len(), "order created");
            reports.push(Report::Created { id, eta });
            if !updates.is_empty() {
                reports.push(Report::EtaUpdates(updates));
            }
        }

        self.drain_due(&mut reports);
        reports
    }

    /// Cancel a pending order, pulling every lower-priority order forward.
    pub fn cancel(&mut self, id: OrderId, now: Tick) -> Vec<Report> {
        self.advance_time(now);
        let mut reports = Vec::new();

        match self.mutable_order(id).map(|o| (PriorityKey::of(o), o.duration())) {
            None => {
                debug!(order = %id, "cancel refused");
                reports.push(Report::CannotCancel { id });
            }
            Some((key, duration)) => {
                let lower = self.lower_priority_orders(&key);
                self.retire(id);
                let updates = self.shift_etas(&lower, duration.saturating_mul(-2));
                self.reindex(&updates);

                debug!(order = %id, shifted = updates.len(), "order cancelled");
                reports.push(Report::Cancelled { id });
                if !updates.is_empty() {
                    reports.push(Report::EtaUpdates(updates));
                }
            }
        }

        self.drain_due(&mut reports);
        reports
    }

    /// Change a pending order's travel time.
    ///
    /// The departure stays put, so the order's own ETA moves by the change in
    /// duration and every lower-priority order by twice that.  The single
    /// `EtaUpdates` report lists the order itself alongside the shifted ones.
    pub fn update_duration(&mut self, id: OrderId, now: Tick, new_duration: i64) -> Vec<Report> {
        self.advance_time(now);
        let mut reports = Vec::new();

        match self.mutable_order(id).map(PriorityKey::of) {
            None => {
                debug!(order = %id, "update refused");
                reports.push(Report::CannotUpdate { id });
            }
            Some(key) => {
                self.unindex_eta(id);
                let retimed = self
                    .orders
                    .get_mut(&id)
                    .map(|o| (o.set_duration(new_duration), o.eta()));

                if let Some((delta, eta)) = retimed {
                    let lower = self.lower_priority_orders(&key);
                    let mut updates = self.shift_etas(&lower, delta.saturating_mul(2));
                    updates.push(EtaUpdate { id, eta });
                    updates.sort_by_key(|u| u.eta);
                    self.reindex(&updates);

                    debug!(order = %id, %eta, delta, shifted = updates.len() - 1, "order re-timed");
                    reports.push(Report::EtaUpdates(updates));
                }
            }
        }

        self.drain_due(&mut reports);
        reports
    }

    /// Run the clock to the end of time and deliver everything left.
    pub fn finish(&mut self) -> Vec<Report> {
        self.advance_time(Tick::MAX);
        let mut reports = Vec::new();
        self.drain_due(&mut reports);
        debug!(delivered = reports.len(), "schedule drained");
        reports
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Snapshot of an active order.
    pub fn describe(&self, id: OrderId) -> EngineResult<Report> {
        self.orders
            .get(&id)
            .map(|o| Report::Snapshot(o.clone()))
            .ok_or(EngineError::NotFound(id))
    }

    /// Active orders with ETA in `[lo, hi]`, in delivery sequence.
    pub fn describe_range(&self, lo: Tick, hi: Tick) -> Report {
        let ids: Vec<OrderId> = self
            .by_eta
            .between(&EtaKey::first_at(lo), &EtaKey::last_at(hi))
            .into_iter()
            .map(|k| k.id)
            .collect();
        if ids.is_empty() {
            Report::EmptyWindow
        } else {
            Report::Window(ids)
        }
    }

    /// How many active orders will be delivered before `id`.
    pub fn rank_of(&self, id: OrderId) -> EngineResult<Report> {
        let order = self.orders.get(&id).ok_or(EngineError::NotFound(id))?;
        let ahead = self.by_eta.predecessors_of(&EtaKey::of(order)).len();
        Ok(Report::Rank { id, ahead })
    }

    // ── Clock ─────────────────────────────────────────────────────────────

    /// Move the clock forward and collect every order whose ETA has passed.
    ///
    /// Collected orders leave all three indices and wait in `due` until the
    /// end of the current command.
    fn advance_time(&mut self, to: Tick) {
        if !self.clock.advance_to(to) {
            return;
        }
        let reached: Vec<OrderId> = self
            .by_eta
            .between(&EtaKey::first_at(Tick(i64::MIN)), &EtaKey::last_at(to))
            .into_iter()
            .map(|k| k.id)
            .collect();
        trace!(now = %to, due = reached.len(), "clock advanced");

        for id in reached {
            if let Some(order) = self.retire(id) {
                self.due.push(order);
            }
        }
    }

    fn drain_due(&mut self, reports: &mut Vec<Report>) {
        for order in self.due.drain_ascending() {
            reports.push(Report::Delivered { id: order.id(), at: order.eta() });
            self.delivered.push(order);
        }
        debug_assert_eq!(self.by_priority.len(), self.orders.len(), "priority index out of sync");
        debug_assert_eq!(self.by_eta.len(), self.orders.len(), "ETA index out of sync");
    }

    // ── Scheduling ────────────────────────────────────────────────────────

    /// ETA for a new order whose priority key is already indexed.
    ///
    /// The order is delivered one round trip after its reference order: the
    /// next-higher-priority order, else the order in flight, else the last
    /// delivered order if the agent is still on the way back from it.  With
    /// no reference the agent leaves immediately.
    fn compute_eta(&self, key: &PriorityKey, duration: i64) -> Tick {
        let reference = self
            .by_priority
            .successor_of(key)
            .and_then(|next| self.orders.get(&next.id))
            .or_else(|| self.currently_delivering())
            .or_else(|| {
                self.last_delivered_or_collected()
                    .filter(|last| self.now() < last.returned_at())
            });

        match reference {
            Some(r) => r.returned_at() + duration,
            None => self.now() + duration,
        }
    }

    /// Ids of active orders with strictly lower priority than `key`,
    /// excluding the one in flight.
    fn lower_priority_orders(&self, key: &PriorityKey) -> Vec<OrderId> {
        let in_flight = self.currently_delivering().map(Order::id);
        self.by_priority
            .predecessors_of(key)
            .into_iter()
            .map(|k| k.id)
            .filter(|&id| Some(id) != in_flight)
            .collect()
    }

    /// Cancel and update are only allowed before the agent leaves for the
    /// order.
    fn mutable_order(&self, id: OrderId) -> Option<&Order> {
        let order = self.orders.get(&id)?;
        if order.eta() <= self.now() {
            return None;
        }
        if self.currently_delivering().is_some_and(|o| o.id() == id) {
            return None;
        }
        Some(order)
    }

    /// Move the ETA of every order in `ids` by `delta`.
    ///
    /// All their ETA keys are removed before any ETA changes, so a shifted
    /// order can never land on a key that is about to move.  The caller
    /// re-inserts with [`reindex`][Self::reindex].
    fn shift_etas(&mut self, ids: &[OrderId], delta: i64) -> Vec<EtaUpdate> {
        for &id in ids {
            self.unindex_eta(id);
        }
        let mut updates: Vec<EtaUpdate> = ids
            .iter()
            .filter_map(|&id| {
                let order = self.orders.get_mut(&id)?;
                order.shift_eta(delta);
                Some(EtaUpdate { id, eta: order.eta() })
            })
            .collect();
        updates.sort_by_key(|u| u.eta);
        trace!(count = updates.len(), delta, "ETAs shifted");
        updates
    }

    fn reindex(&mut self, updates: &[EtaUpdate]) {
        for u in updates {
            self.index_eta(EtaKey { eta: u.eta, id: u.id });
        }
    }

    fn index_eta(&mut self, key: EtaKey) {
        if !self.by_eta.insert(key) {
            warn!(order = %key.id, eta = %key.eta, "order already in ETA index");
        }
    }

    fn unindex_eta(&mut self, id: OrderId) {
        let Some(order) = self.orders.get(&id) else {
            return;
        };
        if !self.by_eta.remove(&EtaKey::of(order)) {
            warn!(order = %id, eta = %order.eta(), "order missing from ETA index");
        }
    }

    /// Remove an order from the identity map and both indices.
    fn retire(&mut self, id: OrderId) -> Option<Order> {
        let order = self.orders.remove(&id)?;
        self.by_priority.remove(&PriorityKey::of(&order));
        self.by_eta.remove(&EtaKey::of(&order));
        Some(order)
    }
}
