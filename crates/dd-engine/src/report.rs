//! Typed engine output.
//!
//! Every observable outcome of an engine call is a [`Report`].  Its
//! `Display` impl renders the exact output line the command driver writes.

use std::fmt;

use dd_core::{Order, OrderId, Tick};

/// One order's new ETA after a schedule change.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EtaUpdate {
    pub id:  OrderId,
    pub eta: Tick,
}

/// A single line of engine output.
#[derive(Clone, Debug, PartialEq)]
pub enum Report {
    /// A new order was scheduled.
    Created { id: OrderId, eta: Tick },

    /// ETAs moved because of the preceding change, ascending by new ETA.
    EtaUpdates(Vec<EtaUpdate>),

    Cancelled { id: OrderId },

    /// Cancel refused: the order is unknown, delivered, or out for delivery.
    CannotCancel { id: OrderId },

    /// Duration update refused, same conditions as [`Report::CannotCancel`].
    CannotUpdate { id: OrderId },

    /// The agent reached the customer at `at`.
    Delivered { id: OrderId, at: Tick },

    /// Field snapshot of one active order.
    Snapshot(Order),

    /// Ids of active orders inside a time window, ascending by ETA.
    Window(Vec<OrderId>),

    /// The window query matched nothing.
    EmptyWindow,

    /// Number of active orders that will be delivered before `id`.
    Rank { id: OrderId, ahead: usize },
}

impl Report {
    pub fn is_delivery(&self) -> bool {
        matches!(self, Report::Delivered { .. })
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Created { id, eta } => {
                write!(f, "Order {id} has been created - ETA: {eta}")
            }
            Report::EtaUpdates(updates) => {
                f.write_str("Updated ETAs: [")?;
                for (i, u) in updates.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", u.id, u.eta)?;
                }
                f.write_str("]")
            }
            Report::Cancelled { id } => write!(f, "Order {id} has been canceled"),
            Report::CannotCancel { id } => {
                write!(f, "Cannot cancel. Order {id} has already been delivered.")
            }
            Report::CannotUpdate { id } => {
                write!(f, "Cannot update. Order {id} has already been delivered.")
            }
            Report::Delivered { id, at } => {
                write!(f, "Order {id} has been delivered at time {at}")
            }
            Report::Snapshot(order) => write!(f, "{order}"),
            Report::Window(ids) => {
                f.write_str("[")?;
                for (i, id) in ids.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{id}")?;
                }
                f.write_str("]")
            }
            Report::EmptyWindow => f.write_str("There are no orders in that time period"),
            Report::Rank { id, ahead } => {
                write!(f, "Order {id} will be delivered after {ahead} orders.")
            }
        }
    }
}
