//! `dd-engine` — the single-agent dispatch scheduler.
//!
//! # Command cycle
//!
//! ```text
//! for each mutating command (create / cancel / update_duration / finish):
//!   ① Advance   — move the clock to the command's timestamp; every active
//!                 order whose ETA has been reached leaves the indices and
//!                 joins the due-now queue.
//!   ② Effect    — insert, cancel, or re-time one order, then cascade the
//!                 ETA change to every lower-priority order.
//!   ③ Drain     — due-now orders move into delivered history, one
//!                 `Report::Delivered` each, ascending by ETA.
//! ```
//!
//! Read-only queries (`describe`, `describe_range`, `rank_of`) skip ① and ③.
//!
//! # Crate layout
//!
//! | Module      | Contents                                               |
//! |-------------|--------------------------------------------------------|
//! | [`engine`]  | `DispatchEngine`                                       |
//! | [`keys`]    | `PriorityKey`/`ByPriority`, `EtaKey`/`ByEta`           |
//! | [`queue`]   | `DeliveryQueue` (`BTreeMap<Tick, Vec<Order>>`)         |
//! | [`report`]  | `Report`, `EtaUpdate`                                  |
//! | [`error`]   | `EngineError`, `EngineResult<T>`                       |
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                  |
//! |-----------|---------------------------------------------------------|
//! | `fx-hash` | Uses FxHash for the order-id map.                       |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use dd_core::{OrderId, Tick};
//! use dd_engine::DispatchEngine;
//!
//! let mut engine = DispatchEngine::new();
//! for report in engine.create(OrderId(1), Tick(0), 50, 10) {
//!     println!("{report}"); // Order 1 has been created - ETA: 10
//! }
//! ```

pub mod engine;
pub mod error;
pub mod keys;
pub mod queue;
pub mod report;

#[cfg(test)]
mod tests;

pub use engine::DispatchEngine;
pub use error::{EngineError, EngineResult};
pub use keys::{ByEta, ByPriority, EtaKey, PriorityKey};
pub use queue::DeliveryQueue;
pub use report::{EtaUpdate, Report};
