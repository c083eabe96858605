//! `dd-core` — foundational types for the delivery dispatch scheduler.
//!
//! This crate is a dependency of every other `dd-*` crate.  It has no `dd-*`
//! dependencies and a single required external one (`thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`ids`]       | `OrderId`                                             |
//! | [`time`]      | `Tick`, `SimClock`                                    |
//! | [`config`]    | `DispatchConfig` (priority weights and bucket size)   |
//! | [`order`]     | `Order`, `Priority`                                   |
//! | [`error`]     | `DdError`, `DdResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod order;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::DispatchConfig;
pub use error::{DdError, DdResult};
pub use ids::OrderId;
pub use order::{Order, Priority};
pub use time::{SimClock, Tick};
