//! Shared error type.
//!
//! Sub-crates define their own error enums and wrap `DdError` as one variant
//! through a `From` impl.

use thiserror::Error;

/// The base error type for `dd-core` and its dependents.
#[derive(Debug, Error)]
pub enum DdError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `dd-*` crates.
pub type DdResult<T> = Result<T, DdError>;
