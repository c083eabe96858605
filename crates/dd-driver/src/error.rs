//! Error types for dd-driver.

use dd_engine::EngineError;
use thiserror::Error;

/// Errors raised while reading, parsing, or executing a command script.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    #[error("`{command}` takes {expected} argument(s), got {found}")]
    Arity {
        command:  String,
        expected: &'static str,
        found:    usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Alias for `Result<T, DriverError>`.
pub type DriverResult<T> = Result<T, DriverError>;
