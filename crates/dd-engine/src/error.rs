use dd_core::{DdError, OrderId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("order {0} not found")]
    NotFound(OrderId),

    #[error(transparent)]
    Core(#[from] DdError),
}

pub type EngineResult<T> = Result<T, EngineError>;
