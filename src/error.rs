use thiserror::Error;
use tokio::io;

pub type ServiceResult<T> = core::result::Result<T, ServiceError>;

pub type StoreResult<T> = core::result::Result<T, StoreError>;

/// Errors raised by the idea store. Every variant is reported before any
/// state is written, so a failed call never leaves a partial update behind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Missing or malformed caller input.
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("idea not found: {0}")]
    NotFound(String),
    /// A value outside an allowed set, e.g. a vote type other than up/down.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("counter update out of range for idea {0}")]
    CounterOverflow(String),
}

impl StoreError {
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::Validation(_) => "validation",
            StoreError::NotFound(_) => "not_found",
            StoreError::InvalidInput(_) => "invalid_input",
            StoreError::CounterOverflow(_) => "counter_overflow",
        }
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    FromString(String),
    #[error("{0}")]
    Store(#[from] StoreError),
    #[error("{0}")]
    IoError(#[from] io::Error),
    #[error("{0}")]
    SerdeJsonError(#[from] serde_json::Error),
    #[error("{0}")]
    PromptError(#[from] dialoguer::Error),
}
