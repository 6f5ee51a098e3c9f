//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Only deterministic caller-facing failures live here. AI and parsing failures are
/// absorbed by the forecast pipeline and never reach this type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Caller input failed validation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The city model was accessed before `create`.
    #[error("city model has not been created yet")]
    NotInitialized,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
