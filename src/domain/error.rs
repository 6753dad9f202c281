//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violated generation or geometry contracts.
/// These are independent of I/O and configuration concerns.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("invalid range: [{min}, {max}]")]
    InvalidRange { min: f64, max: f64 },

    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),
}

impl DomainError {
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry(message.into())
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
