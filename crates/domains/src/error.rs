//! # DomainError
//!
//! Centralized error handling for the Agora ecosystem.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// The primary error type for all domain operations.
#[derive(Error, Debug)]
pub enum DomainError {
    /// Resource not found (e.g., Discussion, Post, Product)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Validation failure (e.g., blank title, negative price)
    #[error("validation error: {0}")]
    Validation(String),

    /// The acting user is not allowed to touch the record
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Infrastructure failure (e.g., DB down)
    #[error("internal service error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(kind: &str, id: impl ToString) -> Self {
        Self::NotFound(kind.to_string(), id.to_string())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Storage ports report plain `anyhow` errors; anything that bubbles up from
/// them is an infrastructure fault by definition.
impl From<anyhow::Error> for DomainError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A specialized Result type for Agora domain logic.
pub type Result<T> = std::result::Result<T, DomainError>;
