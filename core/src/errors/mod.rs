//! Domain-specific error types and error handling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Core domain errors for booking and payment operations
///
/// Domain errors (`InvalidInput`, `Unavailable`, `NotFound`, `Forbidden`,
/// `Conflict`, `InvalidWebhook`) describe caller or state problems and are
/// never retried. `Storage` is transient and retryable by the caller.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Car is not available for the selected dates")]
    Unavailable,

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Actor lacks rights over this resource")]
    Forbidden,

    #[error("Operation conflicts with current state: {message}")]
    Conflict { message: String },

    #[error("Payment event rejected: {message}")]
    InvalidWebhook { message: String },

    #[error("Storage unavailable: {message}")]
    Storage { message: String },
}

impl DomainError {
    /// Convenience constructor for input validation failures
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Convenience constructor for state-machine violations
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Convenience constructor for missing resources
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::InvalidInput { .. } => "INVALID_INPUT",
            DomainError::Unavailable => "DATES_UNAVAILABLE",
            DomainError::NotFound { .. } => "NOT_FOUND",
            DomainError::Forbidden => "FORBIDDEN",
            DomainError::Conflict { .. } => "CONFLICT",
            DomainError::InvalidWebhook { .. } => "INVALID_WEBHOOK",
            DomainError::Storage { .. } => "STORAGE_UNAVAILABLE",
        }
    }

    /// Whether a caller may retry the operation with backoff
    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::Storage { .. })
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Unified error response structure for API responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl ToString, message: impl ToString) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
            timestamp: Utc::now(),
        }
    }
}

impl From<&DomainError> for ErrorResponse {
    fn from(err: &DomainError) -> Self {
        ErrorResponse::new(err.code(), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(DomainError::Unavailable.code(), "DATES_UNAVAILABLE");
        assert_eq!(DomainError::Forbidden.code(), "FORBIDDEN");
        assert_eq!(
            DomainError::not_found("Booking").code(),
            "NOT_FOUND"
        );
        assert_eq!(
            DomainError::Storage {
                message: "pool timed out".to_string()
            }
            .code(),
            "STORAGE_UNAVAILABLE"
        );
    }

    #[test]
    fn test_only_storage_is_retryable() {
        assert!(DomainError::Storage {
            message: "down".to_string()
        }
        .is_retryable());
        assert!(!DomainError::Unavailable.is_retryable());
        assert!(!DomainError::invalid_input("bad date").is_retryable());
    }

    #[test]
    fn test_error_response_conversion() {
        let err = DomainError::not_found("Booking");
        let response: ErrorResponse = (&err).into();
        assert_eq!(response.error, "NOT_FOUND");
        assert!(response.message.contains("Booking"));
    }
}
