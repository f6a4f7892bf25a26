//! Domain error types
//!
//! This module defines error types specific to domain operations,
//! including missing credentials, invalid session transitions, and
//! undecodable response bodies.

use thiserror::Error;

/// Errors that can occur in domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required consumer credential is absent or empty
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    /// Invalid session state transition attempt
    #[error("Invalid state transition from {from} to {to}")]
    InvalidState {
        /// The current state
        from: String,
        /// The attempted target state
        to: String,
    },

    /// A response body could not be decoded into records
    #[error("Invalid record payload: {0}")]
    InvalidPayload(String),

    /// Generic validation failure
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DomainError::MissingCredential("consumer_key".to_string());
        assert_eq!(err.to_string(), "Missing credential: consumer_key");

        let err = DomainError::InvalidState {
            from: "unauthenticated".to_string(),
            to: "authenticated".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid state transition from unauthenticated to authenticated"
        );
    }

    #[test]
    fn test_error_equality() {
        let err1 = DomainError::InvalidPayload("eof".to_string());
        let err2 = DomainError::InvalidPayload("eof".to_string());
        let err3 = DomainError::InvalidPayload("other".to_string());

        assert_eq!(err1, err2);
        assert_ne!(err1, err3);
    }
}
