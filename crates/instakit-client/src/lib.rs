//! Instakit Client - Instapaper API client
//!
//! Provides async clients for:
//! - The Full API, authenticated with OAuth 1.0a via the xAuth token exchange
//! - The Simple API, authenticated with HTTP Basic
//!
//! Both share one error model: transport-level HTTP statuses and
//! application-level error records embedded in `200 OK` JSON bodies are
//! classified through the same code table into an [`ApiError`].
//!
//! ## Modules
//!
//! - [`signer`] - OAuth 1.0a HMAC-SHA1 and HTTP Basic request signing
//! - [`classify`] - Status and payload classification
//! - [`client`] - Full API client and its authorization state machine
//! - [`bookmarks`] / [`folders`] - Full API endpoint methods
//! - [`simple`] - Simple API client
//! - [`transport`] - reqwest-backed [`HttpTransport`](instakit_core::ports::HttpTransport)

pub mod bookmarks;
pub mod classify;
pub mod client;
pub mod folders;
pub mod signer;
pub mod simple;
pub mod transport;

#[cfg(test)]
pub(crate) mod test_support;

use instakit_core::{
    domain::{DomainError, ErrorKind},
    ports::TransportError,
};
use thiserror::Error;

pub use client::FullClient;
pub use signer::SignError;
pub use simple::SimpleClient;
pub use transport::ReqwestTransport;

/// Errors that can occur when communicating with the service
#[derive(Debug, Error)]
pub enum ApiError {
    /// Required consumer credentials are missing
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid username/password or invalid token
    #[error("Authentication failed [{code}]: {message}")]
    Authentication { code: u32, message: String },

    /// A resource with the same unique identifier already exists
    #[error("Resource already exists [{code}]: {message}")]
    ResourceConflict { code: u32, message: String },

    /// Malformed or missing request parameter
    #[error("Invalid request [{code}]: {message}")]
    InvalidRequest { code: u32, message: String },

    /// The service failed internally
    #[error("Service error [{code}]: {message}")]
    Service { code: u32, message: String },

    /// Status or application code not in the code table
    #[error("Unknown API error [{code}]: {message}")]
    UnknownApi { code: u32, message: String },

    /// No response was obtained
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The request could not be signed
    #[error("Signing error: {0}")]
    Signing(#[from] SignError),

    /// The response could not be parsed or was malformed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Builds the error value for a classified failure
    pub fn from_kind(kind: ErrorKind, code: u32, message: impl Into<String>) -> Self {
        let message = message.into();
        match kind {
            ErrorKind::Configuration => ApiError::Configuration(message),
            ErrorKind::Authentication => ApiError::Authentication { code, message },
            ErrorKind::ResourceConflict => ApiError::ResourceConflict { code, message },
            ErrorKind::InvalidRequest => ApiError::InvalidRequest { code, message },
            ErrorKind::Service => ApiError::Service { code, message },
            ErrorKind::UnknownApi { code } => ApiError::UnknownApi { code, message },
        }
    }

    /// Returns the classification of this error, if it came from the service
    /// or from configuration
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ApiError::Configuration(_) => Some(ErrorKind::Configuration),
            ApiError::Authentication { .. } => Some(ErrorKind::Authentication),
            ApiError::ResourceConflict { .. } => Some(ErrorKind::ResourceConflict),
            ApiError::InvalidRequest { .. } => Some(ErrorKind::InvalidRequest),
            ApiError::Service { .. } => Some(ErrorKind::Service),
            ApiError::UnknownApi { code, .. } => Some(ErrorKind::UnknownApi { code: *code }),
            ApiError::Transport(_) | ApiError::Signing(_) | ApiError::InvalidResponse(_) => None,
        }
    }

    /// Returns the service code carried by a classified error
    pub fn code(&self) -> Option<u32> {
        match self {
            ApiError::Authentication { code, .. }
            | ApiError::ResourceConflict { code, .. }
            | ApiError::InvalidRequest { code, .. }
            | ApiError::Service { code, .. }
            | ApiError::UnknownApi { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Returns true if repeating the request later may succeed.
    ///
    /// Informational only; the client never retries on its own.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Service { .. } | ApiError::Transport(_))
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::MissingCredential(name) => {
                ApiError::Configuration(format!("missing {}", name))
            }
            DomainError::InvalidPayload(message) => ApiError::InvalidResponse(message),
            other => ApiError::InvalidResponse(other.to_string()),
        }
    }
}

/// Result alias for client operations
pub type Result<T> = std::result::Result<T, ApiError>;
