//! Signing mode and authorization state machine
//!
//! A client starts `Unauthenticated` and signs with the consumer credentials
//! alone. A successful token exchange moves it to `Authenticated`, after which
//! every request is signed with the consumer and the user token together.
//!
//! ```text
//! Unauthenticated --begin--> Authorizing --complete--> Authenticated
//!        ^                        |                          |
//!        +-------abort------------+                          |
//!                                 ^----------begin-----------+
//! ```

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

/// Which credential set authenticates outgoing requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SigningMode {
    /// Consumer key/secret only; used for the token exchange
    #[default]
    ConsumerOnly,
    /// Consumer key/secret plus the user's token pair
    ConsumerAndToken,
}

impl SigningMode {
    /// One-way transition to `ConsumerAndToken`. A no-op when already there.
    pub fn upgrade(self) -> Self {
        SigningMode::ConsumerAndToken
    }

    /// Returns true if requests carry the user token
    pub fn includes_token(&self) -> bool {
        matches!(self, SigningMode::ConsumerAndToken)
    }
}

impl std::fmt::Display for SigningMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SigningMode::ConsumerOnly => write!(f, "consumer_only"),
            SigningMode::ConsumerAndToken => write!(f, "consumer_and_token"),
        }
    }
}

/// Authorization lifecycle of a client instance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Unauthenticated,
    /// A token exchange is in flight
    Authorizing,
    Authenticated,
}

impl SessionState {
    /// Enters `Authorizing`.
    ///
    /// Allowed from every state: re-authorizing an authenticated client repeats
    /// the exchange, and an `Authorizing` state left behind by an abandoned
    /// exchange simply restarts.
    pub fn begin(self) -> Self {
        SessionState::Authorizing
    }

    /// Marks the exchange as successful
    pub fn complete(self) -> Result<Self, DomainError> {
        match self {
            SessionState::Authorizing => Ok(SessionState::Authenticated),
            other => Err(DomainError::InvalidState {
                from: other.to_string(),
                to: SessionState::Authenticated.to_string(),
            }),
        }
    }

    /// Leaves `Authorizing` after a failed exchange.
    ///
    /// The resulting state reflects whether a token pair from an earlier
    /// successful exchange is still held.
    pub fn abort(self, has_token: bool) -> Self {
        if has_token {
            SessionState::Authenticated
        } else {
            SessionState::Unauthenticated
        }
    }

    /// Returns true once a token exchange has succeeded
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated)
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Unauthenticated => write!(f, "unauthenticated"),
            SessionState::Authorizing => write!(f, "authorizing"),
            SessionState::Authenticated => write!(f, "authenticated"),
        }
    }
}
