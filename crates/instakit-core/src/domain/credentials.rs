//! Credential store
//!
//! Holds the application's consumer key/secret and, once authorization
//! succeeds, the user's access token pair. The consumer half is fixed at
//! construction; the token half is replaced as a whole, never field by field.

use std::fmt;

use super::errors::DomainError;

/// The application's OAuth consumer key and secret
#[derive(Clone, PartialEq, Eq)]
pub struct ConsumerCredentials {
    key: String,
    secret: String,
}

impl ConsumerCredentials {
    /// Builds consumer credentials, failing fast when either half is missing.
    ///
    /// Empty strings are treated the same as absent values.
    pub fn new(key: Option<String>, secret: Option<String>) -> Result<Self, DomainError> {
        let key = key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| DomainError::MissingCredential("consumer_key".into()))?;
        let secret = secret
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| DomainError::MissingCredential("consumer_secret".into()))?;

        Ok(Self { key, secret })
    }

    /// Returns the consumer key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the consumer secret
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for ConsumerCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsumerCredentials")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// An OAuth access token and its secret, issued by the token exchange
#[derive(Clone, PartialEq, Eq)]
pub struct TokenPair {
    token: String,
    secret: String,
}

impl TokenPair {
    pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            secret: secret.into(),
        }
    }

    /// Returns the access token
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the access token secret
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("token", &self.token)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Credential store owned by a single client instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    consumer: ConsumerCredentials,
    token: Option<TokenPair>,
}

impl Credentials {
    /// Creates a store holding only consumer credentials
    pub fn new(consumer: ConsumerCredentials) -> Self {
        Self {
            consumer,
            token: None,
        }
    }

    /// Returns the consumer half of the store
    pub fn consumer(&self) -> &ConsumerCredentials {
        &self.consumer
    }

    /// Returns the user token pair, if authorization has succeeded
    pub fn user_token(&self) -> Option<&TokenPair> {
        self.token.as_ref()
    }

    /// Returns true once a user token pair has been stored
    pub fn has_user_token(&self) -> bool {
        self.token.is_some()
    }

    /// Replaces the user token pair in a single assignment
    pub fn set_user_token(&mut self, pair: TokenPair) {
        self.token = Some(pair);
    }
}
