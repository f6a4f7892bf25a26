//! Full API client
//!
//! [`FullClient`] owns one set of [`Credentials`], the [`SigningMode`] used
//! for outgoing requests and the [`SessionState`] of the xAuth exchange.
//!
//! ## Authorization flow
//!
//! ```text
//! Unauthenticated --authorize--> Authorizing --ok----> Authenticated
//!                                     |
//!                                     +--failure--> previous state
//! ```
//!
//! The token exchange itself is always signed with the consumer credentials
//! only. On success the token pair is stored and the signing mode upgrades to
//! `ConsumerAndToken`; on failure nothing about the client changes.
//!
//! `authorize` takes `&mut self`, so two authorizations can never overlap on
//! the same client. Endpoint methods take `&self` and read the current mode
//! and credentials when each request is signed.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use instakit_client::FullClient;
//!
//! # async fn example() -> instakit_client::Result<()> {
//! let mut client = FullClient::new("consumer-key", "consumer-secret")?;
//! client.authorize("reader@example.com", Some("hunter2")).await?;
//! let user = client.verify_credentials().await?;
//! println!("Signed in as {}", user.username);
//! # Ok(())
//! # }
//! ```

use instakit_core::{
    config::{Config, DEFAULT_BASE_URL},
    domain::{
        decode_records, ApiRecord, ConsumerCredentials, Credentials, SessionState, SigningMode,
        TokenPair,
    },
    ports::{HttpTransport, OutgoingRequest, RawResponse},
};
use tracing::{debug, info, warn};

use crate::{
    classify::{check_payload, check_status, decode_and_check},
    signer, ApiError, ReqwestTransport,
};

/// Path of the xAuth token exchange
const ACCESS_TOKEN_PATH: &str = "/api/1/oauth/access_token";

/// Client for the OAuth-authenticated Full API
pub struct FullClient<T: HttpTransport = ReqwestTransport> {
    transport: T,
    base_url: String,
    credentials: Credentials,
    mode: SigningMode,
    state: SessionState,
}

impl FullClient<ReqwestTransport> {
    /// Creates a client for the given consumer key and secret.
    ///
    /// Fails with [`ApiError::Configuration`] if either value is empty.
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
    ) -> Result<Self, ApiError> {
        let consumer =
            ConsumerCredentials::new(Some(consumer_key.into()), Some(consumer_secret.into()))?;
        Ok(Self::with_transport(consumer, ReqwestTransport::new()))
    }

    /// Creates a client from configuration (base URL and consumer credentials)
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let consumer = config.consumer_credentials()?;
        let transport = ReqwestTransport::new().with_traffic_logging(config.log_http_traffic());
        Ok(Self::with_transport(consumer, transport).with_base_url(config.api.base_url.as_str()))
    }
}

impl<T: HttpTransport> FullClient<T> {
    /// Creates a client over a custom transport
    pub fn with_transport(consumer: ConsumerCredentials, transport: T) -> Self {
        Self {
            transport,
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials: Credentials::new(consumer),
            mode: SigningMode::default(),
            state: SessionState::default(),
        }
    }

    /// Overrides the service base URL (useful for testing)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Restores a token pair obtained by an earlier `authorize`.
    ///
    /// The client starts out authenticated and signs with the token.
    pub fn with_token(mut self, token: TokenPair) -> Self {
        self.credentials.set_user_token(token);
        self.mode = self.mode.upgrade();
        self.state = SessionState::Authenticated;
        self
    }

    /// Exchanges a username and password for a user token pair.
    ///
    /// On success the token is stored, the signing mode becomes
    /// `ConsumerAndToken` and the session is `Authenticated`. On failure the
    /// credentials, mode and state are left as they were.
    pub async fn authorize(
        &mut self,
        username: &str,
        password: Option<&str>,
    ) -> Result<TokenPair, ApiError> {
        // Only written back once the exchange finishes, so a dropped future
        // leaves the session as it was.
        let in_flight = self.state.begin();
        info!(username, from = %self.state, "Starting xAuth token exchange");

        let outcome = match self.exchange_token(username, password).await {
            Ok(pair) => in_flight.complete().map(|next| (pair, next)).map_err(ApiError::from),
            Err(err) => Err(err),
        };

        match outcome {
            Ok((pair, next)) => {
                self.credentials.set_user_token(pair.clone());
                self.mode = self.mode.upgrade();
                self.state = next;
                info!(mode = %self.mode, "Authorization succeeded");
                Ok(pair)
            }
            Err(err) => {
                self.state = in_flight.abort(self.credentials.has_user_token());
                warn!(error = %err, state = %self.state, "Authorization failed");
                Err(err)
            }
        }
    }

    /// Returns the signing mode applied to endpoint requests
    pub fn signing_mode(&self) -> SigningMode {
        self.mode
    }

    /// Returns the current session state
    pub fn session_state(&self) -> SessionState {
        self.state
    }

    /// Returns true once a token pair has been obtained
    pub fn is_authorized(&self) -> bool {
        self.state.is_authenticated()
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn exchange_token(
        &self,
        username: &str,
        password: Option<&str>,
    ) -> Result<TokenPair, ApiError> {
        let request = OutgoingRequest::post(self.url(ACCESS_TOKEN_PATH))
            .param("x_auth_username", username)
            .param("x_auth_password", password.unwrap_or_default())
            .param("x_auth_mode", "client_auth");

        let signed = signer::sign(request, SigningMode::ConsumerOnly, &self.credentials)?;
        let response = self.transport.send(signed).await?;
        check_status(&response)?;

        parse_token_response(&response.body)
    }

    // ========================================================================
    // Request plumbing shared by the endpoint modules
    // ========================================================================

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Builds a POST to a Full API path
    pub(crate) fn request(&self, path: &str) -> OutgoingRequest {
        OutgoingRequest::post(self.url(path)).header("Accept", "application/json")
    }

    /// Signs with the current mode, sends, and classifies the status
    pub(crate) async fn execute(&self, request: OutgoingRequest) -> Result<RawResponse, ApiError> {
        if !self.mode.includes_token() {
            warn!(
                url = %request.url,
                "Calling an endpoint before authorization; the service will likely reject it"
            );
        }

        let signed = signer::sign(request, self.mode, &self.credentials)?;
        debug!(url = %signed.url, mode = %self.mode, "Executing signed request");

        let response = self.transport.send(signed).await?;
        check_status(&response)?;
        Ok(response)
    }

    /// Like [`execute`](Self::execute), then decodes the body and checks it
    /// for an embedded error record
    pub(crate) async fn execute_records(
        &self,
        request: OutgoingRequest,
    ) -> Result<Vec<ApiRecord>, ApiError> {
        let response = self.execute(request).await?;
        decode_and_check(&response.body)
    }
}

/// Extracts the token pair from `oauth_token=..&oauth_token_secret=..`.
///
/// The first pair is the token and the second the secret. A JSON body is
/// checked for an error record first, since the service reports some
/// failures that way.
fn parse_token_response(body: &str) -> Result<TokenPair, ApiError> {
    let body = body.trim();

    if let Ok(records) = decode_records(body) {
        check_payload(records)?;
        return Err(ApiError::InvalidResponse(
            "expected a form-encoded token pair, got JSON".into(),
        ));
    }

    let mut pairs = url::form_urlencoded::parse(body.as_bytes());
    let token = pairs.next().map(|(_, v)| v.into_owned());
    let secret = pairs.next().map(|(_, v)| v.into_owned());

    match (token, secret) {
        (Some(token), Some(secret)) if !token.is_empty() && !secret.is_empty() => {
            Ok(TokenPair::new(token, secret))
        }
        _ => Err(ApiError::InvalidResponse(
            "token response is missing oauth_token or oauth_token_secret".into(),
        )),
    }
}
