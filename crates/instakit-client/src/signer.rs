//! Request signing
//!
//! Two schemes are supported:
//!
//! - **OAuth 1.0a HMAC-SHA1**, in one of two [`SigningMode`]s: consumer
//!   credentials alone (used for the xAuth token exchange), or consumer
//!   credentials plus the user's token pair (every other Full API call).
//! - **HTTP Basic**, used by the Simple API.
//!
//! Signing is a pure function of the request, the mode and a snapshot of the
//! credentials. It runs once per request, before the request reaches the
//! transport, and produces a new request rather than touching one in flight.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use hmac::{Hmac, Mac};
use instakit_core::{
    domain::{Credentials, SigningMode},
    ports::OutgoingRequest,
};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sha1::Sha1;
use thiserror::Error;
use url::Url;
use uuid::Uuid;

type HmacSha1 = Hmac<Sha1>;

/// RFC 3986 unreserved characters pass through; everything else is encoded.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";

/// Errors raised while signing a request
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignError {
    /// `ConsumerAndToken` signing was requested before a token was stored
    #[error("No user token available for consumer+token signing")]
    MissingToken,

    /// The request URL could not be parsed
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

/// Signs `request` with OAuth 1.0a using a fresh nonce and the current time.
pub fn sign(
    request: OutgoingRequest,
    mode: SigningMode,
    credentials: &Credentials,
) -> Result<OutgoingRequest, SignError> {
    let nonce = Uuid::new_v4().simple().to_string();
    let timestamp = Utc::now().timestamp().to_string();
    sign_with(request, mode, credentials, &nonce, &timestamp)
}

/// Signs `request` with OAuth 1.0a using the given nonce and timestamp.
///
/// In `ConsumerOnly` mode the `oauth_token` parameter is omitted and the
/// token-secret half of the signing key is empty.
pub fn sign_with(
    mut request: OutgoingRequest,
    mode: SigningMode,
    credentials: &Credentials,
    nonce: &str,
    timestamp: &str,
) -> Result<OutgoingRequest, SignError> {
    let consumer = credentials.consumer();
    let token = match mode {
        SigningMode::ConsumerOnly => None,
        SigningMode::ConsumerAndToken => {
            Some(credentials.user_token().ok_or(SignError::MissingToken)?)
        }
    };

    let mut oauth_params: Vec<(&str, String)> = vec![
        ("oauth_consumer_key", consumer.key().to_string()),
        ("oauth_nonce", nonce.to_string()),
        ("oauth_signature_method", SIGNATURE_METHOD.to_string()),
        ("oauth_timestamp", timestamp.to_string()),
        ("oauth_version", OAUTH_VERSION.to_string()),
    ];
    if let Some(pair) = token {
        oauth_params.push(("oauth_token", pair.token().to_string()));
    }

    let base_string = signature_base_string(&request, &oauth_params)?;
    let signing_key = format!(
        "{}&{}",
        encode(consumer.secret()),
        encode(token.map_or("", |pair| pair.secret()))
    );
    oauth_params.push(("oauth_signature", hmac_sha1_base64(&signing_key, &base_string)));
    oauth_params.sort();

    let header = oauth_params
        .iter()
        .map(|(name, value)| format!("{}=\"{}\"", name, encode(value)))
        .collect::<Vec<_>>()
        .join(", ");
    request.set_header("Authorization", format!("OAuth {}", header));

    Ok(request)
}

/// Sets an HTTP Basic `Authorization` header.
///
/// A missing password is sent as an empty one, which the service accepts
/// for accounts without a password.
pub fn sign_basic(
    mut request: OutgoingRequest,
    username: &str,
    password: Option<&str>,
) -> OutgoingRequest {
    let raw = format!("{}:{}", username, password.unwrap_or_default());
    request.set_header("Authorization", format!("Basic {}", STANDARD.encode(raw)));
    request
}

/// Percent-encodes a value with the OAuth (RFC 3986) rules
pub fn encode(value: &str) -> String {
    utf8_percent_encode(value, OAUTH_ENCODE_SET).to_string()
}

/// Builds `METHOD&enc(base-url)&enc(normalized-params)`.
pub(crate) fn signature_base_string(
    request: &OutgoingRequest,
    oauth_params: &[(&str, String)],
) -> Result<String, SignError> {
    let url = Url::parse(&request.url)
        .map_err(|e| SignError::InvalidUrl(format!("{}: {}", request.url, e)))?;

    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (encode(&k), encode(&v)))
        .collect();
    params.extend(request.form.iter().map(|(k, v)| (encode(k), encode(v))));
    params.extend(oauth_params.iter().map(|(k, v)| (encode(k), encode(v))));
    params.sort();

    let normalized = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    Ok(format!(
        "{}&{}&{}",
        request.method.as_str(),
        encode(&base_url(&url)),
        encode(&normalized)
    ))
}

/// Scheme, host, non-default port and path; no query or fragment.
fn base_url(url: &Url) -> String {
    let mut base = format!(
        "{}://{}",
        url.scheme(),
        url.host_str().unwrap_or_default().to_ascii_lowercase()
    );
    if let Some(port) = url.port() {
        base.push_str(&format!(":{}", port));
    }
    base.push_str(url.path());
    base
}

fn hmac_sha1_base64(key: &str, message: &str) -> String {
    let mut mac = match HmacSha1::new_from_slice(key.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => unreachable!("HMAC-SHA1 accepts keys of any length"),
    };
    mac.update(message.as_bytes());
    STANDARD.encode(mac.finalize().into_bytes())
}
