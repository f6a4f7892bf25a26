//! HTTP transport port (driven/secondary port)
//!
//! The core never talks to the network itself. Clients build an
//! [`OutgoingRequest`], have it signed, and hand it to an [`HttpTransport`]
//! which returns a [`RawResponse`]. Classification of the response happens
//! afterwards, on the raw status and body.
//!
//! ## Design Notes
//!
//! - Bodies are modelled as ordered form parameters because every call to
//!   the service is either a parameterless GET or a form-encoded POST.
//! - The request is immutable once handed to the transport; signing happens
//!   strictly before `send`.

use async_trait::async_trait;
use thiserror::Error;

/// HTTP methods used by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request ready to be signed and sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingRequest {
    pub method: HttpMethod,
    /// Absolute URL, optionally with a query string
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// Form parameters, sent `application/x-www-form-urlencoded` on POST
    pub form: Vec<(String, String)>,
}

impl OutgoingRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            form: Vec::new(),
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    /// Appends a form parameter
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.form.push((name.into(), value.into()));
        self
    }

    /// Appends a form parameter when `value` is present
    pub fn param_opt(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.param(name, v),
            None => self,
        }
    }

    /// Appends a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets a header, replacing any existing header of the same name
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.into()));
    }

    /// Returns the first header with the given name (case-insensitive)
    pub fn header_value(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// Status, headers and body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Returns the first header with the given name (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Returns true for 2xx statuses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// Failures below the HTTP layer (no response was obtained)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The request could not be sent or the connection failed
    #[error("Request failed: {0}")]
    Request(String),

    /// The request URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The response body could not be read
    #[error("Failed to read response body: {0}")]
    Body(String),
}

/// Issues HTTP requests on behalf of a client
///
/// Implementations own connection handling, TLS and timeouts. They must not
/// interpret the status code: a 4xx or 5xx response is still `Ok`.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends the request and returns the raw response
    async fn send(&self, request: OutgoingRequest) -> Result<RawResponse, TransportError>;
}
