//! reqwest-backed transport
//!
//! Implements the [`HttpTransport`] port over a shared `reqwest::Client`.
//! POST requests carry their parameters as an
//! `application/x-www-form-urlencoded` body; GET requests carry none.

use std::time::Duration;

use async_trait::async_trait;
use instakit_core::ports::{HttpMethod, HttpTransport, OutgoingRequest, RawResponse, TransportError};
use reqwest::{Client, Method};
use tracing::{debug, warn};

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent sent with every request
const USER_AGENT: &str = concat!("instakit/", env!("CARGO_PKG_VERSION"));

/// Form parameters whose values never reach the traffic log
const REDACTED_PARAMS: &[&str] = &["x_auth_password"];

/// HTTP transport using reqwest
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    log_traffic: bool,
}

impl ReqwestTransport {
    /// Creates a transport with the default timeout
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Creates a transport with a custom request timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|e| {
                warn!(
                    error = %e,
                    "HTTP client setup failed; falling back to reqwest defaults without timeout or user agent"
                );
                Client::new()
            });
        Self::from_client(client)
    }

    /// Wraps an existing reqwest client
    pub fn from_client(client: Client) -> Self {
        Self {
            client,
            log_traffic: false,
        }
    }

    /// Logs request form bodies and response bodies at debug level
    pub fn with_traffic_logging(mut self, enabled: bool) -> Self {
        self.log_traffic = enabled;
        self
    }

    pub fn logs_traffic(&self) -> bool {
        self.log_traffic
    }
}

fn loggable_form(form: &[(String, String)]) -> String {
    form.iter()
        .map(|(name, value)| {
            if REDACTED_PARAMS.contains(&name.as_str()) {
                format!("{}=***", name)
            } else {
                format!("{}={}", name, value)
            }
        })
        .collect::<Vec<_>>()
        .join("&")
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: OutgoingRequest) -> Result<RawResponse, TransportError> {
        let url = reqwest::Url::parse(&request.url)
            .map_err(|e| TransportError::InvalidUrl(format!("{}: {}", request.url, e)))?;

        let method = match request.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        };

        debug!(method = %request.method, url = %url, "Sending request");
        if self.log_traffic {
            debug!(form = %loggable_form(&request.form), "Request body");
        }

        let mut builder = self.client.request(method, url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if request.method == HttpMethod::Post {
            builder = builder.form(&request.form);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        debug!(status, bytes = body.len(), "Received response");
        if self.log_traffic {
            debug!(status, body = %body, "Response body");
        }

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}
