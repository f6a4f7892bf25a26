//! Simple API client
//!
//! The Simple API authenticates every request with HTTP Basic and answers
//! with a bare status code, so responses are classified by status only.

use instakit_core::{
    config::{Config, DEFAULT_SIMPLE_BASE_URL},
    ports::{HttpTransport, OutgoingRequest, RawResponse},
};
use serde::Serialize;
use tracing::{debug, info};

use crate::{classify::check_status, signer, ApiError, ReqwestTransport};

/// Options for `add`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddUrl {
    pub url: String,
    pub title: Option<String>,
    /// Description or excerpt saved with the page
    pub selection: Option<String>,
    /// `close` asks for an HTML "Saved!" page that closes its own window
    pub redirect: Option<String>,
    /// JavaScript callback name to wrap the result in
    pub jsonp: Option<String>,
}

impl AddUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn selection(mut self, selection: impl Into<String>) -> Self {
        self.selection = Some(selection.into());
        self
    }

    pub fn redirect(mut self, redirect: impl Into<String>) -> Self {
        self.redirect = Some(redirect.into());
        self
    }

    pub fn jsonp(mut self, callback: impl Into<String>) -> Self {
        self.jsonp = Some(callback.into());
        self
    }

    fn wants_body(&self) -> bool {
        self.redirect.is_some() || self.jsonp.is_some()
    }
}

/// What the service reports about a saved URL
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AddedUrl {
    /// Final URL of the saved page (`Content-Location`)
    pub content_location: Option<String>,
    /// Title the service settled on (`X-Instapaper-Title`)
    pub title: Option<String>,
    /// Response body, kept only for `redirect` or `jsonp` requests
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl AddedUrl {
    fn from_response(response: RawResponse, keep_body: bool) -> Self {
        Self {
            content_location: response.header("Content-Location").map(str::to_string),
            title: response.header("X-Instapaper-Title").map(str::to_string),
            body: keep_body.then_some(response.body),
        }
    }
}

/// Client for the Basic-authenticated Simple API
pub struct SimpleClient<T: HttpTransport = ReqwestTransport> {
    transport: T,
    base_url: String,
    username: String,
    password: Option<String>,
}

impl SimpleClient<ReqwestTransport> {
    pub fn new(username: impl Into<String>, password: Option<String>) -> Self {
        Self::with_transport(username, password, ReqwestTransport::new())
    }

    /// Creates a client using the Simple API base URL from configuration
    pub fn from_config(config: &Config, username: impl Into<String>, password: Option<String>) -> Self {
        let transport = ReqwestTransport::new().with_traffic_logging(config.log_http_traffic());
        Self::with_transport(username, password, transport)
            .with_base_url(config.api.simple_base_url.as_str())
    }
}

impl<T: HttpTransport> SimpleClient<T> {
    pub fn with_transport(username: impl Into<String>, password: Option<String>, transport: T) -> Self {
        Self {
            transport,
            base_url: DEFAULT_SIMPLE_BASE_URL.to_string(),
            username: username.into(),
            password,
        }
    }

    /// Overrides the Simple API base URL (useful for testing)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Replaces the Basic credentials used for subsequent requests
    pub fn update_credentials(&mut self, username: impl Into<String>, password: Option<String>) {
        self.username = username.into();
        self.password = password;
        debug!(username = %self.username, "Simple API credentials replaced");
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Checks the credentials. Returns `true` on `200 OK`.
    ///
    /// Rejected credentials surface as [`ApiError::Authentication`].
    pub async fn authenticate(&self) -> Result<bool, ApiError> {
        let response = self.execute(self.request("/authenticate")).await?;
        info!(username = %self.username, "Simple API credentials accepted");
        Ok(response.status == 200)
    }

    /// Checks the credentials and returns the result wrapped in the named
    /// JavaScript callback.
    pub async fn authenticate_jsonp(&self, callback: &str) -> Result<String, ApiError> {
        let request = self.request("/authenticate").param("jsonp", callback);
        let response = self.execute(request).await?;
        info!(username = %self.username, callback, "Simple API credentials accepted");
        Ok(response.body)
    }

    /// Saves a URL
    pub async fn add(&self, add: AddUrl) -> Result<AddedUrl, ApiError> {
        let keep_body = add.wants_body();
        let request = self
            .request("/add")
            .param("url", add.url)
            .param_opt("title", add.title)
            .param_opt("selection", add.selection)
            .param_opt("redirect", add.redirect)
            .param_opt("jsonp", add.jsonp);

        let response = self.execute(request).await?;
        let status = response.status;
        let added = AddedUrl::from_response(response, keep_body);
        info!(status, location = ?added.content_location, "URL added");
        Ok(added)
    }

    fn request(&self, path: &str) -> OutgoingRequest {
        OutgoingRequest::post(format!("{}{}", self.base_url, path))
    }

    async fn execute(&self, request: OutgoingRequest) -> Result<RawResponse, ApiError> {
        let signed = signer::sign_basic(request, &self.username, self.password.as_deref());
        debug!(url = %signed.url, "Executing Basic-authenticated request");

        let response = self.transport.send(signed).await?;
        check_status(&response)?;
        Ok(response)
    }
}
