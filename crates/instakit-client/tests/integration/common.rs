//! Shared helpers for the integration tests
//!
//! Each helper mounts the endpoints it needs on a wiremock server and returns
//! a client pointed at it.

use instakit_client::{FullClient, SimpleClient};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CONSUMER_KEY: &str = "test-consumer-key";
pub const CONSUMER_SECRET: &str = "test-consumer-secret";
pub const USER_TOKEN: &str = "user-token-001";
pub const USER_SECRET: &str = "user-secret-001";

/// Returns a client for `server` that has not been authorized yet
pub fn full_client(server: &MockServer) -> FullClient {
    FullClient::new(CONSUMER_KEY, CONSUMER_SECRET)
        .expect("consumer credentials are valid")
        .with_base_url(server.uri())
}

/// Mounts a token exchange that accepts any username and password
pub async fn mount_access_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/1/oauth/access_token"))
        .and(body_string_contains("x_auth_mode=client_auth"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "oauth_token={}&oauth_token_secret={}",
            USER_TOKEN, USER_SECRET
        )))
        .mount(server)
        .await;
}

/// Starts a server and returns a client that has completed authorization
pub async fn setup_authorized() -> (MockServer, FullClient) {
    let server = MockServer::start().await;
    mount_access_token(&server).await;

    let mut client = full_client(&server);
    client
        .authorize("reader@example.com", Some("hunter2"))
        .await
        .expect("authorize failed");

    (server, client)
}

/// Mounts a Full API endpoint returning `body` as JSON
pub async fn mount_json(server: &MockServer, endpoint: &str, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Returns a Simple API client for `server`
pub fn simple_client(server: &MockServer, username: &str, password: Option<&str>) -> SimpleClient {
    SimpleClient::new(username, password.map(str::to_string)).with_base_url(format!("{}/api", server.uri()))
}
