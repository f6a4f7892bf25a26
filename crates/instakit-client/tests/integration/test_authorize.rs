//! Integration tests for the xAuth authorization flow

use instakit_client::ApiError;
use instakit_core::domain::{ErrorKind, SessionState, SigningMode};
use wiremock::matchers::{header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common;

#[tokio::test]
async fn test_authorize_stores_token_and_upgrades_mode() {
    let server = MockServer::start().await;
    common::mount_access_token(&server).await;
    let mut client = common::full_client(&server);

    let pair = client
        .authorize("reader@example.com", Some("hunter2"))
        .await
        .expect("authorize failed");

    assert_eq!(pair.token(), common::USER_TOKEN);
    assert_eq!(pair.secret(), common::USER_SECRET);
    assert_eq!(client.signing_mode(), SigningMode::ConsumerAndToken);
    assert_eq!(client.session_state(), SessionState::Authenticated);
    assert!(client.is_authorized());
}

#[tokio::test]
async fn test_token_exchange_is_signed_without_user_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/1/oauth/access_token"))
        .and(header_regex(
            "authorization",
            r#"^OAuth oauth_consumer_key="test-consumer-key", oauth_nonce="[0-9a-f]+", oauth_signature="[^"]+", oauth_signature_method="HMAC-SHA1", oauth_timestamp="\d+", oauth_version="1.0"$"#,
        ))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("oauth_token=t&oauth_token_secret=s"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut client = common::full_client(&server);
    client.authorize("reader", None).await.expect("authorize failed");
}

#[tokio::test]
async fn test_rejected_credentials_leave_client_unauthenticated() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/1/oauth/access_token"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid xAuth credentials."))
        .mount(&server)
        .await;

    let mut client = common::full_client(&server);
    let err = client
        .authorize("reader", Some("wrong"))
        .await
        .expect_err("authorize should fail");

    assert_eq!(err.kind(), Some(ErrorKind::Authentication));
    assert_eq!(client.signing_mode(), SigningMode::ConsumerOnly);
    assert_eq!(client.session_state(), SessionState::Unauthenticated);
    assert!(client.credentials().user_token().is_none());
}

#[tokio::test]
async fn test_endpoint_calls_carry_user_token() {
    let (server, client) = common::setup_authorized().await;
    Mock::given(method("POST"))
        .and(path("/api/1/account/verify_credentials"))
        .and(header_regex("authorization", r#"oauth_token="user-token-001""#))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"type": "user", "user_id": 54321, "username": "reader@example.com"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let user = client.verify_credentials().await.expect("verify failed");

    assert_eq!(user.user_id, "54321");
    assert_eq!(user.username, "reader@example.com");
}

#[tokio::test]
async fn test_unauthorized_endpoint_call_fails_with_authentication() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/1/account/verify_credentials"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = common::full_client(&server);
    let err = client.verify_credentials().await.expect_err("should fail");

    assert!(matches!(err, ApiError::Authentication { code: 403, .. }));
}

#[tokio::test]
async fn test_service_outage_during_authorize() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/1/oauth/access_token"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut client = common::full_client(&server);
    let err = client.authorize("reader", None).await.expect_err("should fail");

    assert!(matches!(err, ApiError::Service { code: 500, .. }));
    assert!(err.is_retryable());
    assert!(!client.is_authorized());
}

#[tokio::test]
async fn test_unreachable_service_is_transport_error() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let mut client = instakit_client::FullClient::new(common::CONSUMER_KEY, common::CONSUMER_SECRET)
        .expect("valid consumer")
        .with_base_url(uri);
    let err = client.authorize("reader", None).await.expect_err("should fail");

    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(client.session_state(), SessionState::Unauthenticated);
}
