//! Integration tests for the folder endpoints

use instakit_client::ApiError;
use instakit_core::domain::ErrorKind;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common;

#[tokio::test]
async fn test_list_folders() {
    let (server, client) = common::setup_authorized().await;
    common::mount_json(
        &server,
        "/api/1/folders/list",
        serde_json::json!([
            {"type": "folder", "folder_id": "42", "title": "Later", "sync_to_mobile": 1, "position": 3},
            {"type": "folder", "folder_id": 43, "title": "Work", "sync_to_mobile": 0, "position": 4}
        ]),
    )
    .await;

    let folders = client.list_folders().await.expect("list failed");

    assert_eq!(folders.len(), 2);
    assert_eq!(folders[0].folder_id, "42");
    assert_eq!(folders[0].title, "Later");
    assert_eq!(folders[0].position, 3);
    assert_eq!(folders[1].folder_id, "43");
}

#[tokio::test]
async fn test_duplicate_folder_is_resource_conflict() {
    let (server, client) = common::setup_authorized().await;
    common::mount_json(
        &server,
        "/api/1/folders/add",
        serde_json::json!([
            {"type": "error", "error_code": 1251, "message": "User already has a folder with this title"}
        ]),
    )
    .await;

    let err = client.create_folder("Later").await.expect_err("should conflict");

    assert_eq!(err.kind(), Some(ErrorKind::ResourceConflict));
    assert!(matches!(err, ApiError::ResourceConflict { code: 1251, .. }));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_create_and_delete_folder() {
    let (server, client) = common::setup_authorized().await;
    Mock::given(method("POST"))
        .and(path("/api/1/folders/add"))
        .and(body_string_contains("title=Reading+List"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"type": "folder", "folder_id": 77, "title": "Reading List", "position": 0}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/1/folders/delete"))
        .and(body_string_contains("folder_id=77"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let folder = client.create_folder("Reading List").await.expect("create failed");
    assert_eq!(folder.folder_id, "77");

    client
        .delete_folder(&folder.folder_id)
        .await
        .expect("delete failed");
}

#[tokio::test]
async fn test_set_folder_order() {
    let (server, client) = common::setup_authorized().await;
    Mock::given(method("POST"))
        .and(path("/api/1/folders/set_order"))
        .and(body_string_contains("order=43%3A1%2C42%3A2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"type": "folder", "folder_id": 43, "position": 1},
            {"type": "folder", "folder_id": 42, "position": 2}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let folders = client
        .set_folder_order(&[("43".to_string(), 1), ("42".to_string(), 2)])
        .await
        .expect("set_order failed");

    assert_eq!(folders[0].folder_id, "43");
    assert_eq!(folders[1].position, 2);
}
