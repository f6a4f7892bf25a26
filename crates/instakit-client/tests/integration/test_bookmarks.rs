//! Integration tests for the bookmark endpoints

use instakit_client::{
    bookmarks::{AddBookmark, ListBookmarks},
    ApiError,
};
use instakit_core::domain::ErrorKind;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common;

#[tokio::test]
async fn test_list_bookmarks_returns_user_bookmarks_and_meta() {
    let (server, client) = common::setup_authorized().await;
    Mock::given(method("POST"))
        .and(path("/api/1/bookmarks/list"))
        .and(body_string_contains("limit=2"))
        .and(body_string_contains("have=100%2C101"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"type": "meta", "delete_ids": "101"},
            {"type": "user", "user_id": 54321, "username": "reader"},
            {"type": "bookmark", "bookmark_id": 200, "url": "https://a.example", "title": "A",
             "time": 1288584076, "starred": "1", "hash": "OjMuzFp6", "progress": 0.25,
             "progress_timestamp": 1288584076},
            {"type": "bookmark", "bookmark_id": 201, "url": "https://b.example", "title": "B",
             "starred": "0", "private_source": "email"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let list = client
        .list_bookmarks(ListBookmarks::new().limit(2).have("100").have("101"))
        .await
        .expect("list failed");

    assert_eq!(list.user.expect("user record").username, "reader");
    assert_eq!(list.delete_ids, vec!["101".to_string()]);
    assert_eq!(list.bookmarks.len(), 2);

    let first = &list.bookmarks[0];
    assert_eq!(first.bookmark_id, "200");
    assert!(first.starred);
    assert_eq!(first.progress, 0.25);
    assert!(first.saved_at().is_some());
    assert!(!first.is_private());

    let second = &list.bookmarks[1];
    assert!(!second.starred);
    assert!(second.is_private());
}

#[tokio::test]
async fn test_add_bookmark_returns_saved_record() {
    let (server, client) = common::setup_authorized().await;
    Mock::given(method("POST"))
        .and(path("/api/1/bookmarks/add"))
        .and(body_string_contains("url=https%3A%2F%2Fnew.example%2Fpost"))
        .and(body_string_contains("title=New+Post"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"type": "bookmark", "bookmark_id": 300, "url": "https://new.example/post", "title": "New Post"}
        ])))
        .mount(&server)
        .await;

    let bookmark = client
        .add_bookmark(AddBookmark::new("https://new.example/post").title("New Post"))
        .await
        .expect("add failed");

    assert_eq!(bookmark.bookmark_id, "300");
    assert_eq!(bookmark.title, "New Post");
}

#[tokio::test]
async fn test_opted_out_domain_is_invalid_request() {
    let (server, client) = common::setup_authorized().await;
    common::mount_json(
        &server,
        "/api/1/bookmarks/add",
        serde_json::json!([
            {"type": "error", "error_code": 1221, "message": "Domain has opted out of Instapaper compatibility"}
        ]),
    )
    .await;

    let err = client
        .add_bookmark(AddBookmark::new("https://optout.example"))
        .await
        .expect_err("should fail");

    assert_eq!(err.kind(), Some(ErrorKind::InvalidRequest));
    assert_eq!(err.code(), Some(1221));
}

#[tokio::test]
async fn test_star_and_archive() {
    let (server, client) = common::setup_authorized().await;
    common::mount_json(
        &server,
        "/api/1/bookmarks/star",
        serde_json::json!([{"type": "bookmark", "bookmark_id": 5, "starred": "1"}]),
    )
    .await;
    common::mount_json(
        &server,
        "/api/1/bookmarks/archive",
        serde_json::json!([{"type": "bookmark", "bookmark_id": 5, "starred": "1"}]),
    )
    .await;

    assert!(client.star_bookmark("5").await.expect("star failed").starred);
    assert_eq!(
        client.archive_bookmark("5").await.expect("archive failed").bookmark_id,
        "5"
    );
}

#[tokio::test]
async fn test_unknown_bookmark_is_invalid_request() {
    let (server, client) = common::setup_authorized().await;
    common::mount_json(
        &server,
        "/api/1/bookmarks/delete",
        serde_json::json!([
            {"type": "error", "error_code": 1241, "message": "Invalid or missing bookmark_id"}
        ]),
    )
    .await;

    let err = client.delete_bookmark("999").await.expect_err("should fail");
    assert!(matches!(
        err,
        ApiError::InvalidRequest { code: 1241, ref message } if message == "Invalid or missing bookmark_id"
    ));
}

#[tokio::test]
async fn test_get_text_returns_html_body() {
    let (server, client) = common::setup_authorized().await;
    Mock::given(method("POST"))
        .and(path("/api/1/bookmarks/get_text"))
        .and(body_string_contains("bookmark_id=5"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "text/html")
                .set_body_string("<html><body><p>Article</p></body></html>"),
        )
        .mount(&server)
        .await;

    let html = client.get_text("5").await.expect("get_text failed");
    assert!(html.contains("<p>Article</p>"));
}

#[tokio::test]
async fn test_update_read_progress() {
    let (server, client) = common::setup_authorized().await;
    Mock::given(method("POST"))
        .and(path("/api/1/bookmarks/update_read_progress"))
        .and(body_string_contains("progress=0.75"))
        .and(body_string_contains("progress_timestamp=1700000000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"type": "bookmark", "bookmark_id": 5, "progress": "0.75", "progress_timestamp": 1700000000}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let at = chrono::DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp");
    let bookmark = client
        .update_read_progress("5", 0.75, at)
        .await
        .expect("update failed");

    assert_eq!(bookmark.progress, 0.75);
    assert_eq!(bookmark.progress_recorded_at(), Some(at));
}
