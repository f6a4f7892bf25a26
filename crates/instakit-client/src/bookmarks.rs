//! Bookmark endpoints of the Full API
//!
//! Every method is a POST under `/api/1/bookmarks/`, signed with the
//! client's current signing mode. JSON responses are checked for embedded
//! error records before the typed result is extracted.

use chrono::{DateTime, Utc};
use instakit_core::{
    domain::{ApiRecord, BookmarkRecord, MetaRecord, UserRecord},
    ports::{HttpTransport, OutgoingRequest},
};
use serde::Serialize;
use tracing::{debug, info};

use crate::{ApiError, FullClient};

/// Options for `bookmarks/list`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListBookmarks {
    /// Between 1 and 500; the service defaults to 25
    pub limit: Option<u32>,
    /// `unread` (default), `starred`, `archive`, or a folder id
    pub folder_id: Option<String>,
    /// Entries the caller already holds, as `id` or `id:hash[:progress:timestamp]`
    pub have: Vec<String>,
}

impl ListBookmarks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn folder(mut self, folder_id: impl Into<String>) -> Self {
        self.folder_id = Some(folder_id.into());
        self
    }

    pub fn have(mut self, entry: impl Into<String>) -> Self {
        self.have.push(entry.into());
        self
    }
}

/// Result of `bookmarks/list`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BookmarkList {
    pub user: Option<UserRecord>,
    pub bookmarks: Vec<BookmarkRecord>,
    /// Ids from `have` that dropped out of the listing
    pub delete_ids: Vec<String>,
}

/// Options for `bookmarks/add`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddBookmark {
    pub url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub folder_id: Option<String>,
    /// Whether the service should follow redirects on `url`
    pub resolve_final_url: Option<bool>,
}

impl AddBookmark {
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

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn folder(mut self, folder_id: impl Into<String>) -> Self {
        self.folder_id = Some(folder_id.into());
        self
    }

    pub fn resolve_final_url(mut self, resolve: bool) -> Self {
        self.resolve_final_url = Some(resolve);
        self
    }
}

impl<T: HttpTransport> FullClient<T> {
    /// Returns the user the current token belongs to
    pub async fn verify_credentials(&self) -> Result<UserRecord, ApiError> {
        let records = self
            .execute_records(self.request("/api/1/account/verify_credentials"))
            .await?;
        first_of(records, ApiRecord::into_user, "user")
    }

    /// Lists bookmarks in a folder
    pub async fn list_bookmarks(&self, options: ListBookmarks) -> Result<BookmarkList, ApiError> {
        let have = (!options.have.is_empty()).then(|| options.have.join(","));
        let request = self
            .request("/api/1/bookmarks/list")
            .param_opt("limit", options.limit.map(|l| l.to_string()))
            .param_opt("folder_id", options.folder_id)
            .param_opt("have", have);

        let mut list = BookmarkList::default();
        for record in self.execute_records(request).await? {
            match record {
                ApiRecord::User(user) => list.user = Some(user),
                ApiRecord::Bookmark(bookmark) => list.bookmarks.push(bookmark),
                ApiRecord::Meta(MetaRecord { delete_ids }) => list.delete_ids.extend(delete_ids),
                _ => {}
            }
        }

        debug!(count = list.bookmarks.len(), "Listed bookmarks");
        Ok(list)
    }

    /// Records how far the user has read a bookmark
    pub async fn update_read_progress(
        &self,
        bookmark_id: &str,
        progress: f64,
        recorded_at: DateTime<Utc>,
    ) -> Result<BookmarkRecord, ApiError> {
        let request = self
            .request("/api/1/bookmarks/update_read_progress")
            .param("bookmark_id", bookmark_id)
            .param("progress", progress.to_string())
            .param("progress_timestamp", recorded_at.timestamp().to_string());
        self.bookmark_call(request).await
    }

    /// Saves a new bookmark
    pub async fn add_bookmark(&self, bookmark: AddBookmark) -> Result<BookmarkRecord, ApiError> {
        let request = self
            .request("/api/1/bookmarks/add")
            .param("url", bookmark.url)
            .param_opt("title", bookmark.title)
            .param_opt("description", bookmark.description)
            .param_opt("folder_id", bookmark.folder_id)
            .param_opt(
                "resolve_final_url",
                bookmark.resolve_final_url.map(|r| if r { "1" } else { "0" }),
            );

        let added = self.bookmark_call(request).await?;
        info!(bookmark_id = %added.bookmark_id, "Bookmark added");
        Ok(added)
    }

    /// Permanently deletes a bookmark. This is not the same as archiving.
    pub async fn delete_bookmark(&self, bookmark_id: &str) -> Result<(), ApiError> {
        let request = self
            .request("/api/1/bookmarks/delete")
            .param("bookmark_id", bookmark_id);
        self.execute_records(request).await?;
        info!(bookmark_id, "Bookmark deleted");
        Ok(())
    }

    pub async fn star_bookmark(&self, bookmark_id: &str) -> Result<BookmarkRecord, ApiError> {
        self.bookmark_action("star", bookmark_id).await
    }

    pub async fn unstar_bookmark(&self, bookmark_id: &str) -> Result<BookmarkRecord, ApiError> {
        self.bookmark_action("unstar", bookmark_id).await
    }

    /// Moves a bookmark to the archive
    pub async fn archive_bookmark(&self, bookmark_id: &str) -> Result<BookmarkRecord, ApiError> {
        self.bookmark_action("archive", bookmark_id).await
    }

    /// Moves a bookmark from the archive back to the top of unread
    pub async fn unarchive_bookmark(&self, bookmark_id: &str) -> Result<BookmarkRecord, ApiError> {
        self.bookmark_action("unarchive", bookmark_id).await
    }

    /// Moves a bookmark into a user-created folder
    pub async fn move_bookmark(
        &self,
        bookmark_id: &str,
        folder_id: &str,
    ) -> Result<BookmarkRecord, ApiError> {
        let request = self
            .request("/api/1/bookmarks/move")
            .param("bookmark_id", bookmark_id)
            .param("folder_id", folder_id);
        self.bookmark_call(request).await
    }

    /// Returns the processed text-view HTML of a bookmark.
    ///
    /// The body is HTML, so only the HTTP status is classified.
    pub async fn get_text(&self, bookmark_id: &str) -> Result<String, ApiError> {
        let request = self
            .request("/api/1/bookmarks/get_text")
            .param("bookmark_id", bookmark_id);
        let response = self.execute(request).await?;
        Ok(response.body)
    }

    async fn bookmark_action(
        &self,
        action: &str,
        bookmark_id: &str,
    ) -> Result<BookmarkRecord, ApiError> {
        let request = self
            .request(&format!("/api/1/bookmarks/{}", action))
            .param("bookmark_id", bookmark_id);
        let bookmark = self.bookmark_call(request).await?;
        debug!(action, bookmark_id, "Bookmark updated");
        Ok(bookmark)
    }

    async fn bookmark_call(
        &self,
        request: OutgoingRequest,
    ) -> Result<BookmarkRecord, ApiError> {
        let records = self.execute_records(request).await?;
        first_of(records, ApiRecord::into_bookmark, "bookmark")
    }
}

/// Returns the first record `extract` accepts
pub(crate) fn first_of<R>(
    records: Vec<ApiRecord>,
    extract: fn(ApiRecord) -> Option<R>,
    expected: &str,
) -> Result<R, ApiError> {
    records
        .into_iter()
        .find_map(extract)
        .ok_or_else(|| ApiError::InvalidResponse(format!("response contains no {} record", expected)))
}
