//! Bookmark commands
//!
//! Provides the `instakit bookmarks` subcommands. Each run authorizes with
//! the global credentials before calling the endpoint.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use chrono::{DateTime, Utc};
use clap::Subcommand;
use instakit_client::bookmarks::{AddBookmark, ListBookmarks};
use instakit_core::domain::BookmarkRecord;
use tracing::info;

use super::Context;
use crate::output::OutputFormatter;

#[derive(Debug, Subcommand)]
pub enum BookmarksCommand {
    /// List bookmarks in a folder
    List {
        /// Number of bookmarks to return (1-500)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=500))]
        limit: Option<u32>,
        /// unread, starred, archive, or a folder id
        #[arg(long)]
        folder: Option<String>,
        /// Bookmark ids (or id:hash) already held locally
        #[arg(long, value_delimiter = ',')]
        have: Vec<String>,
    },
    /// Save a URL
    Add {
        url: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Folder id to save into
        #[arg(long)]
        folder: Option<String>,
        /// Save the URL as given instead of following redirects
        #[arg(long)]
        no_resolve: bool,
    },
    /// Star a bookmark
    Star { bookmark_id: String },
    /// Remove the star from a bookmark
    Unstar { bookmark_id: String },
    /// Move a bookmark to the archive
    Archive { bookmark_id: String },
    /// Move a bookmark back to unread
    Unarchive { bookmark_id: String },
    /// Permanently delete a bookmark
    Delete { bookmark_id: String },
    /// Move a bookmark into a folder
    Move {
        bookmark_id: String,
        folder_id: String,
    },
    /// Record reading progress
    Progress {
        bookmark_id: String,
        /// Fraction read, between 0.0 and 1.0
        progress: f64,
        /// Unix timestamp of the reading; defaults to now
        #[arg(long)]
        at: Option<i64>,
    },
    /// Fetch the text-view HTML of a bookmark
    Text {
        bookmark_id: String,
        /// Write the HTML to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl BookmarksCommand {
    pub async fn execute(&self, ctx: &Context) -> Result<()> {
        let fmt = ctx.formatter();
        let client = ctx.authorized_client().await?;

        match self {
            BookmarksCommand::List {
                limit,
                folder,
                have,
            } => {
                let options = ListBookmarks {
                    limit: *limit,
                    folder_id: folder.clone(),
                    have: have.clone(),
                };
                let list = client
                    .list_bookmarks(options)
                    .await
                    .context("Failed to list bookmarks")?;

                if ctx.is_json() {
                    fmt.print_json(&serde_json::to_value(&list)?);
                } else {
                    fmt.success(&format!("{} bookmark(s)", list.bookmarks.len()));
                    for bookmark in &list.bookmarks {
                        print_bookmark_line(&*fmt, bookmark);
                    }
                    if !list.delete_ids.is_empty() {
                        fmt.info("");
                        fmt.field("Removed", &list.delete_ids.join(", "));
                    }
                }
            }
            BookmarksCommand::Add {
                url,
                title,
                description,
                folder,
                no_resolve,
            } => {
                let request = AddBookmark {
                    url: url.clone(),
                    title: title.clone(),
                    description: description.clone(),
                    folder_id: folder.clone(),
                    resolve_final_url: no_resolve.then_some(false),
                };
                let bookmark = client
                    .add_bookmark(request)
                    .await
                    .context("Failed to add bookmark")?;
                report_bookmark(ctx, &*fmt, "Bookmark saved", &bookmark)?;
            }
            BookmarksCommand::Star { bookmark_id } => {
                let bookmark = client.star_bookmark(bookmark_id).await?;
                report_bookmark(ctx, &*fmt, "Bookmark starred", &bookmark)?;
            }
            BookmarksCommand::Unstar { bookmark_id } => {
                let bookmark = client.unstar_bookmark(bookmark_id).await?;
                report_bookmark(ctx, &*fmt, "Star removed", &bookmark)?;
            }
            BookmarksCommand::Archive { bookmark_id } => {
                let bookmark = client.archive_bookmark(bookmark_id).await?;
                report_bookmark(ctx, &*fmt, "Bookmark archived", &bookmark)?;
            }
            BookmarksCommand::Unarchive { bookmark_id } => {
                let bookmark = client.unarchive_bookmark(bookmark_id).await?;
                report_bookmark(ctx, &*fmt, "Bookmark moved to unread", &bookmark)?;
            }
            BookmarksCommand::Delete { bookmark_id } => {
                client.delete_bookmark(bookmark_id).await?;
                if ctx.is_json() {
                    fmt.print_json(&serde_json::json!({
                        "deleted": true,
                        "bookmark_id": bookmark_id,
                    }));
                } else {
                    fmt.success(&format!("Deleted bookmark {}", bookmark_id));
                }
            }
            BookmarksCommand::Move {
                bookmark_id,
                folder_id,
            } => {
                let bookmark = client.move_bookmark(bookmark_id, folder_id).await?;
                report_bookmark(
                    ctx,
                    &*fmt,
                    &format!("Bookmark moved to folder {}", folder_id),
                    &bookmark,
                )?;
            }
            BookmarksCommand::Progress {
                bookmark_id,
                progress,
                at,
            } => {
                let recorded_at = resolve_timestamp(*at)?;
                let bookmark = client
                    .update_read_progress(bookmark_id, *progress, recorded_at)
                    .await
                    .context("Failed to update reading progress")?;
                report_bookmark(ctx, &*fmt, "Reading progress updated", &bookmark)?;
            }
            BookmarksCommand::Text {
                bookmark_id,
                output,
            } => {
                let html = client
                    .get_text(bookmark_id)
                    .await
                    .context("Failed to fetch bookmark text")?;

                match output {
                    Some(path) => {
                        std::fs::write(path, &html)
                            .with_context(|| format!("Failed to write {}", path.display()))?;
                        info!(path = %path.display(), bytes = html.len(), "Wrote bookmark text");
                        if ctx.is_json() {
                            fmt.print_json(&serde_json::json!({
                                "bookmark_id": bookmark_id,
                                "path": path.display().to_string(),
                                "bytes": html.len(),
                            }));
                        } else {
                            fmt.success(&format!("Saved text to {}", path.display()));
                        }
                    }
                    None if ctx.is_json() => {
                        fmt.print_json(&serde_json::json!({
                            "bookmark_id": bookmark_id,
                            "html": html,
                        }));
                    }
                    None => println!("{}", html),
                }
            }
        }

        Ok(())
    }
}

/// Parses `--at`, defaulting to the current time
fn resolve_timestamp(at: Option<i64>) -> Result<DateTime<Utc>> {
    match at {
        Some(secs) => DateTime::from_timestamp(secs, 0)
            .with_context(|| format!("Timestamp {} is out of range", secs)),
        None => Ok(Utc::now()),
    }
}

fn report_bookmark(
    ctx: &Context,
    fmt: &dyn OutputFormatter,
    headline: &str,
    bookmark: &BookmarkRecord,
) -> Result<()> {
    if ctx.is_json() {
        fmt.print_json(&serde_json::to_value(bookmark)?);
        return Ok(());
    }

    fmt.success(headline);
    fmt.field("ID", &bookmark.bookmark_id);
    if !bookmark.title.is_empty() {
        fmt.field("Title", &bookmark.title);
    }
    if !bookmark.url.is_empty() {
        fmt.field("URL", &bookmark.url);
    }
    fmt.field("Starred", if bookmark.starred { "yes" } else { "no" });
    fmt.field("Progress", &format!("{:.0}%", bookmark.progress * 100.0));
    Ok(())
}

fn print_bookmark_line(fmt: &dyn OutputFormatter, bookmark: &BookmarkRecord) {
    let star = if bookmark.starred { "\u{2605}" } else { " " };
    let saved = bookmark
        .saved_at()
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    fmt.info(&format!(
        "{} {:>10}  {:<10}  {}",
        star, bookmark.bookmark_id, saved, bookmark.title
    ));
}
