//! Folder commands

use anyhow::{Context as _, Result};
use clap::Subcommand;
use instakit_core::domain::FolderRecord;

use super::Context;
use crate::output::OutputFormatter;

#[derive(Debug, Subcommand)]
pub enum FoldersCommand {
    /// List user-created folders
    List,
    /// Create a folder
    Add { title: String },
    /// Delete a folder; its bookmarks move to the archive
    Delete { folder_id: String },
    /// Reorder folders, given as folder_id:position pairs
    Order {
        #[arg(required = true, value_parser = parse_order_entry)]
        entries: Vec<(String, i64)>,
    },
}

impl FoldersCommand {
    pub async fn execute(&self, ctx: &Context) -> Result<()> {
        let fmt = ctx.formatter();
        let client = ctx.authorized_client().await?;

        match self {
            FoldersCommand::List => {
                let folders = client.list_folders().await.context("Failed to list folders")?;
                print_folders(ctx, &*fmt, &folders)?;
            }
            FoldersCommand::Add { title } => {
                let folder = client
                    .create_folder(title)
                    .await
                    .with_context(|| format!("Failed to create folder '{}'", title))?;
                if ctx.is_json() {
                    fmt.print_json(&serde_json::to_value(&folder)?);
                } else {
                    fmt.success(&format!("Created folder '{}'", folder.title));
                    fmt.field("ID", &folder.folder_id);
                }
            }
            FoldersCommand::Delete { folder_id } => {
                client
                    .delete_folder(folder_id)
                    .await
                    .context("Failed to delete folder")?;
                if ctx.is_json() {
                    fmt.print_json(&serde_json::json!({
                        "deleted": true,
                        "folder_id": folder_id,
                    }));
                } else {
                    fmt.success(&format!("Deleted folder {}", folder_id));
                }
            }
            FoldersCommand::Order { entries } => {
                let folders = client
                    .set_folder_order(entries)
                    .await
                    .context("Failed to reorder folders")?;
                print_folders(ctx, &*fmt, &folders)?;
            }
        }

        Ok(())
    }
}

/// Parses `folder_id:position`
fn parse_order_entry(raw: &str) -> Result<(String, i64), String> {
    let (id, position) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected folder_id:position, got '{}'", raw))?;
    if id.is_empty() {
        return Err(format!("missing folder id in '{}'", raw));
    }
    let position = position
        .parse::<i64>()
        .map_err(|_| format!("invalid position in '{}'", raw))?;
    Ok((id.to_string(), position))
}

fn print_folders(ctx: &Context, fmt: &dyn OutputFormatter, folders: &[FolderRecord]) -> Result<()> {
    if ctx.is_json() {
        fmt.print_json(&serde_json::to_value(folders)?);
        return Ok(());
    }

    fmt.success(&format!("{} folder(s)", folders.len()));
    for folder in folders {
        fmt.info(&format!(
            "{:>3}  {:>10}  {}",
            folder.position, folder.folder_id, folder.title
        ));
    }
    Ok(())
}
