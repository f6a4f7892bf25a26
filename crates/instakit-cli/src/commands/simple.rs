//! Simple API commands
//!
//! These use HTTP Basic with the global credentials and need no consumer
//! key.

use anyhow::{Context as _, Result};
use clap::Subcommand;
use instakit_client::simple::AddUrl;

use super::Context;

#[derive(Debug, Subcommand)]
pub enum SimpleCommand {
    /// Check the username and password
    Auth {
        /// Print the result wrapped in this JavaScript callback
        #[arg(long)]
        jsonp: Option<String>,
    },
    /// Save a URL
    Add {
        url: String,
        #[arg(long)]
        title: Option<String>,
        /// Description or excerpt to save with the page
        #[arg(long)]
        selection: Option<String>,
        /// Ask for a "Saved!" page instead of a status ("close")
        #[arg(long)]
        redirect: Option<String>,
        /// Print the result wrapped in this JavaScript callback
        #[arg(long)]
        jsonp: Option<String>,
    },
}

impl SimpleCommand {
    pub async fn execute(&self, ctx: &Context) -> Result<()> {
        let fmt = ctx.formatter();
        let client = ctx.simple_client()?;

        match self {
            SimpleCommand::Auth { jsonp: Some(callback) } => {
                let body = client
                    .authenticate_jsonp(callback)
                    .await
                    .context("Simple API authentication failed")?;
                println!("{}", body);
            }
            SimpleCommand::Auth { jsonp: None } => {
                let ok = client
                    .authenticate()
                    .await
                    .context("Simple API authentication failed")?;
                if ctx.is_json() {
                    fmt.print_json(&serde_json::json!({
                        "authenticated": ok,
                        "username": client.username(),
                    }));
                } else {
                    fmt.success(&format!("Credentials accepted for {}", client.username()));
                }
            }
            SimpleCommand::Add {
                url,
                title,
                selection,
                redirect,
                jsonp,
            } => {
                let request = AddUrl {
                    url: url.clone(),
                    title: title.clone(),
                    selection: selection.clone(),
                    redirect: redirect.clone(),
                    jsonp: jsonp.clone(),
                };
                let added = client.add(request).await.context("Failed to add URL")?;

                if let (Some(body), false) = (&added.body, ctx.is_json()) {
                    println!("{}", body);
                } else if ctx.is_json() {
                    fmt.print_json(&serde_json::to_value(&added)?);
                } else {
                    fmt.success(&format!("Saved {}", url));
                    if let Some(title) = &added.title {
                        fmt.field("Title", title);
                    }
                    if let Some(location) = &added.content_location {
                        fmt.field("Location", location);
                    }
                }
            }
        }

        Ok(())
    }
}
