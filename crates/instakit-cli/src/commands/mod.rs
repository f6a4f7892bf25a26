//! CLI subcommands
//!
//! Every command receives a [`Context`] carrying the output format, the
//! config file location and the account credentials from the global flags.

pub mod auth;
pub mod bookmarks;
pub mod config;
pub mod folders;
pub mod simple;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use instakit_client::{FullClient, SimpleClient};
use instakit_core::config::Config;
use tracing::debug;

use crate::output::{get_formatter, OutputFormat, OutputFormatter};

/// Settings shared by all commands
#[derive(Debug, Clone)]
pub struct Context {
    pub format: OutputFormat,
    pub config_path: PathBuf,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Context {
    pub fn formatter(&self) -> Box<dyn OutputFormatter> {
        get_formatter(self.format)
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Loads the config file (defaults if absent) with environment overrides
    pub fn load_config(&self) -> Config {
        debug!(path = %self.config_path.display(), "Loading configuration");
        Config::load_or_default(&self.config_path).apply_env_overrides()
    }

    fn username(&self) -> Result<&str> {
        self.username
            .as_deref()
            .filter(|u| !u.is_empty())
            .context("No username given. Use --username or set INSTAKIT_USERNAME")
    }

    /// Builds a Full API client and runs the xAuth exchange
    pub async fn authorized_client(&self) -> Result<FullClient> {
        let config = self.load_config();
        let mut client = FullClient::from_config(&config).context(
            "Consumer credentials missing. Set oauth.consumer_key and oauth.consumer_secret \
             in the config file or INSTAKIT_CONSUMER_KEY / INSTAKIT_CONSUMER_SECRET",
        )?;

        client
            .authorize(self.username()?, self.password.as_deref())
            .await
            .context("Authorization failed")?;

        Ok(client)
    }

    /// Builds a Simple API client from the global credentials
    pub fn simple_client(&self) -> Result<SimpleClient> {
        let config = self.load_config();
        Ok(SimpleClient::from_config(
            &config,
            self.username()?,
            self.password.clone(),
        ))
    }
}
