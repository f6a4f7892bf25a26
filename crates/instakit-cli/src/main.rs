//! Instakit CLI - Command-line interface for Instapaper
//!
//! Provides commands for:
//! - Verifying an account via the xAuth token exchange
//! - Listing and managing bookmarks
//! - Managing folders
//! - Saving URLs through the Simple API
//! - Inspecting configuration

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use instakit_core::config::Config;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{
    auth::AuthCommand, bookmarks::BookmarksCommand, config::ConfigCommand,
    folders::FoldersCommand, simple::SimpleCommand, Context,
};
use output::{get_formatter, OutputFormat};

#[derive(Debug, Parser)]
#[command(name = "instakit", version, about = "Command-line client for Instapaper")]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Instapaper username or email
    #[arg(long, env = "INSTAKIT_USERNAME", global = true)]
    username: Option<String>,

    /// Instapaper password (may be empty for password-less accounts)
    #[arg(long, env = "INSTAKIT_PASSWORD", hide_env_values = true, global = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Authentication commands
    #[command(subcommand)]
    Auth(AuthCommand),
    /// Manage bookmarks
    #[command(subcommand)]
    Bookmarks(BookmarksCommand),
    /// Manage folders
    #[command(subcommand)]
    Folders(FoldersCommand),
    /// Simple API (HTTP Basic) commands
    #[command(subcommand)]
    Simple(SimpleCommand),
    /// View and validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    init_tracing(cli.verbose, &config_path);

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    let ctx = Context {
        format,
        config_path,
        username: cli.username,
        password: cli.password,
    };

    let result = match cli.command {
        Commands::Auth(cmd) => cmd.execute(&ctx).await,
        Commands::Bookmarks(cmd) => cmd.execute(&ctx).await,
        Commands::Folders(cmd) => cmd.execute(&ctx).await,
        Commands::Simple(cmd) => cmd.execute(&ctx).await,
        Commands::Config(cmd) => cmd.execute(&ctx).await,
    };

    if let Err(e) = result {
        get_formatter(format).error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise `-v` picks debug/trace and the config file
/// supplies the default level. Logs go to stderr so stdout stays parseable.
fn init_tracing(verbose: u8, config_path: &std::path::Path) {
    let level = match verbose {
        0 => Config::load_or_default(config_path).logging.level,
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
