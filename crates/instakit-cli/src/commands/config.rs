//! Config command - View and validate Instakit configuration
//!
//! Provides the `instakit config` CLI command which:
//! 1. Shows the effective configuration (YAML or JSON), secrets redacted
//! 2. Validates the configuration file and reports errors

use anyhow::{Context as _, Result};
use clap::Subcommand;
use instakit_core::config::Config;
use tracing::info;

use super::Context;

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display the effective configuration
    Show,
    /// Validate the configuration file
    Validate,
}

impl ConfigCommand {
    pub async fn execute(&self, ctx: &Context) -> Result<()> {
        match self {
            ConfigCommand::Show => self.execute_show(ctx),
            ConfigCommand::Validate => self.execute_validate(ctx),
        }
    }

    fn execute_show(&self, ctx: &Context) -> Result<()> {
        let formatter = ctx.formatter();
        let config = redacted(ctx.load_config());

        info!(config_path = %ctx.config_path.display(), "Showing configuration");

        if ctx.is_json() {
            let json = serde_json::to_value(&config)
                .context("Failed to serialize configuration to JSON")?;
            formatter.print_json(&json);
        } else {
            formatter.success(&format!("Configuration ({})", ctx.config_path.display()));
            formatter.info("");

            let yaml = serde_yaml::to_string(&config)
                .context("Failed to serialize configuration to YAML")?;
            for line in yaml.lines() {
                formatter.info(line);
            }
        }

        Ok(())
    }

    fn execute_validate(&self, ctx: &Context) -> Result<()> {
        let formatter = ctx.formatter();
        let config_path = &ctx.config_path;

        let config = match Config::load(config_path) {
            Ok(cfg) => cfg.apply_env_overrides(),
            Err(e) => {
                let message = if config_path.exists() {
                    format!("Failed to parse configuration: {:#}", e)
                } else {
                    "Configuration file not found. Using defaults.".to_string()
                };

                if ctx.is_json() {
                    formatter.print_json(&serde_json::json!({
                        "valid": false,
                        "config_path": config_path.display().to_string(),
                        "errors": [message],
                    }));
                } else {
                    formatter.error(&message);
                    formatter.info(&format!("File: {}", config_path.display()));
                }
                return Ok(());
            }
        };

        info!(config_path = %config_path.display(), "Validating configuration");

        let errors: Vec<String> = config.validate().iter().map(|e| e.to_string()).collect();
        let mut warnings = Vec::new();
        if let Err(e) = config.consumer_credentials() {
            warnings.push(format!("{}; Full API commands will not work", e));
        }

        if ctx.is_json() {
            formatter.print_json(&serde_json::json!({
                "valid": errors.is_empty(),
                "config_path": config_path.display().to_string(),
                "errors": errors,
                "warnings": warnings,
            }));
        } else if errors.is_empty() {
            formatter.success("Configuration is valid");
            formatter.info(&format!("File: {}", config_path.display()));
            for warning in &warnings {
                formatter.warn(warning);
            }
        } else {
            formatter.error(&format!(
                "Configuration has {} error{}:",
                errors.len(),
                if errors.len() == 1 { "" } else { "s" }
            ));
            formatter.info(&format!("File: {}", config_path.display()));
            formatter.info("");
            for error in &errors {
                formatter.info(&format!("  {}", error));
            }
        }

        Ok(())
    }
}

/// Replaces the consumer secret so it never reaches the terminal
fn redacted(mut config: Config) -> Config {
    if config.oauth.consumer_secret.is_some() {
        config.oauth.consumer_secret = Some("<redacted>".to_string());
    }
    config
}
