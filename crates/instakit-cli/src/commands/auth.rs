//! Auth commands
//!
//! `instakit auth verify` runs the xAuth token exchange with the global
//! credentials and reports the account the token belongs to.

use anyhow::{Context as _, Result};
use clap::Subcommand;
use tracing::info;

use super::Context;

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Obtain a token and show the account it belongs to
    Verify,
}

impl AuthCommand {
    pub async fn execute(&self, ctx: &Context) -> Result<()> {
        match self {
            AuthCommand::Verify => self.execute_verify(ctx).await,
        }
    }

    async fn execute_verify(&self, ctx: &Context) -> Result<()> {
        let fmt = ctx.formatter();
        let client = ctx.authorized_client().await?;
        let user = client
            .verify_credentials()
            .await
            .context("Failed to verify credentials")?;

        info!(user_id = %user.user_id, "Credentials verified");

        if ctx.is_json() {
            fmt.print_json(&serde_json::json!({
                "authenticated": true,
                "session_state": client.session_state().to_string(),
                "signing_mode": client.signing_mode().to_string(),
                "user": user,
            }));
        } else {
            fmt.success(&format!("Authenticated as {}", user.username));
            fmt.field("User ID", &user.user_id);
            fmt.field(
                "Subscription",
                if user.subscription_is_active {
                    "active"
                } else {
                    "inactive"
                },
            );
            fmt.field("Signing", &client.signing_mode().to_string());
        }

        Ok(())
    }
}
