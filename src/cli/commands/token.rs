use clap::Subcommand;
use serde_json::json;

use crate::auth::{self, Claims, Role};
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config;

#[derive(Subcommand)]
pub enum TokenCommands {
    #[command(about = "Sign an identity assertion (stands in for the identity provider)")]
    Assertion {
        #[arg(help = "Email address for the assertion")]
        email: String,

        #[arg(long, help = "Display name")]
        name: Option<String>,
    },

    #[command(about = "Mint a session token directly (skips assertion exchange)")]
    Session {
        #[arg(help = "Email address for the session")]
        email: String,

        #[arg(long, help = "Display name")]
        name: Option<String>,
    },
}

pub async fn handle(cmd: TokenCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let security = &config::config().security;

    match cmd {
        TokenCommands::Assertion { email, name } => {
            let token = auth::sign_assertion(&email, name.as_deref(), &security.identity_secret)?;
            output_success(
                &output_format,
                &format!("Identity assertion for {}", email),
                Some(json!({ "token": token })),
            )
        }
        TokenCommands::Session { email, name } => {
            let role = Role::for_email(&email, &security.admin_emails);
            let claims = Claims::new(email.clone(), name, role);
            let token = auth::issue_session_token(&claims)?;
            output_success(
                &output_format,
                &format!("Session token for {} ({:?})", email, role),
                Some(json!({ "token": token, "expires_at": claims.exp })),
            )
        }
    }
}
