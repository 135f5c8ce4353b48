use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;
use crate::database::manager::DatabaseManager;

/// `storefront init` - apply the database schema (idempotent)
pub async fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    match DatabaseManager::migrate().await {
        Ok(()) => output_success(&output_format, "Database schema applied", None),
        Err(e) => {
            output_error(&output_format, &format!("Schema apply failed: {}", e))?;
            std::process::exit(1);
        }
    }
}
