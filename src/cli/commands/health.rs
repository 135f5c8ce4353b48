use serde_json::{json, Value};

use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;

/// `storefront health --url <base>` - probe a running server
pub async fn handle(url: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let endpoint = format!("{}/health", url.trim_end_matches('/'));
    let client = reqwest::Client::new();

    let response = match client.get(&endpoint).send().await {
        Ok(response) => response,
        Err(e) => {
            output_error(&output_format, &format!("Server unreachable at {}: {}", endpoint, e))?;
            std::process::exit(1);
        }
    };

    let status = response.status();
    let body: Value = response.json().await.unwrap_or_else(|_| json!({}));

    if status.is_success() {
        output_success(
            &output_format,
            "Server healthy",
            Some(json!({ "status": status.as_u16(), "body": body })),
        )
    } else {
        output_error(
            &output_format,
            &format!("Server degraded ({}): {}", status.as_u16(), body),
        )?;
        std::process::exit(1);
    }
}
