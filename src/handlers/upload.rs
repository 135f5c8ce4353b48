use axum::extract::Multipart;
use serde_json::{json, Value};

use crate::config;
use crate::error::ApiError;
use crate::media::MediaClient;
use crate::middleware::{ApiResponse, ApiResult};

/// POST /api/upload - Forward multipart files to the media host
///
/// Every part named `file` is uploaded; per-file upstream failures are
/// logged and skipped so one bad file does not sink the batch. 400 when the
/// form carries no files, 502 when every upload failed.
pub async fn upload(mut multipart: Multipart) -> ApiResult<Value> {
    let client = MediaClient::from_config(&config::config().media)?;

    let mut file_count = 0usize;
    let mut uploads: Vec<Value> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart request: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let original_filename = field.file_name().unwrap_or("upload").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read file part: {}", e)))?;

        file_count += 1;

        match client.upload(&original_filename, bytes.to_vec()).await {
            Ok(hosted) => uploads.push(json!({
                "url": hosted.secure_url,
                "original_filename": original_filename,
            })),
            Err(e) => {
                tracing::error!("Upload of {} failed: {}", original_filename, e);
            }
        }
    }

    if file_count == 0 {
        return Err(ApiError::bad_request("No files uploaded"));
    }
    if uploads.is_empty() {
        return Err(ApiError::bad_gateway("Failed to upload any files"));
    }

    Ok(ApiResponse::success(json!({ "uploads": uploads })))
}
