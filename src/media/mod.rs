use serde::Deserialize;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::debug;

use crate::config::MediaConfig;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Missing configuration: {0}")]
    MissingConfig(&'static str),

    #[error(transparent)]
    Upstream(#[from] reqwest::Error),

    #[error("Media host rejected upload with status {status}")]
    Rejected { status: u16 },

    #[error("Invalid media host response: {0}")]
    InvalidResponse(String),
}

/// A file accepted by the media host.
#[derive(Debug, Clone, Deserialize)]
pub struct HostedFile {
    pub secure_url: String,
}

#[derive(Debug, Deserialize)]
struct UploadReply {
    secure_url: Option<String>,
}

/// Thin client for the third-party media host. Binary storage is entirely
/// delegated; this service only keeps the returned URLs.
pub struct MediaClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    api_secret: String,
    folder: String,
}

impl MediaClient {
    pub fn from_config(config: &MediaConfig) -> Result<Self, MediaError> {
        if config.base_url.is_empty() {
            return Err(MediaError::MissingConfig("MEDIA_BASE_URL"));
        }
        if config.api_key.is_empty() {
            return Err(MediaError::MissingConfig("MEDIA_API_KEY"));
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            folder: config.folder.clone(),
        })
    }

    /// Forward one file to the media host and return its hosted URL.
    pub async fn upload(&self, filename: &str, bytes: Vec<u8>) -> Result<HostedFile, MediaError> {
        let timestamp = chrono::Utc::now().timestamp();
        let signature = self.sign_request(timestamp);

        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new()
            .text("api_key", self.api_key.clone())
            .text("folder", self.folder.clone())
            .text("timestamp", timestamp.to_string())
            .text("signature", signature)
            .part("file", part);

        let response = self
            .http
            .post(format!("{}/upload", self.base_url))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MediaError::Rejected {
                status: response.status().as_u16(),
            });
        }

        let reply: UploadReply = response.json().await?;
        let secure_url = reply
            .secure_url
            .ok_or_else(|| MediaError::InvalidResponse("missing secure_url".to_string()))?;

        debug!("Media host accepted {} -> {}", filename, secure_url);
        Ok(HostedFile { secure_url })
    }

    /// Request signature over the signed parameters, hex SHA-256 with the api
    /// secret appended, as the host's signed-upload scheme requires.
    fn sign_request(&self, timestamp: i64) -> String {
        let to_sign = format!("folder={}&timestamp={}{}", self.folder, timestamp, self.api_secret);
        let digest = Sha256::digest(to_sign.as_bytes());
        format!("{:x}", digest)
    }
}
