//! Cloudinary Upload API implementation
//!
//! Performs signed uploads against
//! `https://api.cloudinary.com/v1_1/{cloud_name}/auto/upload` using a
//! reqwest multipart body.

use std::path::Path;

use folio_common::CloudinaryCredentials;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::{MediaError, MediaStore};

const DEFAULT_BASE_URL: &str = "https://api.cloudinary.com";
const SIGNATURE_ALGORITHM: &str = "sha256";

/// Successful upload response (only the fields we read)
#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: Option<String>,
}

/// Cloudinary error response
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Sign a set of upload parameters.
///
/// Parameters are sorted by name, joined as `name=value` pairs with `&`, the
/// API secret is appended, and the SHA-256 digest is hex encoded.
pub fn sign_params(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted: Vec<&(&str, &str)> = params.iter().filter(|(_, v)| !v.is_empty()).collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// Cloudinary-backed media store
pub struct CloudinaryMediaStore {
    client: Client,
    credentials: CloudinaryCredentials,
    base_url: String,
}

impl CloudinaryMediaStore {
    pub fn new(credentials: CloudinaryCredentials) -> Self {
        Self::with_base_url(credentials, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(credentials: CloudinaryCredentials, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            credentials,
            base_url: base_url.into(),
        }
    }

    fn upload_url(&self) -> String {
        format!(
            "{}/v1_1/{}/auto/upload",
            self.base_url.trim_end_matches('/'),
            self.credentials.cloud_name
        )
    }
}

#[async_trait::async_trait]
impl MediaStore for CloudinaryMediaStore {
    async fn upload(&self, path: &Path, folder: &str) -> Result<String, MediaError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = sign_params(
            &[("folder", folder), ("timestamp", &timestamp)],
            &self.credentials.api_secret,
        );

        let form = Form::new()
            .text("api_key", self.credentials.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", folder.to_string())
            .text("signature", signature)
            .text("signature_algorithm", SIGNATURE_ALGORITHM)
            .part("file", Part::bytes(bytes).file_name(file_name));

        tracing::debug!(folder = %folder, path = %path.display(), "Sending Cloudinary upload request");

        let response = self
            .client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| MediaError::Upload(format!("HTTP request failed: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());

            if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(&error_body) {
                return Err(MediaError::Upload(format!(
                    "Cloudinary API error ({}): {}",
                    status, error_response.error.message
                )));
            }

            return Err(MediaError::Upload(format!(
                "Cloudinary API returned {}: {}",
                status, error_body
            )));
        }

        let upload: UploadResponse = response
            .json()
            .await
            .map_err(|e| MediaError::Upload(format!("Failed to parse response: {}", e)))?;

        if upload.secure_url.is_empty() {
            return Err(MediaError::Upload(
                "Cloudinary response carried no secure_url".to_string(),
            ));
        }

        tracing::info!(
            public_id = upload.public_id.as_deref().unwrap_or_default(),
            "Uploaded image to Cloudinary"
        );

        Ok(upload.secure_url)
    }

    fn provider(&self) -> &'static str {
        "cloudinary"
    }
}
