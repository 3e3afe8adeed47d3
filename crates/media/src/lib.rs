//! Folio Media Service
//!
//! Turns a blog post's image input into a durable, publicly retrievable URL:
//! - Cloudinary signed uploads for production
//! - Mock media store for testing and development
//! - `MediaResolver`, which prefers a caller-supplied URL and otherwise
//!   stages the uploaded bytes to a temporary file and uploads them

pub mod cloudinary;
pub mod mock;
pub mod resolver;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use folio_common::{CloudinaryCredentials, Config};
use thiserror::Error;

pub use resolver::{MediaInput, MediaResolver, StagedFile, UploadedImage};

/// Upper bound on a single upload call
pub const DEFAULT_UPLOAD_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("Media configuration error: {0}")]
    Configuration(String),

    #[error("Either an image file or an image_url is required")]
    MissingMedia,

    #[error("Failed to stage uploaded file: {0}")]
    Staging(#[from] std::io::Error),

    #[error("Media upload failed: {0}")]
    Upload(String),

    #[error("Media upload timed out after {0:?}")]
    Timeout(Duration),
}

/// Media service configuration
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Media store provider (cloudinary, mock)
    pub provider: String,
    /// Logical folder uploads land in
    pub folder: String,
    pub cloudinary: Option<CloudinaryCredentials>,
    pub upload_timeout: Duration,
}

impl From<&Config> for MediaConfig {
    fn from(config: &Config) -> Self {
        Self {
            provider: config.media_provider.clone(),
            folder: config.media_folder.clone(),
            cloudinary: config.cloudinary.clone(),
            upload_timeout: DEFAULT_UPLOAD_TIMEOUT,
        }
    }
}

/// Media store trait for different hosting backends
#[async_trait::async_trait]
pub trait MediaStore: Send + Sync {
    /// Upload the file at `path` into `folder` and return its public URL
    async fn upload(&self, path: &Path, folder: &str) -> Result<String, MediaError>;

    /// Provider name, for logs
    fn provider(&self) -> &'static str;
}

/// Media store factory
pub struct MediaStoreFactory;

impl MediaStoreFactory {
    /// Create media store based on configuration
    pub fn create(config: &MediaConfig) -> Result<Arc<dyn MediaStore>, MediaError> {
        match config.provider.as_str() {
            "cloudinary" => {
                let credentials = config.cloudinary.clone().ok_or_else(|| {
                    MediaError::Configuration(
                        "CLOUDINARY_CLOUD_NAME, CLOUDINARY_API_KEY and CLOUDINARY_API_SECRET are required"
                            .to_string(),
                    )
                })?;
                tracing::info!(cloud_name = %credentials.cloud_name, "Creating Cloudinary media store");
                Ok(Arc::new(cloudinary::CloudinaryMediaStore::new(credentials)))
            }
            "mock" => {
                tracing::info!("Creating mock media store");
                Ok(Arc::new(mock::MockMediaStore::new()))
            }
            provider => Err(MediaError::Configuration(format!(
                "Unknown media provider: {}. Supported providers: cloudinary, mock",
                provider
            ))),
        }
    }
}
