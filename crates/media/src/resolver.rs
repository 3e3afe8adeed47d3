//! Image reference resolution for blog posts
//!
//! A caller-supplied `image_url` wins and is used verbatim. Otherwise the
//! uploaded bytes are staged to a temporary file, handed to the media store,
//! and the staged file is removed on every exit path.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tempfile::TempPath;

use crate::{MediaError, MediaStore, DEFAULT_UPLOAD_TIMEOUT};

const STAGED_FILE_PREFIX: &str = "folio-upload-";

/// Image file received with a create request
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

/// Everything a create request may carry to describe its image
#[derive(Debug, Clone, Default)]
pub struct MediaInput {
    pub image_url: Option<String>,
    pub upload: Option<UploadedImage>,
}

/// Temporary on-disk copy of an uploaded image.
///
/// The file is deleted when the guard is dropped. Removal failures are
/// logged and otherwise ignored.
#[derive(Debug)]
pub struct StagedFile {
    path: Option<TempPath>,
}

impl StagedFile {
    /// Write `bytes` to a fresh temporary file, keeping the original extension
    pub async fn stage(bytes: &[u8], file_name: Option<&str>) -> Result<Self, MediaError> {
        let suffix = file_name
            .and_then(|name| Path::new(name).extension())
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        let temp_path = tokio::task::spawn_blocking(move || {
            tempfile::Builder::new()
                .prefix(STAGED_FILE_PREFIX)
                .suffix(&suffix)
                .tempfile()
                .map(|file| file.into_temp_path())
        })
        .await
        .map_err(std::io::Error::other)??;

        let staged = Self {
            path: Some(temp_path),
        };
        tokio::fs::write(staged.path(), bytes).await?;

        tracing::debug!(path = %staged.path().display(), size = bytes.len(), "Staged uploaded image");
        Ok(staged)
    }

    pub fn path(&self) -> &Path {
        self.path.as_deref().unwrap_or(Path::new(""))
    }

    /// Remove the staged file now
    pub fn remove(mut self) {
        self.cleanup();
    }

    fn cleanup(&mut self) {
        if let Some(path) = self.path.take() {
            let shown = path.display().to_string();
            match path.close() {
                Ok(()) => tracing::debug!(path = %shown, "Removed staged image"),
                Err(e) => {
                    tracing::warn!(path = %shown, error = %e, "Failed to remove staged image")
                }
            }
        }
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        self.cleanup();
    }
}

/// Resolves a `MediaInput` to the URL stored on a blog post
#[derive(Clone)]
pub struct MediaResolver {
    store: Arc<dyn MediaStore>,
    folder: String,
    upload_timeout: Duration,
}

impl std::fmt::Debug for MediaResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaResolver")
            .field("provider", &self.store.provider())
            .field("folder", &self.folder)
            .field("upload_timeout", &self.upload_timeout)
            .finish()
    }
}

impl MediaResolver {
    pub fn new(store: Arc<dyn MediaStore>, folder: impl Into<String>) -> Self {
        Self {
            store,
            folder: folder.into(),
            upload_timeout: DEFAULT_UPLOAD_TIMEOUT,
        }
    }

    pub fn with_upload_timeout(mut self, upload_timeout: Duration) -> Self {
        self.upload_timeout = upload_timeout;
        self
    }

    pub fn folder(&self) -> &str {
        &self.folder
    }

    /// Produce the image URL for a new post.
    ///
    /// A non-empty `image_url` is returned as-is without touching the store.
    /// Without one, an uploaded file is required; its absence (or an empty
    /// file) is `MediaError::MissingMedia`.
    pub async fn resolve(&self, input: MediaInput) -> Result<String, MediaError> {
        if let Some(url) = input.image_url.filter(|url| !url.trim().is_empty()) {
            return Ok(url);
        }

        let upload = input
            .upload
            .filter(|upload| !upload.bytes.is_empty())
            .ok_or(MediaError::MissingMedia)?;

        let staged = StagedFile::stage(&upload.bytes, upload.file_name.as_deref()).await?;

        let result =
            tokio::time::timeout(self.upload_timeout, self.store.upload(staged.path(), &self.folder))
                .await;
        staged.remove();

        match result {
            Ok(Ok(url)) => {
                tracing::info!(provider = self.store.provider(), url = %url, "Resolved uploaded image");
                Ok(url)
            }
            Ok(Err(e)) => {
                tracing::error!(provider = self.store.provider(), error = %e, "Image upload failed");
                Err(e)
            }
            Err(_) => {
                tracing::error!(
                    provider = self.store.provider(),
                    timeout = ?self.upload_timeout,
                    "Image upload timed out"
                );
                Err(MediaError::Timeout(self.upload_timeout))
            }
        }
    }
}
