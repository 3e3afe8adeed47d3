//! Mock Media Store Implementation
//!
//! Captures uploads in memory so tests can assert on what was sent, and can
//! be told to fail or stall to exercise the error and timeout paths.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::{MediaError, MediaStore};

/// Base of the URLs handed out by the mock
pub const MOCK_MEDIA_BASE_URL: &str = "https://media.mock.folio";

/// Upload captured by the mock store
#[derive(Debug, Clone)]
pub struct CapturedUpload {
    /// Path the store was asked to read
    pub path: PathBuf,
    pub folder: String,
    /// File contents as read during the call
    pub bytes: Vec<u8>,
    pub url: String,
}

#[derive(Debug, Clone, Default)]
struct MockBehavior {
    fail_with: Option<String>,
    delay: Option<Duration>,
}

/// Mock media store for testing
#[derive(Debug, Clone, Default)]
pub struct MockMediaStore {
    uploads: Arc<Mutex<Vec<CapturedUpload>>>,
    attempts: Arc<Mutex<Vec<PathBuf>>>,
    behavior: Arc<Mutex<MockBehavior>>,
}

impl MockMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent upload fail with `message`
    pub fn fail_uploads(&self, message: impl Into<String>) {
        self.behavior.lock().unwrap().fail_with = Some(message.into());
    }

    /// Sleep for `delay` before answering each upload
    pub fn delay_uploads(&self, delay: Duration) {
        self.behavior.lock().unwrap().delay = Some(delay);
    }

    /// Every path passed to `upload`, including failed and stalled calls
    pub fn attempted_paths(&self) -> Vec<PathBuf> {
        self.attempts.lock().unwrap().clone()
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    /// Most recent upload, if any
    pub fn last_upload(&self) -> Option<CapturedUpload> {
        self.uploads.lock().unwrap().last().cloned()
    }
}

#[async_trait::async_trait]
impl MediaStore for MockMediaStore {
    async fn upload(&self, path: &Path, folder: &str) -> Result<String, MediaError> {
        let behavior = self.behavior.lock().unwrap().clone();
        self.attempts.lock().unwrap().push(path.to_path_buf());

        let bytes = tokio::fs::read(path).await?;

        if let Some(delay) = behavior.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(message) = behavior.fail_with {
            tracing::warn!(path = %path.display(), "Mock media store failing upload");
            return Err(MediaError::Upload(message));
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let url = format!("{}/{}/{}", MOCK_MEDIA_BASE_URL, folder, file_name);

        self.uploads.lock().unwrap().push(CapturedUpload {
            path: path.to_path_buf(),
            folder: folder.to_string(),
            bytes,
            url: url.clone(),
        });

        tracing::info!(url = %url, "Mock upload captured");
        Ok(url)
    }

    fn provider(&self) -> &'static str {
        "mock"
    }
}
