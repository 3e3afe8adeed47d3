//! Repository implementations for the Blogs domain
//!
//! `BlogRepository` is the storage seam. `BlogStore` sits in front of it,
//! owns input parsing and validation, and bounds every call with
//! `STORE_OPERATION_TIMEOUT`.

pub mod memory;
pub mod postgres;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use folio_common::RepositoryError;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::{BlogPost, NewBlogPost};
use crate::domain::error::BlogError;
use crate::domain::validation::{day_window, parse_blog_id};

pub use memory::InMemoryBlogRepository;
pub use postgres::PgBlogRepository;

/// Upper bound on a single store operation
pub const STORE_OPERATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Storage backend for blog posts
#[async_trait::async_trait]
pub trait BlogRepository: Send + Sync {
    async fn insert(&self, post: &BlogPost) -> Result<BlogPost, RepositoryError>;

    async fn list_all(&self) -> Result<Vec<BlogPost>, RepositoryError>;

    async fn find(&self, id: Uuid) -> Result<Option<BlogPost>, RepositoryError>;

    /// Number of rows removed (0 or 1)
    async fn delete(&self, id: Uuid) -> Result<u64, RepositoryError>;

    /// Posts with `start <= created_at < end`, oldest first
    async fn list_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<BlogPost>, RepositoryError>;
}

/// Blog post lifecycle operations over a `BlogRepository`
#[derive(Clone)]
pub struct BlogStore {
    repo: Arc<dyn BlogRepository>,
    timeout: Duration,
}

impl BlogStore {
    pub fn new(repo: Arc<dyn BlogRepository>) -> Self {
        Self {
            repo,
            timeout: STORE_OPERATION_TIMEOUT,
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self::new(Arc::new(PgBlogRepository::new(pool)))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn bounded<T, F>(&self, operation: &'static str, call: F) -> Result<T, BlogError>
    where
        F: Future<Output = Result<T, RepositoryError>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                tracing::error!(operation, error = %e, "Blog store operation failed");
                Err(BlogError::StoreUnavailable(e))
            }
            Err(_) => {
                tracing::error!(operation, timeout = ?self.timeout, "Blog store operation timed out");
                Err(BlogError::StoreUnavailable(RepositoryError::Timeout(
                    self.timeout,
                )))
            }
        }
    }

    /// Validate and persist a new post with a fresh id and timestamp
    pub async fn create(&self, new_post: NewBlogPost) -> Result<BlogPost, BlogError> {
        new_post.validate()?;

        let post = new_post.into_post();
        let created = self.bounded("create", self.repo.insert(&post)).await?;

        tracing::info!(id = %created.id, "Created blog post");
        Ok(created)
    }

    pub async fn list_all(&self) -> Result<Vec<BlogPost>, BlogError> {
        self.bounded("list_all", self.repo.list_all()).await
    }

    pub async fn get_by_id(&self, raw_id: &str) -> Result<BlogPost, BlogError> {
        let id = parse_blog_id(raw_id)?;
        self.bounded("get_by_id", self.repo.find(id))
            .await?
            .ok_or(BlogError::NotFound)
    }

    /// Delete by id. A well-formed id with no matching post yields 0.
    pub async fn delete(&self, raw_id: &str) -> Result<u64, BlogError> {
        let id = parse_blog_id(raw_id)?;
        let deleted_count = self.bounded("delete", self.repo.delete(id)).await?;

        tracing::info!(id = %id, deleted_count, "Deleted blog post");
        Ok(deleted_count)
    }

    /// Posts created on the given `YYYY-MM-DD` calendar day (UTC)
    pub async fn list_by_date(&self, raw_date: &str) -> Result<Vec<BlogPost>, BlogError> {
        let (start, end) = day_window(raw_date)?;
        self.bounded(
            "list_by_date",
            self.repo.list_created_between(start, end),
        )
        .await
    }
}
