//! In-memory blog repository for tests and local runs without Postgres

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use folio_common::RepositoryError;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::BlogRepository;
use crate::domain::entities::BlogPost;

/// Keeps posts in insertion order. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBlogRepository {
    posts: Arc<RwLock<Vec<BlogPost>>>,
    unavailable: Arc<AtomicBool>,
    latency: Arc<std::sync::Mutex<Option<Duration>>>,
}

impl InMemoryBlogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert posts as-is, keeping their ids and timestamps
    pub async fn seed(&self, posts: Vec<BlogPost>) {
        self.posts.write().await.extend(posts);
    }

    pub async fn len(&self) -> usize {
        self.posts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.posts.read().await.is_empty()
    }

    /// Make every call fail as if the database were unreachable
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Delay every call by `latency`
    pub fn set_latency(&self, latency: Option<Duration>) {
        if let Ok(mut guard) = self.latency.lock() {
            *guard = latency;
        }
    }

    async fn check_available(&self) -> Result<(), RepositoryError> {
        let latency = self.latency.lock().ok().and_then(|guard| *guard);
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepositoryError::Connection(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl BlogRepository for InMemoryBlogRepository {
    async fn insert(&self, post: &BlogPost) -> Result<BlogPost, RepositoryError> {
        self.check_available().await?;

        let mut posts = self.posts.write().await;
        if posts.iter().any(|p| p.id == post.id) {
            return Err(RepositoryError::InvalidData(format!(
                "duplicate blog id {}",
                post.id
            )));
        }
        posts.push(post.clone());
        Ok(post.clone())
    }

    async fn list_all(&self) -> Result<Vec<BlogPost>, RepositoryError> {
        self.check_available().await?;
        Ok(self.posts.read().await.clone())
    }

    async fn find(&self, id: Uuid) -> Result<Option<BlogPost>, RepositoryError> {
        self.check_available().await?;
        Ok(self.posts.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<u64, RepositoryError> {
        self.check_available().await?;

        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        Ok((before - posts.len()) as u64)
    }

    async fn list_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<BlogPost>, RepositoryError> {
        self.check_available().await?;

        let mut matching: Vec<BlogPost> = self
            .posts
            .read()
            .await
            .iter()
            .filter(|p| p.created_at >= start && p.created_at < end)
            .cloned()
            .collect();
        matching.sort_by_key(|p| p.created_at);
        Ok(matching)
    }
}
