//! Postgres blog repository

use chrono::{DateTime, Utc};
use folio_common::RepositoryError;
use sqlx::PgPool;
use uuid::Uuid;

use super::BlogRepository;
use crate::domain::entities::BlogPost;

/// All columns in the blogs table, used for SELECT and RETURNING clauses.
const BLOG_COLUMNS: &str = "id, title, description, image_url, created_at";

#[derive(Clone)]
pub struct PgBlogRepository {
    pool: PgPool,
}

impl PgBlogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl BlogRepository for PgBlogRepository {
    async fn insert(&self, post: &BlogPost) -> Result<BlogPost, RepositoryError> {
        let query = format!(
            "INSERT INTO blogs ({BLOG_COLUMNS}) VALUES ($1, $2, $3, $4, $5) \
             RETURNING {BLOG_COLUMNS}"
        );
        let created = sqlx::query_as::<_, BlogPost>(&query)
            .bind(post.id)
            .bind(&post.title)
            .bind(&post.description)
            .bind(&post.image_url)
            .bind(post.created_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    async fn list_all(&self) -> Result<Vec<BlogPost>, RepositoryError> {
        let query = format!("SELECT {BLOG_COLUMNS} FROM blogs ORDER BY created_at");
        let posts = sqlx::query_as::<_, BlogPost>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(posts)
    }

    async fn find(&self, id: Uuid) -> Result<Option<BlogPost>, RepositoryError> {
        let query = format!("SELECT {BLOG_COLUMNS} FROM blogs WHERE id = $1");
        let post = sqlx::query_as::<_, BlogPost>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn list_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<BlogPost>, RepositoryError> {
        let query = format!(
            "SELECT {BLOG_COLUMNS} FROM blogs \
             WHERE created_at >= $1 AND created_at < $2 ORDER BY created_at"
        );
        let posts = sqlx::query_as::<_, BlogPost>(&query)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await?;

        Ok(posts)
    }
}
