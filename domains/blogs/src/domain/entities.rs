//! Domain entities for the Blogs domain
//!
//! A `BlogPost` is only ever built from a validated `NewBlogPost`, so every
//! stored post carries a non-empty title, description, and absolute image URL.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Persisted blog post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

/// Text fields of a post, checked before any media work happens
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct BlogDraft {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
}

/// A post ready to be stored, with its image reference resolved
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct NewBlogPost {
    #[validate(nested)]
    pub draft: BlogDraft,

    #[validate(url(message = "image_url must be an absolute URL"))]
    pub image_url: String,
}

impl NewBlogPost {
    pub fn new(draft: BlogDraft, image_url: impl Into<String>) -> Self {
        Self {
            draft,
            image_url: image_url.into(),
        }
    }

    /// Assign a fresh id and creation timestamp
    pub fn into_post(self) -> BlogPost {
        BlogPost {
            id: Uuid::new_v4(),
            title: self.draft.title,
            description: self.draft.description,
            image_url: self.image_url,
            created_at: Utc::now(),
        }
    }
}
