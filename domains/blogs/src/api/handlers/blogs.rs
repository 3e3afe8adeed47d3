//! Blog post API handlers

use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use folio_auth::AdminUser;
use folio_common::Error;
use serde::{Deserialize, Serialize};

use super::form::BlogForm;
use crate::api::middleware::BlogsState;
use crate::domain::entities::{BlogPost, NewBlogPost};
use crate::domain::error::BlogError;

type Result<T> = std::result::Result<T, Error>;

/// Response for `DELETE /blogs/{id}`
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteBlogResponse {
    #[serde(rename = "deletedCount")]
    pub deleted_count: u64,
}

/// Create a blog post from a multipart form.
///
/// Text fields are validated first so an invalid request never reaches the
/// media store.
pub async fn create_blog(
    AdminUser(admin): AdminUser,
    State(state): State<BlogsState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<BlogPost>)> {
    let multipart = multipart.map_err(|e| Error::Validation(e.body_text()))?;
    let form = BlogForm::from_multipart(multipart).await?;
    let (draft, media) = form.into_parts()?;

    let image_url = state.media.resolve(media).await.map_err(BlogError::from)?;
    let post = state
        .store
        .create(NewBlogPost::new(draft, image_url))
        .await?;

    tracing::info!(id = %post.id, subject = %admin.subject, "Blog post published");
    Ok((StatusCode::CREATED, Json(post)))
}

/// List every blog post
pub async fn list_blogs(State(state): State<BlogsState>) -> Result<Json<Vec<BlogPost>>> {
    Ok(Json(state.store.list_all().await?))
}

/// Get a single blog post by ID
pub async fn get_blog(
    State(state): State<BlogsState>,
    Path(id): Path<String>,
) -> Result<Json<BlogPost>> {
    Ok(Json(state.store.get_by_id(&id).await?))
}

/// Delete a blog post
pub async fn delete_blog(
    State(state): State<BlogsState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteBlogResponse>> {
    let deleted_count = state.store.delete(&id).await?;
    Ok(Json(DeleteBlogResponse { deleted_count }))
}

/// List blog posts created on a `YYYY-MM-DD` day
pub async fn list_blogs_by_date(
    State(state): State<BlogsState>,
    Path(date): Path<String>,
) -> Result<Json<Vec<BlogPost>>> {
    Ok(Json(state.store.list_by_date(&date).await?))
}
