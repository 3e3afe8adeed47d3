//! Route definitions for Blogs domain API

use axum::{routing::get, Router};

use super::handlers::blogs;
use super::middleware::BlogsState;

/// Create all Blogs domain API routes.
///
/// Only creation passes the authorization gate; reads and deletes do not.
pub fn routes() -> Router<BlogsState> {
    Router::new()
        .route("/blogs", get(blogs::list_blogs).post(blogs::create_blog))
        .route(
            "/blogs/{id}",
            get(blogs::get_blog).delete(blogs::delete_blog),
        )
        .route("/blogs/date/{date}", get(blogs::list_blogs_by_date))
}
