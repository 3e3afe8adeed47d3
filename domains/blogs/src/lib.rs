//! Blogs domain: blog post lifecycle, storage, and HTTP handlers

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{BlogDraft, BlogPost, NewBlogPost};
pub use domain::error::BlogError;
pub use domain::validation::{day_window, parse_blog_id};

// Re-export repository types
pub use repository::{
    BlogRepository, BlogStore, InMemoryBlogRepository, PgBlogRepository, STORE_OPERATION_TIMEOUT,
};

// Re-export API types
pub use api::routes;
pub use api::BlogsState;
