//! API layer for the Blogs domain
//!
//! Contains HTTP handlers, routes, and domain state definition.

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::BlogsState;
pub use routes::routes;
