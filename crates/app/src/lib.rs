//! Folio application composition root
//!
//! Composes the auth and blogs routers with shared middleware into a single
//! application.

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use folio_auth::{AuthBackend, AuthConfig};
use folio_blogs::{BlogStore, BlogsState};
use folio_common::Config;
use folio_media::{MediaConfig, MediaResolver, MediaStoreFactory};
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Request body ceiling (multipart uploads included)
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Build the Blogs domain state from configuration and a database pool
pub fn build_state(config: &Config, pool: PgPool) -> Result<BlogsState, anyhow::Error> {
    let media_config = MediaConfig::from(config);
    let media_store = MediaStoreFactory::create(&media_config)?;

    Ok(BlogsState {
        store: BlogStore::postgres(pool),
        auth: AuthBackend::new(AuthConfig::from(config)),
        media: MediaResolver::new(media_store, media_config.folder)
            .with_upload_timeout(media_config.upload_timeout),
    })
}

/// Create the main application router with all routes and middleware
pub fn create_app(config: &Config, pool: PgPool) -> Result<Router, anyhow::Error> {
    let state = build_state(config, pool)?;
    Ok(build_router(state, &config.cors_allowed_origins))
}

/// Compose domain routers with shared infrastructure routes and layers
pub fn build_router(state: BlogsState, cors_allowed_origins: &str) -> Router {
    let api = folio_auth::routes::<BlogsState>().merge(folio_blogs::routes());

    Router::new()
        .route("/health", get(health_check))
        .route("/", get(|| async { "Folio API v0.0.1-SNAPSHOT" }))
        .nest("/api", api)
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors_layer(cors_allowed_origins))
                .into_inner(),
        )
}

/// CORS for a comma-separated origin list.
///
/// `*` mirrors the request origin, since credentials are allowed.
pub fn build_cors_layer(allowed_origins: &str) -> CorsLayer {
    let origins: Vec<&str> = allowed_origins
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .collect();

    let allow_origin = if origins.contains(&"*") {
        AllowOrigin::mirror_request()
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
