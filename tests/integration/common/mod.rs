//! Common test utilities and fixtures for integration tests
//!
//! This module provides shared infrastructure for all integration tests:
//! - Test configuration loaded from the environment
//! - A composed application over in-memory storage and a mock media store
//! - Request builders (JSON, multipart, bearer auth) and body parsing

use std::env;
use std::sync::{Arc, Once};

use axum::{
    body::Body,
    http::{Method, Request, Response, StatusCode},
    Router,
};
use folio_auth::{AuthBackend, AuthConfig};
use folio_blogs::{BlogStore, BlogsState, InMemoryBlogRepository};
use folio_common::AdminCredentials;
use folio_media::mock::MockMediaStore;
use folio_media::MediaResolver;
use serde_json::{json, Value};
use tower::ServiceExt;

static INIT: Once = Once::new();

pub const MULTIPART_BOUNDARY: &str = "folio-integration-boundary";

/// Test environment configuration
#[derive(Debug, Clone)]
pub struct TestConfig {
    pub jwt_secret: String,
    pub admin_user: String,
    pub admin_pass: String,
    pub media_folder: String,
    pub cors_allowed_origins: String,
}

impl TestConfig {
    pub fn from_env() -> Self {
        INIT.call_once(|| {
            dotenvy::from_filename(".env.test").ok();
        });

        Self {
            jwt_secret: env::var("TEST_JWT_SECRET")
                .unwrap_or_else(|_| "test_secret_key_for_testing_only".to_string()),
            admin_user: env::var("TEST_ADMIN_USER").unwrap_or_else(|_| "admin".to_string()),
            admin_pass: env::var("TEST_ADMIN_PASS")
                .unwrap_or_else(|_| "correct-horse-battery".to_string()),
            media_folder: "portfolio_blogs".to_string(),
            cors_allowed_origins: "http://localhost:3000".to_string(),
        }
    }
}

/// Composed application with handles on its test doubles
pub struct TestApp {
    pub config: TestConfig,
    pub auth: AuthBackend,
    pub repo: InMemoryBlogRepository,
    pub media: MockMediaStore,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_admin(true)
    }

    /// Application whose login is disabled (no admin credentials configured)
    pub fn without_admin() -> Self {
        Self::with_admin(false)
    }

    fn with_admin(admin_configured: bool) -> Self {
        let config = TestConfig::from_env();

        let admin = admin_configured.then(|| AdminCredentials {
            username: config.admin_user.clone(),
            password: config.admin_pass.clone(),
        });
        let auth = AuthBackend::new(AuthConfig::new(config.jwt_secret.clone(), admin));
        let repo = InMemoryBlogRepository::new();
        let media = MockMediaStore::new();

        let state = BlogsState {
            store: BlogStore::new(Arc::new(repo.clone())),
            auth: auth.clone(),
            media: MediaResolver::new(Arc::new(media.clone()), config.media_folder.clone()),
        };
        let router = folio_app::build_router(state, &config.cors_allowed_origins);

        Self {
            config,
            auth,
            repo,
            media,
            router,
        }
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router().oneshot(request).await.unwrap()
    }

    /// Send and decode the JSON body (Null when the body is not JSON)
    pub async fn send_json(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.send(request).await;
        let status = response.status();
        (status, parse_body(response).await)
    }

    /// Log in through the HTTP endpoint with the configured admin credentials
    pub async fn login(&self) -> String {
        let (status, body) = self
            .send_json(json_request(
                Method::POST,
                "/api/login",
                json!({
                    "username": self.config.admin_user,
                    "password": self.config.admin_pass,
                }),
            ))
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        body["token"].as_str().unwrap().to_string()
    }

    /// Create a post from a direct image URL and return its JSON
    pub async fn create_post(&self, token: &str, title: &str, image_url: &str) -> Value {
        let form = MultipartForm::new()
            .text("title", title)
            .text("description", "integration test post")
            .text("image_url", image_url);
        let (status, body) = self.send_json(form.into_request(Some(token))).await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
        body
    }
}

/// Build a JSON request
pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// Build a bodyless request, optionally with a bearer token
pub fn request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

/// Parse response body as JSON Value
pub async fn parse_body(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or(Value::Null)
}

/// Minimal multipart/form-data body builder
#[derive(Debug, Default)]
pub struct MultipartForm {
    body: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// `POST /api/blogs` carrying this form
    pub fn into_request(mut self, token: Option<&str>) -> Request<Body> {
        self.body
            .extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

        let mut builder = Request::builder()
            .method(Method::POST)
            .uri("/api/blogs")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
            );
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        builder.body(Body::from(self.body)).unwrap()
    }
}
