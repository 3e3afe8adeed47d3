//! Login endpoint

use axum::{
    extract::{FromRef, State},
    routing::post,
    Json, Router,
};
use folio_common::ValidatedJson;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::backend::AuthBackend;
use crate::error::AuthError;

/// Admin login request
#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Exchange admin credentials for a bearer token
pub async fn login(
    State(backend): State<AuthBackend>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    let token = backend.login(&req.username, &req.password)?;
    Ok(Json(LoginResponse { token }))
}

/// Login route, mountable on any state that exposes an `AuthBackend`
pub fn routes<S>() -> Router<S>
where
    AuthBackend: FromRef<S>,
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/login", post(login))
}
