//! Axum extractors for authentication
//!
//! Generic over any state `S` where `AuthBackend: FromRef<S>`.
//! This is axum's idiomatic nested-state pattern.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::backend::AuthBackend;
use crate::context::AuthContext;
use crate::error::AuthError;
use crate::jwt::extract_bearer_token;

/// Authorization gate for mutating routes.
///
/// Rejects with `MissingCredential` when no bearer token is presented and
/// with `InvalidCredential` when the token does not validate. No further
/// permission check happens: a valid token is the admin.
#[derive(Debug)]
pub struct AdminUser(pub AuthContext);

impl<S> FromRequestParts<S> for AdminUser
where
    AuthBackend: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let backend = AuthBackend::from_ref(state);

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingCredential)?;

        let token = extract_bearer_token(auth_header)?;
        let auth_context = backend.authenticate(&token).inspect_err(|_| {
            tracing::debug!(path = %parts.uri.path(), "Rejected request with invalid bearer token");
        })?;

        Ok(AdminUser(auth_context))
    }
}
