//! Authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Authentication error
///
/// Token validation collapses every cause (bad encoding, signature,
/// algorithm, expiry) into `InvalidToken` so callers cannot tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No `Authorization` header, or not the bearer scheme
    #[error("missing bearer credential")]
    MissingCredential,
    /// Bearer credential present but rejected by the validator
    #[error("invalid bearer credential")]
    InvalidCredential,
    /// Validator-level failure
    #[error("invalid token")]
    InvalidToken,
    /// Username/password mismatch, or login disabled
    #[error("invalid login credentials")]
    InvalidLogin,
    /// Signing secret absent
    #[error("token signing failed")]
    SigningFailure,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AuthError::MissingCredential => (
                StatusCode::UNAUTHORIZED,
                "MISSING_AUTHORIZATION",
                "Missing or invalid authorization header",
            ),
            AuthError::InvalidCredential | AuthError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
                "Invalid or expired token",
            ),
            AuthError::InvalidLogin => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                "Invalid credentials",
            ),
            AuthError::SigningFailure => {
                tracing::error!("Token signing failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "TOKEN_SIGNING_FAILED",
                    "Failed to generate token",
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
