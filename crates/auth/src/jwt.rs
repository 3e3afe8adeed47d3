//! JWT issuing, validation, and token extraction helpers

use std::sync::Arc;

use axum::http::HeaderValue;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::claims::AdminClaims;
use crate::error::AuthError;

/// The only accepted signing scheme
const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

/// Mints and verifies HS256 bearer tokens from a single shared secret.
///
/// The secret is fixed at construction and never mutated; clones share it.
#[derive(Clone)]
pub struct TokenIssuer {
    secret: Arc<str>,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("secret", &"[redacted]")
            .finish()
    }
}

impl TokenIssuer {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Arc::from(secret.into()),
        }
    }

    /// Issue a token for `subject` that expires `ttl` from now
    pub fn issue(&self, subject: &str, ttl: Duration) -> Result<String, AuthError> {
        if self.secret.is_empty() {
            tracing::error!("Refusing to sign token: signing secret is empty");
            return Err(AuthError::SigningFailure);
        }

        let now = Utc::now();
        let expiry = now
            .checked_add_signed(ttl)
            .ok_or(AuthError::SigningFailure)?;

        let claims = AdminClaims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_bytes());
        encode(&Header::new(SIGNING_ALGORITHM), &claims, &encoding_key).map_err(|e| {
            tracing::error!(error = %e, "JWT signing failed");
            AuthError::SigningFailure
        })
    }

    /// Validate a token and return its claims.
    ///
    /// Every failure is reported as `AuthError::InvalidToken`.
    pub fn validate(&self, token: &str) -> Result<AdminClaims, AuthError> {
        if self.secret.is_empty() {
            return Err(AuthError::InvalidToken);
        }

        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.leeway = 0;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());

        let token_data = decode::<AdminClaims>(token, &decoding_key, &validation).map_err(|e| {
            tracing::debug!(error = %e, "JWT validation failed");
            AuthError::InvalidToken
        })?;

        // now < expiry, strictly
        if token_data.claims.exp <= Utc::now().timestamp() {
            tracing::debug!("JWT validation failed: token expired");
            return Err(AuthError::InvalidToken);
        }

        Ok(token_data.claims)
    }
}

/// Extract bearer token from Authorization header
pub(crate) fn extract_bearer_token(header: &HeaderValue) -> Result<String, AuthError> {
    let header_str = header
        .to_str()
        .map_err(|_| AuthError::MissingCredential)?;

    if let Some(token) = header_str.strip_prefix("Bearer ") {
        Ok(token.trim().to_string())
    } else {
        Err(AuthError::MissingCredential)
    }
}
