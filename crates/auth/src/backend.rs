//! Concrete authentication backend
//!
//! Wraps the `TokenIssuer` and `AuthConfig`. Owns the login policy and the
//! token check used by the `AdminUser` extractor.

use crate::config::AuthConfig;
use crate::context::AuthContext;
use crate::error::AuthError;
use crate::jwt::TokenIssuer;

/// Concrete authentication backend.
///
/// Domain states expose this via `FromRef`:
/// ```ignore
/// impl FromRef<MyDomainState> for AuthBackend {
///     fn from_ref(state: &MyDomainState) -> Self {
///         state.auth.clone()
///     }
/// }
/// ```
#[derive(Clone, Debug)]
pub struct AuthBackend {
    issuer: TokenIssuer,
    config: AuthConfig,
}

impl AuthBackend {
    pub fn new(config: AuthConfig) -> Self {
        if config.admin.is_none() {
            tracing::warn!("ADMIN_USER or ADMIN_PASS not set; login will reject every attempt");
        }

        Self {
            issuer: TokenIssuer::new(config.jwt_secret.clone()),
            config,
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    /// Exchange admin credentials for a bearer token.
    ///
    /// Comparison is exact and case-sensitive. It is a plain equality check,
    /// not constant-time.
    pub fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let Some(admin) = &self.config.admin else {
            tracing::warn!(username = %username, "Login rejected: admin credentials not configured");
            return Err(AuthError::InvalidLogin);
        };

        if username != admin.username || password != admin.password {
            tracing::info!(username = %username, "Login rejected: invalid credentials");
            return Err(AuthError::InvalidLogin);
        }

        let token = self.issuer.issue(username, self.config.token_ttl)?;
        tracing::info!(username = %username, "Admin login succeeded");
        Ok(token)
    }

    /// Token check used by the authorization gate
    pub fn authenticate(&self, token: &str) -> Result<AuthContext, AuthError> {
        let claims = self
            .issuer
            .validate(token)
            .map_err(|_| AuthError::InvalidCredential)?;

        Ok(AuthContext::from(claims))
    }
}
