//! Authentication configuration

use chrono::Duration;
use folio_common::{AdminCredentials, Config};

/// Lifetime of tokens minted by a successful login
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Authentication configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    /// `None` disables login entirely
    pub admin: Option<AdminCredentials>,
    pub token_ttl: Duration,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>, admin: Option<AdminCredentials>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            admin,
            token_ttl: Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[redacted]")
            .field("admin", &self.admin)
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}

impl From<&Config> for AuthConfig {
    fn from(config: &Config) -> Self {
        Self::new(config.jwt_secret.clone(), config.admin.clone())
    }
}
