//! Authorization context for authenticated callers

use chrono::{DateTime, Utc};

use crate::claims::AdminClaims;

/// Represents a caller that presented a valid bearer token.
///
/// There is a single principal, so no role or scope data is carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub subject: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<AdminClaims> for AuthContext {
    fn from(claims: AdminClaims) -> Self {
        Self {
            expires_at: claims.expires_at(),
            subject: claims.sub,
        }
    }
}
