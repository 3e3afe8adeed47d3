//! Authentication for the Folio API
//!
//! Provides admin login (`POST /login`), HS256 token issuing and validation,
//! and the `AdminUser` extractor that gates mutating routes. Works with any domain
//! state implementing `FromRef<S>` for `AuthBackend`.

mod backend;
mod claims;
mod config;
mod context;
mod error;
mod extractors;
mod handlers;
mod jwt;

pub use backend::AuthBackend;
pub use claims::AdminClaims;
pub use config::{AuthConfig, DEFAULT_TOKEN_TTL_HOURS};
pub use context::AuthContext;
pub use error::AuthError;
pub use extractors::AdminUser;
pub use handlers::{login, routes, LoginRequest, LoginResponse};
pub use jwt::TokenIssuer;
