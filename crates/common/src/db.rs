//! Shared database types for Folio
//!
//! Repositories report failures with `RepositoryError`; domains decide how
//! those surface to clients.

use thiserror::Error;

/// Database-specific error types
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Database connection error: {0}")]
    Connection(#[from] sqlx::Error),

    #[error("Database operation timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}
