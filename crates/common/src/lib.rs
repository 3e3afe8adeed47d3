//! Shared utilities, configuration, and error handling for Folio
//!
//! This crate provides common functionality used across the Folio API:
//! - Configuration management following 12-factor principles
//! - Error types and handling
//! - Request extractors

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;

pub use config::{AdminCredentials, CloudinaryCredentials, Config, ConfigError};
pub use db::RepositoryError;
pub use error::Error;
pub use extractors::ValidatedJson;
