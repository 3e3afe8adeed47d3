//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables and validated once
//! at startup. Any failure here is fatal: the server never binds a listener
//! with a partial configuration.

use std::env;

use thiserror::Error;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MEDIA_PROVIDER: &str = "cloudinary";
const DEFAULT_MEDIA_FOLDER: &str = "portfolio_blogs";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000";

/// Startup configuration failure
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Admin principal credentials
#[derive(Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Cloudinary account credentials
#[derive(Clone, PartialEq, Eq)]
pub struct CloudinaryCredentials {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

impl std::fmt::Debug for CloudinaryCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryCredentials")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[redacted]")
            .finish()
    }
}

#[derive(Clone)]
pub struct Config {
    /// Shared HS256 signing secret
    pub jwt_secret: String,

    /// `None` when either admin variable is unset; login then always rejects
    pub admin: Option<AdminCredentials>,

    /// Postgres server connection URL
    pub database_url: String,
    /// Database name, applied on top of `database_url`
    pub database_name: String,

    /// Media store
    pub media_provider: String,
    pub media_folder: String,
    pub cloudinary: Option<CloudinaryCredentials>,

    /// HTTP runtime
    pub cors_allowed_origins: String,
    pub port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("jwt_secret", &"[redacted]")
            .field("admin", &self.admin)
            .field("database_url", &"[redacted]")
            .field("database_name", &self.database_name)
            .field("media_provider", &self.media_provider)
            .field("media_folder", &self.media_folder)
            .field("cloudinary", &self.cloudinary)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("port", &self.port)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present)
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated the same as absent ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let jwt_secret = require("JWT_SECRET")?;
        let database_url = require("DATABASE_URL")?;
        let database_name = require("DB_NAME")?;

        let admin = match (get("ADMIN_USER"), get("ADMIN_PASS")) {
            (Some(username), Some(password)) => Some(AdminCredentials { username, password }),
            _ => None,
        };

        let cloudinary = match (
            get("CLOUDINARY_CLOUD_NAME"),
            get("CLOUDINARY_API_KEY"),
            get("CLOUDINARY_API_SECRET"),
        ) {
            (Some(cloud_name), Some(api_key), Some(api_secret)) => Some(CloudinaryCredentials {
                cloud_name,
                api_key,
                api_secret,
            }),
            _ => None,
        };

        let port = match get("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                reason: format!("'{}' is not a valid port number", raw),
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            jwt_secret,
            admin,
            database_url,
            database_name,
            media_provider: get("MEDIA_PROVIDER")
                .unwrap_or_else(|| DEFAULT_MEDIA_PROVIDER.to_string()),
            media_folder: get("MEDIA_FOLDER").unwrap_or_else(|| DEFAULT_MEDIA_FOLDER.to_string()),
            cloudinary,
            cors_allowed_origins: get("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string()),
            port,
        })
    }
}
