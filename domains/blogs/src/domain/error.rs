//! Blogs domain errors and their mapping onto API errors

use folio_common::{Error, RepositoryError};
use folio_media::MediaError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlogError {
    #[error("{0}")]
    ValidationFailure(String),

    #[error("Either an image file or an image_url is required")]
    MissingMedia,

    #[error("blog id '{0}' is malformed")]
    InvalidIdentifier(String),

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDateFormat(String),

    #[error("Blog post not found")]
    NotFound,

    #[error("Blog store unavailable: {0}")]
    StoreUnavailable(#[from] RepositoryError),

    #[error("Media upload failed: {0}")]
    MediaUploadFailure(#[source] MediaError),
}

impl From<MediaError> for BlogError {
    fn from(err: MediaError) -> Self {
        match err {
            MediaError::MissingMedia => BlogError::MissingMedia,
            other => BlogError::MediaUploadFailure(other),
        }
    }
}

impl From<validator::ValidationErrors> for BlogError {
    fn from(errors: validator::ValidationErrors) -> Self {
        BlogError::ValidationFailure(format!("Validation failed: {}", errors))
    }
}

impl From<BlogError> for Error {
    fn from(err: BlogError) -> Self {
        let message = err.to_string();
        match err {
            BlogError::ValidationFailure(_)
            | BlogError::MissingMedia
            | BlogError::InvalidDateFormat(_) => Error::Validation(message),
            BlogError::InvalidIdentifier(_) => Error::InvalidIdentifier(message),
            BlogError::NotFound => Error::NotFound(message),
            BlogError::StoreUnavailable(_) | BlogError::MediaUploadFailure(_) => {
                Error::Upstream(message)
            }
        }
    }
}
