//! Multipart body of a blog creation request

use axum::extract::Multipart;
use folio_common::Error;
use folio_media::{MediaInput, UploadedImage};
use validator::Validate;

use crate::domain::entities::BlogDraft;
use crate::domain::error::BlogError;

/// Field carrying an uploaded image file
pub const IMAGE_FIELD: &str = "image";
/// Field carrying a pre-hosted image URL
pub const IMAGE_URL_FIELD: &str = "image_url";

/// Raw fields of `POST /blogs`, before validation
#[derive(Debug, Default)]
pub struct BlogForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub image: Option<UploadedImage>,
}

impl BlogForm {
    /// Drain a multipart body. Unknown fields are skipped.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, Error> {
        let mut form = BlogForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| Error::Validation(e.body_text()))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "title" => form.title = Some(read_text(field).await?),
                "description" => form.description = Some(read_text(field).await?),
                IMAGE_URL_FIELD => form.image_url = Some(read_text(field).await?),
                IMAGE_FIELD => {
                    let file_name = field.file_name().map(str::to_string);
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| Error::Validation(e.body_text()))?;

                    tracing::debug!(
                        file_name = file_name.as_deref().unwrap_or_default(),
                        size = bytes.len(),
                        "Received image upload"
                    );
                    form.image = Some(UploadedImage {
                        file_name,
                        bytes: bytes.to_vec(),
                    });
                }
                other => tracing::debug!(field = %other, "Ignoring unknown multipart field"),
            }
        }

        Ok(form)
    }

    /// Split into validated text fields and the media to resolve
    pub fn into_parts(self) -> Result<(BlogDraft, MediaInput), BlogError> {
        let draft = BlogDraft {
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
        };
        draft.validate()?;

        Ok((
            draft,
            MediaInput {
                image_url: self.image_url,
                upload: self.image,
            },
        ))
    }
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, Error> {
    field
        .text()
        .await
        .map_err(|e| Error::Validation(e.body_text()))
}
