//! Multipart upload collection.
//!
//! The field names here (`video`, `audio`, `audio_lang`, `subtitles`,
//! `file`) are the service's wire contract. Unknown fields are ignored;
//! multipart read failures are client errors.

use axum::extract::multipart::{Field, Multipart, MultipartError};
use bytes::Bytes;
use sp_core::{Error, Result};

/// One uploaded file: its client-supplied name and raw bytes.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub data: Bytes,
}

/// The `/run-packager` multipart form.
#[derive(Debug, Default)]
pub struct PackagerForm {
    /// The single `video` file (first occurrence wins).
    pub video: Option<UploadedFile>,
    /// `audio` files in upload order.
    pub audio: Vec<UploadedFile>,
    /// `audio_lang` tags in upload order, positionally paired with `audio`.
    pub audio_lang: Vec<String>,
    /// `subtitles` files in upload order.
    pub subtitles: Vec<UploadedFile>,
}

impl PackagerForm {
    /// Collect all recognized fields from the multipart body.
    pub async fn collect(mut multipart: Multipart) -> Result<Self> {
        let mut form = PackagerForm::default();

        while let Some(field) = multipart.next_field().await.map_err(bind_error)? {
            match field.name().unwrap_or("") {
                "video" => {
                    let file = read_file(field).await?;
                    if form.video.is_none() {
                        form.video = Some(file);
                    }
                }
                "audio" => form.audio.push(read_file(field).await?),
                "audio_lang" => form.audio_lang.push(field.text().await.map_err(bind_error)?),
                "subtitles" => form.subtitles.push(read_file(field).await?),
                _ => {}
            }
        }

        Ok(form)
    }
}

/// Read the single file uploaded under `field_name`.
///
/// Returns a validation error with `missing_message` when the field is
/// absent from the body.
pub async fn single_file(
    mut multipart: Multipart,
    field_name: &str,
    missing_message: &str,
) -> Result<UploadedFile> {
    while let Some(field) = multipart.next_field().await.map_err(bind_error)? {
        if field.name() == Some(field_name) {
            return read_file(field).await;
        }
    }

    Err(Error::validation(missing_message))
}

async fn read_file(field: Field<'_>) -> Result<UploadedFile> {
    let file_name = field.file_name().unwrap_or("upload.bin").to_string();
    let data = field.bytes().await.map_err(bind_error)?;
    Ok(UploadedFile { file_name, data })
}

fn bind_error(e: MultipartError) -> Error {
    Error::validation(format!("Failed to bind form data and files: {e}"))
}
