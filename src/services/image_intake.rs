use crate::models::image_types::SelectedImage;
use image::ImageFormat;
use std::path::Path;
use thiserror::Error;

const FALLBACK_MIME: &str = "application/octet-stream";

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("{file_name} is not an image ({mime_type})")]
    NotAnImage { file_name: String, mime_type: String },
    #[error("failed to read {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Whether a declared MIME type is acceptable for classification.
pub fn is_image_mime(mime_type: &str) -> bool {
    mime_type
        .trim()
        .to_ascii_lowercase()
        .starts_with("image/")
}

/// MIME type derived from the file extension, the way a browser file input
/// would report it.
pub fn mime_for_name(file_name: &str) -> String {
    ImageFormat::from_path(file_name)
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|_| FALLBACK_MIME.to_string())
}

/// Read a file chosen with the picker.
pub async fn picked(path: &Path) -> Result<SelectedImage, IntakeError> {
    let file_name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| IntakeError::Unreadable {
            path: path.display().to_string(),
            source,
        })?;

    let mime_type = mime_for_name(&file_name);
    Ok(SelectedImage::new(file_name, mime_type, bytes))
}

/// Wrap a dropped blob. An empty or missing declared type falls back to the
/// extension.
pub fn dropped(file_name: impl Into<String>, mime_type: Option<&str>, bytes: impl Into<bytes::Bytes>) -> SelectedImage {
    let file_name = file_name.into();
    let mime_type = match mime_type.map(str::trim) {
        Some(declared) if !declared.is_empty() => declared.to_string(),
        _ => mime_for_name(&file_name),
    };
    SelectedImage::new(file_name, mime_type, bytes)
}

/// Reject anything whose MIME type is not `image/*`.
pub fn accept(image: &SelectedImage) -> Result<(), IntakeError> {
    if is_image_mime(&image.mime_type) {
        Ok(())
    } else {
        Err(IntakeError::NotAnImage {
            file_name: image.file_name.clone(),
            mime_type: image.mime_type.clone(),
        })
    }
}
