use crate::models::image_types::{Preview, SelectedImage};
use base64::Engine;
use image::ImageReader;
use std::io::Cursor;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("empty file")]
    Empty,
    #[error("preview task failed: {0}")]
    Task(String),
}

/// Encode the raw bytes as a data URL. Nothing is decoded, so any `image/*`
/// type the renderer understands gets a preview.
pub fn build_preview(image: &SelectedImage) -> Result<Preview, PreviewError> {
    if image.bytes.is_empty() {
        return Err(PreviewError::Empty);
    }

    let (width, height) = match header_dimensions(&image.bytes) {
        Some((w, h)) => (Some(w), Some(h)),
        None => (None, None),
    };

    let b64 = base64::engine::general_purpose::STANDARD.encode(&image.bytes);
    Ok(Preview {
        data_url: format!("data:{};base64,{}", image.mime_type, b64),
        width,
        height,
    })
}

/// Width and height from the image header, without decoding pixels.
fn header_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}

/// Runs [`build_preview`] on the blocking pool.
pub async fn derive_preview(image: SelectedImage) -> Result<Preview, PreviewError> {
    tokio::task::spawn_blocking(move || build_preview(&image))
        .await
        .map_err(|e| PreviewError::Task(e.to_string()))?
}
