use bytes::Bytes;
use serde::Serialize;

/// A file the user picked or dropped, before or after it has been accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedImage {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Bytes,
}

impl SelectedImage {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        SelectedImage {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Locally derived, renderable encoding of the selected image. Dimensions
/// are only known for formats whose header can be read locally.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Preview {
    pub data_url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}
