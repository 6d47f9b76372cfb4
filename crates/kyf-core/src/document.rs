//! The identity document image attached to a submission.

use crate::error::CoreError;

/// A single image file chosen by the fan (photo of their RG/CPF).
#[derive(Clone, PartialEq, Eq)]
pub struct DocumentImage {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl DocumentImage {
    /// Wraps file contents, rejecting anything that is not an `image/*` type.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnsupportedFileType`] for non-image MIME types.
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, CoreError> {
        let file_name = file_name.into();
        let mime_type = mime_type.into().trim().to_ascii_lowercase();
        if !is_image_mime(&mime_type) {
            return Err(CoreError::UnsupportedFileType {
                file_name,
                mime_type,
            });
        }
        Ok(Self {
            file_name,
            mime_type,
            bytes,
        })
    }

    /// Like [`DocumentImage::new`], inferring the MIME type from the file name.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnsupportedFileType`] when the extension is not a
    /// known image type.
    pub fn from_file_name(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, CoreError> {
        let file_name = file_name.into();
        let mime_type = mime_for_file_name(&file_name);
        Self::new(file_name, mime_type, bytes)
    }
}

// Contents are elided so logging a profile never dumps image bytes.
impl std::fmt::Debug for DocumentImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentImage")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

fn is_image_mime(mime_type: &str) -> bool {
    mime_type
        .strip_prefix("image/")
        .is_some_and(|subtype| !subtype.is_empty())
}

/// Best-effort MIME type from a file extension.
#[must_use]
pub fn mime_for_file_name(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "heic" => "image/heic",
        "tif" | "tiff" => "image/tiff",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
