use serde::Serialize;

use super::format::DocumentFormat;
use super::ExtractionError;

/// One file received in the `files` multipart field.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Outcome of extracting one uploaded file.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedDocument {
    pub file_name: String,
    pub format: Option<DocumentFormat>,
    pub text: String,
    /// Error text when extraction failed; `text` then holds the placeholder.
    pub error: Option<String>,
}

impl ExtractedDocument {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Format-specific text extraction.
pub trait TextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}
