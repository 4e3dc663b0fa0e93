use std::path::Path;

use serde::Serialize;

use super::ExtractionError;

/// Upload formats we can read text from.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::PlainText => "plain_text",
        }
    }

    /// Dispatch on the file-name suffix, case-insensitively.
    ///
    /// Unknown or missing extensions are rejected with the extension that
    /// was seen (empty when the name has none).
    pub fn from_file_name(file_name: &str) -> Result<Self, ExtractionError> {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            "txt" => Ok(Self::PlainText),
            _ => Err(ExtractionError::UnsupportedFormat(ext)),
        }
    }
}
