pub mod types;
pub mod format;
pub mod sanitize;
pub mod pdf;
pub mod docx;
pub mod text;
pub mod orchestrator;

pub use types::*;
pub use format::*;
pub use sanitize::*;
pub use pdf::*;
pub use docx::*;
pub use text::*;
pub use orchestrator::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to process PDF file: {0}")]
    PdfParsing(String),

    #[error("Failed to process DOCX file: {0}")]
    DocxParsing(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Extraction task failed: {0}")]
    TaskJoin(String),
}
