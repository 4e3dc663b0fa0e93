//! Per-request extraction of every uploaded file.
//!
//! Files are extracted concurrently on the blocking pool and joined back
//! in upload order. A failing file never fails the request: its slot gets
//! an inline placeholder and the other files carry on.

use futures_util::future::join_all;

use super::docx::DocxTextExtractor;
use super::format::DocumentFormat;
use super::pdf::PdfTextExtractor;
use super::sanitize::sanitize_extracted_text;
use super::text::PlainTextExtractor;
use super::types::{ExtractedDocument, TextExtractor, UploadedFile};
use super::ExtractionError;

/// Text standing in for a file that could not be read.
pub fn error_placeholder(file_name: &str) -> String {
    format!("[Error processing file {file_name}]")
}

fn extractor_for(format: DocumentFormat) -> &'static (dyn TextExtractor + Send + Sync) {
    match format {
        DocumentFormat::Pdf => &PdfTextExtractor,
        DocumentFormat::Docx => &DocxTextExtractor,
        DocumentFormat::PlainText => &PlainTextExtractor,
    }
}

/// Extract and sanitize the text of one file. Blocking.
pub fn extract_file(file: &UploadedFile) -> Result<(DocumentFormat, String), ExtractionError> {
    let format = DocumentFormat::from_file_name(&file.file_name)?;
    let raw = extractor_for(format).extract_text(&file.bytes)?;
    Ok((format, sanitize_extracted_text(&raw)))
}

fn to_document(
    file_name: String,
    result: Result<(DocumentFormat, String), ExtractionError>,
) -> ExtractedDocument {
    match result {
        Ok((format, text)) => {
            tracing::info!(
                file = %file_name,
                format = format.as_str(),
                chars = text.chars().count(),
                "File text extracted"
            );
            ExtractedDocument {
                file_name,
                format: Some(format),
                text,
                error: None,
            }
        }
        Err(e) => {
            tracing::warn!(file = %file_name, error = %e, "File extraction failed");
            ExtractedDocument {
                format: DocumentFormat::from_file_name(&file_name).ok(),
                text: error_placeholder(&file_name),
                error: Some(e.to_string()),
                file_name,
            }
        }
    }
}

/// Run one extraction job on the blocking pool. A panic inside the job is
/// caught by the join handle and becomes that file's error.
async fn extract_isolated<F>(file_name: String, job: F) -> ExtractedDocument
where
    F: FnOnce() -> Result<(DocumentFormat, String), ExtractionError> + Send + 'static,
{
    let result = tokio::task::spawn_blocking(job)
        .await
        .unwrap_or_else(|e| Err(ExtractionError::TaskJoin(e.to_string())));
    to_document(file_name, result)
}

/// Extract all files concurrently. Output order matches input order.
pub async fn extract_documents(files: Vec<UploadedFile>) -> Vec<ExtractedDocument> {
    let tasks = files.into_iter().map(|file| {
        let file_name = file.file_name.clone();
        extract_isolated(file_name, move || extract_file(&file))
    });

    join_all(tasks).await
}
