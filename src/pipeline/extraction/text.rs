use super::types::TextExtractor;
use super::ExtractionError;

/// Plain-text reader. Invalid UTF-8 sequences are replaced rather than
/// rejected, so a mis-encoded note still contributes its readable parts.
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let text = String::from_utf8_lossy(bytes);
        Ok(text.strip_prefix('\u{FEFF}').unwrap_or(&text).to_string())
    }
}
