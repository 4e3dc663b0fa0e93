use std::sync::LazyLock;

use regex::Regex;

/// Control characters other than tab and newline.
static CONTROL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F]").expect("valid regex"));

/// Sanitize extracted text before section scanning.
///
/// Normalizes line endings, strips control characters and trailing
/// whitespace. Blank lines are kept: the section locator uses them as
/// paragraph boundaries.
pub fn sanitize_extracted_text(raw: &str) -> String {
    let unified = raw.replace("\r\n", "\n").replace('\r', "\n");
    let stripped = CONTROL_CHARS.replace_all(&unified, "");

    stripped
        .split('\n')
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_null_bytes() {
        let raw = "Patient: Marie\x00Dubois";
        assert_eq!(sanitize_extracted_text(raw), "Patient: MarieDubois");
    }

    #[test]
    fn strips_control_characters() {
        let raw = "Dose: 500mg\x01\x02\x03\nDate: 2024-01-15";
        let clean = sanitize_extracted_text(raw);
        assert!(!clean.contains('\x01'));
        assert_eq!(clean, "Dose: 500mg\nDate: 2024-01-15");
    }

    #[test]
    fn normalizes_line_endings() {
        assert_eq!(sanitize_extracted_text("a\r\nb\rc"), "a\nb\nc");
    }

    #[test]
    fn keeps_blank_lines_and_tabs() {
        let raw = "DIAGNOSIS:   \n\tAsthma\n\n\nNotes:";
        assert_eq!(sanitize_extracted_text(raw), "DIAGNOSIS:\n\tAsthma\n\n\nNotes:");
    }

    #[test]
    fn preserves_medical_punctuation() {
        let raw = "Amoxicillin-Clavulanate 875mg/125mg (7 days) 2L/min, 38.5°C";
        assert_eq!(sanitize_extracted_text(raw), raw);
    }
}
