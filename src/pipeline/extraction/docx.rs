use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use super::types::TextExtractor;
use super::ExtractionError;

const DOCUMENT_XML: &str = "word/document.xml";

/// Upper bound on the decompressed size of `word/document.xml`.
pub const MAX_DOCUMENT_XML_BYTES: u64 = 32 * 1024 * 1024;

/// Raw-text extractor for Office Open XML documents.
///
/// Reads the run text of `word/document.xml`. Paragraphs are separated by
/// a blank line, matching how Word exports plain text. Tabs and manual
/// line breaks are kept, formatting is dropped.
pub struct DocxTextExtractor;

impl TextExtractor for DocxTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let xml = read_document_xml(bytes, MAX_DOCUMENT_XML_BYTES)?;
        document_xml_to_text(&xml)
    }
}

/// Inflate `word/document.xml`, refusing entries larger than `limit`.
///
/// The declared size is checked first; the read itself is capped as well
/// since the header can lie.
fn read_document_xml(bytes: &[u8], limit: u64) -> Result<String, ExtractionError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractionError::DocxParsing(format!("Not a DOCX archive: {e}")))?;

    let entry = archive
        .by_name(DOCUMENT_XML)
        .map_err(|e| ExtractionError::DocxParsing(format!("Missing {DOCUMENT_XML}: {e}")))?;

    let too_large = || {
        ExtractionError::DocxParsing(format!("{DOCUMENT_XML} exceeds {limit} bytes"))
    };
    if entry.size() > limit {
        return Err(too_large());
    }

    let mut content = String::new();
    entry.take(limit + 1).read_to_string(&mut content)?;
    if content.len() as u64 > limit {
        return Err(too_large());
    }
    Ok(content)
}

fn document_xml_to_text(xml: &str) -> Result<String, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:t" => in_text_run = true,
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:tab" => current.push('\t'),
                b"w:br" | b"w:cr" => current.push('\n'),
                b"w:p" => paragraphs.push(String::new()),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text_run => {
                let text = t
                    .unescape()
                    .map_err(|e| ExtractionError::DocxParsing(e.to_string()))?;
                current.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ExtractionError::DocxParsing(format!(
                    "Malformed {DOCUMENT_XML}: {e}"
                )))
            }
            _ => {}
        }
    }

    if !current.is_empty() {
        paragraphs.push(current);
    }
    Ok(paragraphs.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn make_test_docx(body_xml: &str) -> Vec<u8> {
        use zip::write::SimpleFileOptions;

        let mut buf = Cursor::new(Vec::new());
        {
            let mut zip = zip::ZipWriter::new(&mut buf);
            let options =
                SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
            zip.start_file(DOCUMENT_XML, options).unwrap();
            write!(
                zip,
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body_xml}</w:body></w:document>"#
            )
            .unwrap();
            zip.finish().unwrap();
        }
        buf.into_inner()
    }

    fn paragraph(text: &str) -> String {
        format!(r#"<w:p><w:r><w:t xml:space="preserve">{text}</w:t></w:r></w:p>"#)
    }

    #[test]
    fn paragraphs_are_separated_by_blank_line() {
        let body = [paragraph("DIAGNOSIS:"), paragraph("Community-acquired pneumonia")].concat();
        let text = DocxTextExtractor.extract_text(&make_test_docx(&body)).unwrap();
        assert_eq!(text, "DIAGNOSIS:\n\nCommunity-acquired pneumonia");
    }

    #[test]
    fn keyword_match_in_docx_keeps_to_its_paragraph() {
        let body = [
            paragraph("Admitted via ED."),
            paragraph("Febrile on arrival."),
            paragraph("Started antibiotic therapy early"),
            paragraph("Discharged home on day four."),
        ]
        .concat();
        let text = DocxTextExtractor.extract_text(&make_test_docx(&body)).unwrap();
        let found = crate::pipeline::sections::find_section(&text, &["therapy"]);
        assert_eq!(found.as_deref(), Some("Started antibiotic therapy early"));
    }

    #[test]
    fn runs_within_paragraph_are_joined() {
        let body = r#"<w:p><w:r><w:t>Metformin </w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t>500mg</w:t></w:r></w:p>"#;
        let text = DocxTextExtractor.extract_text(&make_test_docx(body)).unwrap();
        assert_eq!(text, "Metformin 500mg");
    }

    #[test]
    fn empty_paragraphs_keep_blank_lines() {
        let body = [paragraph("Notes:"), "<w:p/>".to_string(), paragraph("none")].concat();
        let text = DocxTextExtractor.extract_text(&make_test_docx(&body)).unwrap();
        assert_eq!(text, "Notes:\n\n\n\nnone");
    }

    #[test]
    fn tabs_breaks_and_entities() {
        let body = r#"<w:p><w:r><w:t>BP</w:t><w:tab/><w:t>&lt; 140/90</w:t><w:br/><w:t>recheck</w:t></w:r></w:p>"#;
        let text = DocxTextExtractor.extract_text(&make_test_docx(body)).unwrap();
        assert_eq!(text, "BP\t< 140/90\nrecheck");
    }

    #[test]
    fn non_zip_input_is_rejected() {
        let err = DocxTextExtractor.extract_text(b"plain text, not a docx").unwrap_err();
        assert!(matches!(err, ExtractionError::DocxParsing(_)));
    }

    #[test]
    fn oversized_document_xml_is_rejected() {
        let body = paragraph(&"x".repeat(2048));
        let docx = make_test_docx(&body);

        let err = read_document_xml(&docx, 1024).unwrap_err();
        assert!(matches!(err, ExtractionError::DocxParsing(_)));
        assert!(err.to_string().contains("exceeds 1024 bytes"));

        let xml = read_document_xml(&docx, MAX_DOCUMENT_XML_BYTES).unwrap();
        assert!(xml.len() > 2048);
    }

    #[test]
    fn archive_without_document_xml_is_rejected() {
        use zip::write::SimpleFileOptions;

        let mut buf = Cursor::new(Vec::new());
        {
            let mut zip = zip::ZipWriter::new(&mut buf);
            zip.start_file("readme.txt", SimpleFileOptions::default()).unwrap();
            zip.write_all(b"hello").unwrap();
            zip.finish().unwrap();
        }
        let err = DocxTextExtractor.extract_text(&buf.into_inner()).unwrap_err();
        assert!(err.to_string().contains(DOCUMENT_XML));
    }
}
