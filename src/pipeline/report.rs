//! HTML rendering of the discharge summary.
//!
//! Every value substituted into markup goes through [`escape_html`]; document
//! text is displayed with `white-space: pre-wrap` so line structure survives.

use std::fmt::Write;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::sections::{ClinicalFlags, ResolvedSections};

/// Patient identification submitted with the upload form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientInfo {
    pub name: String,
    pub id: String,
    pub dob: String,
    pub admission_date: String,
    pub discharge_date: String,
}

const CONTAINER_STYLE: &str = "font-family: Arial, sans-serif; max-width: 800px; margin: 0 auto; padding: 20px; background-color: #f8f9fa; border: 1px solid #dee2e6; border-radius: 8px; box-shadow: 0 4px 6px rgba(0,0,0,0.1);";
const TITLE_STYLE: &str = "color: #0d47a1; text-align: center; font-size: 28px; margin-bottom: 20px; padding-bottom: 10px; border-bottom: 2px solid #0d47a1;";
const CARD_STYLE: &str = "background-color: white; padding: 15px; margin-bottom: 20px; border-radius: 6px; border: 1px solid #cfd8dc; box-shadow: 0 2px 4px rgba(0,0,0,0.05);";
const HEADING_STYLE: &str = "color: #0d47a1; font-size: 20px; margin-bottom: 15px; padding-bottom: 8px; border-bottom: 1px solid #bbdefb;";
const BODY_STYLE: &str = "white-space: pre-wrap; color: #333; line-height: 1.5;";
const FIELD_STYLE: &str = "margin: 5px 0; color: #333;";
const FOOTER_STYLE: &str = "margin-top: 30px; padding: 15px; background-color: #e3f2fd; border: 1px solid #bbdefb; border-radius: 6px; text-align: center; color: #0d47a1;";

pub const EXTRACTED_NOTICE: &str =
    "This discharge summary contains information extracted directly from the uploaded documents.";
pub const DISCLAIMER: &str = "For testing purposes only. Not for clinical use.";

pub const DIABETES_ADVISORY: &str = "Continue blood glucose monitoring as directed. Follow diabetic diet plan provided by nutritionist.";
pub const HYPERTENSION_ADVISORY: &str =
    "Monitor blood pressure daily. Maintain low-sodium diet as recommended.";

/// Escape the five HTML-significant characters.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the heuristic report: patient block, five sections, advisories
/// derived from the sections, and the extraction footer.
pub fn render_report(
    patient: &PatientInfo,
    sections: &ResolvedSections,
    generated_on: NaiveDate,
) -> String {
    let flags = ClinicalFlags::from_sections(sections);
    let mut html = open_container(patient);

    push_card(&mut html, "2. DIAGNOSIS", &sections.diagnosis, "");
    push_card(&mut html, "3. TREATMENT SUMMARY", &sections.treatment, "");
    push_card(&mut html, "4. MEDICATIONS", &sections.medications, &advisories(flags));
    push_card(&mut html, "5. FOLLOW-UP INSTRUCTIONS", &sections.follow_up, "");
    push_card(&mut html, "6. ADDITIONAL NOTES", &sections.additional_notes, "");

    close_container(&mut html, EXTRACTED_NOTICE, generated_on);
    html
}

/// Render text produced by the remote generation model inside the same shell.
pub fn render_generated_report(
    patient: &PatientInfo,
    generated_text: &str,
    model: &str,
    generated_on: NaiveDate,
) -> String {
    let mut html = open_container(patient);
    push_card(&mut html, "DISCHARGE DETAILS", generated_text.trim(), "");

    let notice = format!(
        "This discharge summary was generated by the {} model from the uploaded documents.",
        escape_html(model)
    );
    close_container(&mut html, &notice, generated_on);
    html
}

/// Wrap a report fragment into a standalone HTML document suitable for
/// download or printing.
pub fn standalone_document(title: &str, fragment: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <style>
    body {{ margin: 0; padding: 20px; background: #ffffff; }}
    @media print {{
      body {{ padding: 0; }}
      .discharge-summary {{ box-shadow: none !important; border: none !important; }}
    }}
  </style>
</head>
<body>
{fragment}
</body>
</html>
"#,
        title = escape_html(title),
    )
}

fn open_container(patient: &PatientInfo) -> String {
    let mut html = String::with_capacity(8 * 1024);
    let _ = writeln!(html, r#"<div class="discharge-summary" style="{CONTAINER_STYLE}">"#);
    let _ = writeln!(html, r#"  <h1 style="{TITLE_STYLE}">DISCHARGE SUMMARY</h1>"#);
    let _ = writeln!(html, r#"  <div style="{CARD_STYLE}">"#);
    let _ = writeln!(html, r#"    <h2 style="{HEADING_STYLE}">1. PATIENT INFORMATION</h2>"#);
    let _ = writeln!(
        html,
        r#"    <div style="display: grid; grid-template-columns: 1fr 1fr; gap: 10px;">"#
    );
    for (label, value) in [
        ("Name", &patient.name),
        ("Patient ID", &patient.id),
        ("Date of Birth", &patient.dob),
        ("Admission Date", &patient.admission_date),
        ("Discharge Date", &patient.discharge_date),
    ] {
        let _ = writeln!(
            html,
            r#"      <p style="{FIELD_STYLE}"><span style="font-weight: bold;">{label}:</span> {}</p>"#,
            escape_html(value)
        );
    }
    html.push_str("    </div>\n  </div>\n");
    html
}

fn push_card(html: &mut String, heading: &str, body: &str, extra: &str) {
    let _ = writeln!(html, r#"  <div style="{CARD_STYLE}">"#);
    let _ = writeln!(html, r#"    <h2 style="{HEADING_STYLE}">{heading}</h2>"#);
    let _ = writeln!(html, r#"    <div style="{BODY_STYLE}">{}</div>"#, escape_html(body));
    html.push_str(extra);
    html.push_str("  </div>\n");
}

fn advisories(flags: ClinicalFlags) -> String {
    let mut out = String::new();
    if flags.diabetes {
        out.push_str(&advisory_block(
            "#fff3e0",
            "#ff9800",
            "#e65100",
            "Diabetes Management:",
            DIABETES_ADVISORY,
        ));
    }
    if flags.hypertension {
        out.push_str(&advisory_block(
            "#e8f5e9",
            "#4caf50",
            "#2e7d32",
            "Hypertension Management:",
            HYPERTENSION_ADVISORY,
        ));
    }
    out
}

fn advisory_block(background: &str, border: &str, accent: &str, title: &str, text: &str) -> String {
    format!(
        r#"    <div class="advisory" style="margin-top: 15px; padding: 10px; background-color: {background}; border-left: 4px solid {border}; border-radius: 4px;">
      <p style="margin: 0; color: {accent}; font-weight: bold;">{title}</p>
      <p style="margin: 5px 0; color: #333;">{text}</p>
    </div>
"#
    )
}

fn close_container(html: &mut String, notice: &str, generated_on: NaiveDate) {
    let _ = writeln!(html, r#"  <div style="{FOOTER_STYLE}">"#);
    let _ = writeln!(html, r#"    <p style="margin: 5px 0;">{notice}</p>"#);
    let _ = writeln!(
        html,
        r#"    <p style="margin: 5px 0;">Generated on: {}</p>"#,
        generated_on.format("%Y-%m-%d")
    );
    let _ = writeln!(html, r#"    <p style="margin: 5px 0; font-size: 12px;">{DISCLAIMER}</p>"#);
    html.push_str("  </div>\n</div>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::sections::SectionSet;

    fn patient() -> PatientInfo {
        PatientInfo {
            name: "John Doe".into(),
            id: "12345678".into(),
            dob: "1975-05-12".into(),
            admission_date: "2023-11-15".into(),
            discharge_date: "2023-11-21".into(),
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 11, 21).unwrap()
    }

    fn sections_with_medications(medications: &str) -> ResolvedSections {
        let mut set = SectionSet::new();
        set.fill(crate::pipeline::sections::SectionKind::Medications, medications.into());
        set.resolve()
    }

    #[test]
    fn renders_patient_fields_and_numbered_sections() {
        let html = render_report(&patient(), &SectionSet::new().resolve(), date());

        assert!(html.contains("<span style=\"font-weight: bold;\">Name:</span> John Doe</p>"));
        assert!(html.contains("Patient ID:</span> 12345678</p>"));
        assert!(html.contains("Date of Birth:</span> 1975-05-12</p>"));
        assert!(html.contains("Admission Date:</span> 2023-11-15</p>"));
        assert!(html.contains("Discharge Date:</span> 2023-11-21</p>"));

        let order = [
            "1. PATIENT INFORMATION",
            "2. DIAGNOSIS",
            "3. TREATMENT SUMMARY",
            "4. MEDICATIONS",
            "5. FOLLOW-UP INSTRUCTIONS",
            "6. ADDITIONAL NOTES",
        ];
        let positions: Vec<usize> = order.iter().map(|h| html.find(h).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn renders_footer_and_disclaimer() {
        let html = render_report(&patient(), &SectionSet::new().resolve(), date());
        assert!(html.contains(EXTRACTED_NOTICE));
        assert!(html.contains("Generated on: 2023-11-21"));
        assert!(html.contains(DISCLAIMER));
    }

    #[test]
    fn placeholders_are_rendered() {
        let html = render_report(&patient(), &SectionSet::new().resolve(), date());
        assert!(html.contains("No diagnosis information found in documents."));
        assert!(html.contains("No additional notes found in documents."));
    }

    #[test]
    fn diabetes_advisory_is_purely_additive() {
        let with = render_report(&patient(), &sections_with_medications("metformin 500mg"), date());
        let without = render_report(&patient(), &sections_with_medications("xxxxxxxxx 500mg"), date());

        assert!(with.contains("Diabetes Management:"));
        assert!(with.contains(DIABETES_ADVISORY));
        assert!(!without.contains("Diabetes Management:"));

        let advisory = advisory_block(
            "#fff3e0",
            "#ff9800",
            "#e65100",
            "Diabetes Management:",
            DIABETES_ADVISORY,
        );
        let stripped = with.replacen(&advisory, "", 1).replacen("metformin", "xxxxxxxxx", 1);
        assert_eq!(stripped, without);
    }

    #[test]
    fn hypertension_advisory_from_medications() {
        let html = render_report(&patient(), &sections_with_medications("Lisinopril 10mg"), date());
        assert!(html.contains("Hypertension Management:"));
        assert!(!html.contains("Diabetes Management:"));
    }

    #[test]
    fn escapes_markup_in_values() {
        let mut p = patient();
        p.name = "<script>alert('x')</script>".into();
        let html = render_report(&p, &sections_with_medications("BP < 140 & stable"), date());

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(html.contains("BP &lt; 140 &amp; stable"));
    }

    #[test]
    fn generated_report_uses_same_shell() {
        let html = render_generated_report(
            &patient(),
            "  1. Patient Information ...\n2. Diagnosis: pneumonia  ",
            "google/flan-t5-xl",
            date(),
        );
        assert!(html.contains("1. PATIENT INFORMATION"));
        assert!(html.contains("1. Patient Information ...\n2. Diagnosis: pneumonia</div>"));
        assert!(html.contains("generated by the google/flan-t5-xl model"));
        assert!(html.contains(DISCLAIMER));
        assert!(!html.contains(EXTRACTED_NOTICE));
    }

    #[test]
    fn standalone_document_wraps_fragment() {
        let doc = standalone_document("Discharge Summary - A&B", "<div>body</div>");
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<title>Discharge Summary - A&amp;B</title>"));
        assert!(doc.contains("<div>body</div>"));
        assert!(doc.contains("@media print"));
    }
}
