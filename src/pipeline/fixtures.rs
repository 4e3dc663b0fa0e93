//! Golden inputs for end-to-end tests: a pneumonia admission split across
//! three text files, and the canned section table for known phrases.

use super::extraction::UploadedFile;
use super::report::PatientInfo;
use super::sections::{SectionKind, SectionOverride};

pub const DIAGNOSIS_BLOCK: &str = "DIAGNOSIS:\nCommunity-acquired pneumonia (right lower lobe), bacterial etiology (Streptococcus pneumoniae)";

pub const TREATMENT_BLOCK: &str = "TREATMENT:\n- Admitted for IV antibiotics and supportive care\n- Started on IV Ceftriaxone 1g every 24 hours\n- Supplemental oxygen via nasal cannula at 2L/min\n- Acetaminophen for fever and pain\n- IV fluids for hydration";

pub const MEDICATIONS_BLOCK: &str = "MEDICATIONS AT DISCHARGE:\n1. Amoxicillin-Clavulanate 875mg/125mg, 1 tablet twice daily for 7 days\n2. Acetaminophen 650mg every 6 hours as needed for pain\n3. Dextromethorphan-Guaifenesin syrup 10mL every 4 hours as needed for cough";

pub const FOLLOW_UP_BLOCK: &str = "FOLLOW-UP RECOMMENDATIONS:\n- Follow-up appointment with primary care physician in 1 week\n- Repeat chest X-ray in 4-6 weeks to ensure resolution\n- Rest and gradually increase activity as tolerated\n- Maintain good hydration\n- Return to work/school after completing 7 days of antibiotics if symptoms continue to improve";

pub const NOTES_BLOCK: &str = "PREVENTIVE MEASURES:\n- Recommended pneumococcal vaccination at follow-up visit\n- Annual influenza vaccination\n- Smoking cessation counseling provided";

/// Free-text note with no headings or section keywords.
pub const UNSTRUCTURED_NOTE: &str =
    "Seen on the ward for community-acquired pneumonia.\nSmoking cessation discussed with the patient.";

pub fn canned_block(kind: SectionKind) -> &'static str {
    match kind {
        SectionKind::Diagnosis => DIAGNOSIS_BLOCK,
        SectionKind::Treatment => TREATMENT_BLOCK,
        SectionKind::Medications => MEDICATIONS_BLOCK,
        SectionKind::FollowUp => FOLLOW_UP_BLOCK,
        SectionKind::AdditionalNotes => NOTES_BLOCK,
    }
}

pub fn golden_patient() -> PatientInfo {
    PatientInfo {
        name: "John Doe".into(),
        id: "12345678".into(),
        dob: "1975-05-12".into(),
        admission_date: "2023-11-15".into(),
        discharge_date: "2023-11-21".into(),
    }
}

/// Admission note, pharmacy sheet, discharge instructions.
pub fn golden_documents() -> Vec<String> {
    vec![
        format!("{DIAGNOSIS_BLOCK}\n{TREATMENT_BLOCK}"),
        MEDICATIONS_BLOCK.to_string(),
        format!("{FOLLOW_UP_BLOCK}\n{NOTES_BLOCK}"),
    ]
}

pub fn golden_files() -> Vec<UploadedFile> {
    let names = ["admission_note.txt", "pharmacy.txt", "discharge_instructions.txt"];
    names
        .into_iter()
        .zip(golden_documents())
        .map(|(name, text)| UploadedFile::new(name, text))
        .collect()
}

pub fn fixture_overrides() -> Vec<SectionOverride> {
    vec![
        SectionOverride::new("community-acquired pneumonia", SectionKind::Diagnosis, DIAGNOSIS_BLOCK),
        SectionOverride::new("admitted for iv antibiotics", SectionKind::Treatment, TREATMENT_BLOCK),
        SectionOverride::new("amoxicillin-clavulanate", SectionKind::Medications, MEDICATIONS_BLOCK),
        SectionOverride::new("follow-up appointment", SectionKind::FollowUp, FOLLOW_UP_BLOCK),
        SectionOverride::new("smoking cessation", SectionKind::AdditionalNotes, NOTES_BLOCK),
    ]
}
