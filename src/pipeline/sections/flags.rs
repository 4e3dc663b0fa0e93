use serde::Serialize;

use super::ResolvedSections;

const DIABETES_DIAGNOSIS_TERMS: &[&str] = &["diabetes"];
const DIABETES_MEDICATION_TERMS: &[&str] = &["diabetes", "insulin", "metformin"];
const HYPERTENSION_DIAGNOSIS_TERMS: &[&str] = &["hypertension", "high blood pressure"];
const HYPERTENSION_MEDICATION_TERMS: &[&str] = &["lisinopril", "amlodipine"];

/// Conditions inferred from keyword presence. Only ever add advisory
/// content to a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClinicalFlags {
    pub diabetes: bool,
    pub hypertension: bool,
}

impl ClinicalFlags {
    pub fn detect(diagnosis: &str, medications: &str) -> Self {
        let diagnosis = diagnosis.to_lowercase();
        let medications = medications.to_lowercase();

        Self {
            diabetes: contains_any(&diagnosis, DIABETES_DIAGNOSIS_TERMS)
                || contains_any(&medications, DIABETES_MEDICATION_TERMS),
            hypertension: contains_any(&diagnosis, HYPERTENSION_DIAGNOSIS_TERMS)
                || contains_any(&medications, HYPERTENSION_MEDICATION_TERMS),
        }
    }

    pub fn from_sections(sections: &ResolvedSections) -> Self {
        Self::detect(&sections.diagnosis, &sections.medications)
    }
}

fn contains_any(haystack: &str, terms: &[&str]) -> bool {
    terms.iter().any(|t| haystack.contains(t))
}
