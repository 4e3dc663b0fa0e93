use crate::pipeline::report::PatientInfo;

/// Prompt for the final rewrite of the concatenated window summaries.
pub fn build_final_prompt(patient: &PatientInfo, combined_summary: &str) -> String {
    format!(
        "Create a comprehensive discharge summary for a patient with the following information:

Patient Name: {name}
Patient ID: {id}
Date of Birth: {dob}
Admission Date: {admission}
Discharge Date: {discharge}

Based on the following medical information:
{combined_summary}

Format the discharge summary with the following sections:
1. Patient Information
2. Diagnosis
3. Treatment Summary
4. Medications
5. Follow-up Instructions
6. Additional Notes
",
        name = patient.name,
        id = patient.id,
        dob = patient.dob,
        admission = patient.admission_date,
        discharge = patient.discharge_date,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_patient_fields_and_summary() {
        let patient = PatientInfo {
            name: "Jane Roe".into(),
            id: "A-77".into(),
            dob: "1980-01-02".into(),
            admission_date: "2024-03-01".into(),
            discharge_date: "2024-03-05".into(),
        };
        let prompt = build_final_prompt(&patient, "Treated for cellulitis.");

        assert!(prompt.contains("Patient Name: Jane Roe\n"));
        assert!(prompt.contains("Patient ID: A-77\n"));
        assert!(prompt.contains("Date of Birth: 1980-01-02\n"));
        assert!(prompt.contains("Admission Date: 2024-03-01\n"));
        assert!(prompt.contains("Discharge Date: 2024-03-05\n"));
        assert!(prompt.contains("Based on the following medical information:\nTreated for cellulitis.\n"));
        assert!(prompt.contains("5. Follow-up Instructions\n6. Additional Notes"));
    }
}
