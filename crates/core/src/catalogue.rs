//! Option catalogues offered by each section.
//!
//! These lists are what the form presents as checkboxes and choices. They are display
//! aids only: the store accepts values that are not listed here.

use crate::{TextField, ToggleField};

pub const COMMON_COMPLAINTS: &[&str] = &[
    "Fever",
    "Cough",
    "Shortness of breath",
    "Chest pain",
    "Headache",
    "Nausea/Vomiting",
    "Abdominal pain",
    "Diarrhea",
    "Fatigue",
    "Dizziness",
    "Joint pain",
    "Muscle aches",
    "Sore throat",
    "Runny nose",
    "Loss of appetite",
    "Weight loss",
    "Sleep disturbances",
    "Anxiety",
    "Depression",
    "Memory problems",
];

pub const ONSET_OPTIONS: &[&str] = &[
    "Sudden (minutes)",
    "Acute (hours to days)",
    "Subacute (days to weeks)",
    "Chronic (weeks to months)",
    "Insidious (gradual onset)",
];

pub const DURATION_OPTIONS: &[&str] = &[
    "Less than 1 hour",
    "1-6 hours",
    "6-24 hours",
    "1-3 days",
    "3-7 days",
    "1-4 weeks",
    "1-6 months",
    "More than 6 months",
];

pub const PROGRESSION_OPTIONS: &[&str] = &[
    "Improving",
    "Stable/Static",
    "Worsening",
    "Fluctuating",
    "Progressive",
    "Episodic",
];

pub const SEX_OPTIONS: &[&str] = &["male", "female", "other"];

pub const ASSOCIATED_SYMPTOMS: &[&str] = &[
    "Fever/Chills",
    "Night sweats",
    "Weight loss",
    "Weight gain",
    "Loss of appetite",
    "Nausea/Vomiting",
    "Diarrhea",
    "Constipation",
    "Urinary symptoms",
    "Sleep disturbances",
    "Mood changes",
    "Cognitive changes",
    "Skin changes",
    "Visual changes",
    "Hearing changes",
    "Swelling",
    "Palpitations",
    "Syncope/Fainting",
];

pub const GENERAL_EXAMINATION_FINDINGS: &[&str] = &[
    "Pallor",
    "Icterus",
    "Cyanosis",
    "Edema",
    "Lymphadenopathy",
];

pub const SYSTEM_EXAMINATION_FINDINGS: &[&str] = &[
    "Respiratory: Normal",
    "Respiratory: Wheeze",
    "Respiratory: Crepitations",
    "Respiratory: Reduced air entry",
    "Cardiovascular: Normal",
    "Cardiovascular: Murmur",
    "Cardiovascular: Gallop",
    "Cardiovascular: Pedal edema",
    "Cardiovascular: Raised JVP",
    "Abdomen: Soft",
    "Abdomen: Tender",
    "Abdomen: Hepatomegaly",
    "Abdomen: Splenomegaly",
    "Abdomen: Ascites",
    "Neurological: Focal deficit",
    "Neurological: Seizure activity",
    "Musculoskeletal: Joint swelling",
    "Musculoskeletal: Tenderness",
    "Musculoskeletal: Deformity",
    "GU/OBG: Discharge",
    "GU/OBG: Pregnancy signs",
];

pub const AVAILABLE_INVESTIGATIONS: &[&str] = &[
    // Laboratory
    "Complete Blood Count (CBC)",
    "Basic Metabolic Panel (BMP)",
    "Comprehensive Metabolic Panel (CMP)",
    "Liver Function Tests (LFTs)",
    "Lipid Panel",
    "Thyroid Function Tests",
    "HbA1c",
    "Fasting Glucose",
    "Urinalysis",
    "ESR/CRP",
    "Procalcitonin",
    "Troponin",
    "BNP/NT-proBNP",
    "D-Dimer",
    "PT/INR, PTT",
    // Imaging
    "Chest X-ray",
    "Abdominal X-ray",
    "CT Head",
    "CT Chest",
    "CT Abdomen/Pelvis",
    "MRI Brain",
    "MRI Spine",
    "Ultrasound Abdomen",
    "Echocardiogram",
    "ECG",
    // Specialised
    "Arterial Blood Gas (ABG)",
    "Pulmonary Function Tests",
    "Stress Test",
    "Colonoscopy",
    "Endoscopy",
    "Biopsy",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        })
    }
}

/// An investigation offered for the clinician to order, with its rationale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SuggestedInvestigation {
    pub test: &'static str,
    pub reason: &'static str,
    pub priority: Priority,
}

pub const SUGGESTED_INVESTIGATIONS: [SuggestedInvestigation; 5] = [
    SuggestedInvestigation {
        test: "Complete Blood Count (CBC)",
        reason: "To evaluate for infection, anemia, or hematologic disorders",
        priority: Priority::High,
    },
    SuggestedInvestigation {
        test: "Basic Metabolic Panel (BMP)",
        reason: "To assess electrolyte balance and kidney function",
        priority: Priority::High,
    },
    SuggestedInvestigation {
        test: "Chest X-ray",
        reason: "To evaluate respiratory symptoms and rule out pneumonia",
        priority: Priority::Medium,
    },
    SuggestedInvestigation {
        test: "ECG",
        reason: "To assess cardiac rhythm and rule out ischemia",
        priority: Priority::Medium,
    },
    SuggestedInvestigation {
        test: "Urinalysis",
        reason: "To screen for urinary tract infection or kidney disease",
        priority: Priority::Low,
    },
];

const SUGGESTED_INVESTIGATION_TESTS: [&str; SUGGESTED_INVESTIGATIONS.len()] =
    suggested_test_names(&SUGGESTED_INVESTIGATIONS);

const fn suggested_test_names<const N: usize>(
    suggestions: &[SuggestedInvestigation; N],
) -> [&'static str; N] {
    let mut names = [""; N];
    let mut i = 0;
    while i < N {
        names[i] = suggestions[i].test;
        i += 1;
    }
    names
}

/// The rationale for a suggested investigation, if `test` is one.
pub fn suggestion(test: &str) -> Option<&'static SuggestedInvestigation> {
    let table: &'static [SuggestedInvestigation] = &SUGGESTED_INVESTIGATIONS;
    table.iter().find(|s| s.test == test)
}

/// Display text for one option of a list field.
///
/// Suggested investigations carry their priority and reason; other options are shown as is.
pub fn describe(field: ToggleField, option: &str) -> String {
    match (field, suggestion(option)) {
        (ToggleField::SuggestedInvestigations, Some(suggested)) => suggested.to_string(),
        _ => option.to_string(),
    }
}

impl std::fmt::Display for SuggestedInvestigation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] - {}", self.test, self.priority, self.reason)
    }
}

/// Checkbox options for a list field.
pub fn options(field: ToggleField) -> &'static [&'static str] {
    match field {
        ToggleField::SelectedComplaints => COMMON_COMPLAINTS,
        ToggleField::AssociatedSymptoms => ASSOCIATED_SYMPTOMS,
        ToggleField::GeneralExamination => GENERAL_EXAMINATION_FINDINGS,
        ToggleField::SystemExamination => SYSTEM_EXAMINATION_FINDINGS,
        ToggleField::AvailableInvestigations => AVAILABLE_INVESTIGATIONS,
        ToggleField::SuggestedInvestigations => &SUGGESTED_INVESTIGATION_TESTS,
    }
}

/// Fixed choices for a single-choice field, or `None` for free text.
pub fn choices(field: TextField) -> Option<&'static [&'static str]> {
    match field {
        TextField::Sex => Some(SEX_OPTIONS),
        TextField::Onset => Some(ONSET_OPTIONS),
        TextField::Duration => Some(DURATION_OPTIONS),
        TextField::Progression => Some(PROGRESSION_OPTIONS),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggested_tests_match_rationale_table() {
        let tests: Vec<&str> = SUGGESTED_INVESTIGATIONS.iter().map(|s| s.test).collect();
        assert_eq!(tests, options(ToggleField::SuggestedInvestigations));
    }

    #[test]
    fn suggestions_render_with_priority_and_reason() {
        let ecg = suggestion("ECG").expect("ECG is suggested");
        assert_eq!(ecg.priority, Priority::Medium);
        assert_eq!(
            ecg.to_string(),
            "ECG [Medium] - To assess cardiac rhythm and rule out ischemia"
        );
        assert!(suggestion("MRI Brain").is_none());
    }

    #[test]
    fn describe_adds_rationale_only_to_suggested_list() {
        assert_eq!(
            describe(ToggleField::SuggestedInvestigations, "Urinalysis"),
            "Urinalysis [Low] - To screen for urinary tract infection or kidney disease"
        );
        assert_eq!(
            describe(ToggleField::AvailableInvestigations, "Urinalysis"),
            "Urinalysis"
        );
    }

    #[test]
    fn system_findings_cover_gu_obg() {
        let findings = options(ToggleField::SystemExamination);
        assert!(findings.contains(&"GU/OBG: Discharge"));
        assert!(findings.contains(&"GU/OBG: Pregnancy signs"));
    }

    #[test]
    fn every_list_field_has_options() {
        for field in ToggleField::ALL {
            assert!(!options(field).is_empty(), "{field} has no options");
        }
    }

    #[test]
    fn only_choice_fields_have_choices() {
        assert_eq!(choices(TextField::Onset), Some(ONSET_OPTIONS));
        assert_eq!(choices(TextField::Name), None);
    }
}
