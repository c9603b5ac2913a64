//! AI suggestion content for the intake record.
//!
//! Suggestions come from a [`SuggestionService`] that the store consults once, when a
//! session starts. The bundled [`StaticSuggestions`] returns fixed mock content and
//! performs no inference.

use crate::record::{AiData, IntakeRecord, SuspectedDiagnosis};
use crate::IntakeResult;
use intake_types::{Confidence, NonEmptyText};

pub trait SuggestionService {
    fn suggest(&self, record: &IntakeRecord) -> IntakeResult<AiData>;
}

/// Fixed mock suggestions, independent of the record.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticSuggestions;

const PROBABLE_SYSTEMS: &[&str] = &["Respiratory System", "Cardiovascular System"];

const SUGGESTED_TESTS: &[&str] = &["Chest X-ray", "ECG", "Complete Blood Count"];

const SUSPECTED_DIAGNOSES: &[(&str, u8)] = &[
    ("Pneumonia", 85),
    ("Bronchitis", 70),
    ("COPD Exacerbation", 60),
];

const TREATMENT_GUIDELINES: &str = "Consider antibiotic therapy based on clinical presentation \
and severity. Monitor oxygen saturation and provide supportive care.";

impl SuggestionService for StaticSuggestions {
    fn suggest(&self, _record: &IntakeRecord) -> IntakeResult<AiData> {
        let suspected_diagnoses = SUSPECTED_DIAGNOSES
            .iter()
            .map(|(diagnosis, confidence)| {
                Ok(SuspectedDiagnosis {
                    diagnosis: NonEmptyText::new(diagnosis)?,
                    confidence: Confidence::new(*confidence)?,
                })
            })
            .collect::<IntakeResult<Vec<_>>>()?;

        Ok(AiData {
            probable_systems: PROBABLE_SYSTEMS.iter().map(|s| s.to_string()).collect(),
            suggested_tests: SUGGESTED_TESTS.iter().map(|s| s.to_string()).collect(),
            suspected_diagnoses,
            treatment_guidelines: TREATMENT_GUIDELINES.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_suggestions_are_fixed() {
        let data = StaticSuggestions
            .suggest(&IntakeRecord::default())
            .expect("static suggestions");

        assert_eq!(
            data.probable_systems,
            vec!["Respiratory System", "Cardiovascular System"]
        );
        assert_eq!(data.suggested_tests.len(), 3);
        let top = &data.suspected_diagnoses[0];
        assert_eq!(top.diagnosis.as_str(), "Pneumonia");
        assert_eq!(top.confidence.value(), 85);
        assert!(data.treatment_guidelines.starts_with("Consider antibiotic therapy"));
    }

    #[test]
    fn content_ignores_the_record() {
        let mut record = IntakeRecord::default();
        record.complaints.selected_complaints = vec!["Headache".into()];

        let blank = StaticSuggestions
            .suggest(&IntakeRecord::default())
            .expect("blank");
        let filled = StaticSuggestions.suggest(&record).expect("filled");
        assert_eq!(blank, filled);
    }
}
