//! Intake record schema.
//!
//! One [`IntakeRecord`] holds everything entered during a form session. Every section is an
//! owned value that always exists; a fresh record has empty strings, empty lists and
//! unset flags throughout. Free-text fields are stored as entered: age, vitals and the
//! like are opaque text and are never parsed or range-checked.
//!
//! The serialised form uses camelCase keys (`patientId`, `riskFactors`, `aiData`).

use crate::{IntakeError, IntakeResult};
use intake_types::{Confidence, NonEmptyText};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeRecord {
    pub demographics: Demographics,
    pub complaints: Complaints,
    pub history: History,
    pub examination: Examination,
    pub investigations: Investigations,
    pub feedback: Feedback,
    pub ai_data: AiData,
}

impl IntakeRecord {
    /// Builds an all-empty record carrying the given AI suggestion content.
    pub fn new(ai_data: AiData) -> Self {
        Self {
            ai_data,
            ..Self::default()
        }
    }

    pub fn to_json_pretty(&self) -> IntakeResult<String> {
        serde_json::to_string_pretty(self).map_err(IntakeError::Serialization)
    }

    pub fn to_yaml(&self) -> IntakeResult<String> {
        serde_yaml::to_string(self).map_err(IntakeError::YamlSerialization)
    }
}

// ============================================================================
// Demographics
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Demographics {
    pub name: String,
    pub patient_id: String,
    pub age: String,
    pub sex: Option<Sex>,
    pub occupation: String,
    pub risk_factors: RiskFactors,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    Other,
}

impl Sex {
    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
            Sex::Other => "other",
        }
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = IntakeError;

    fn from_str(s: &str) -> IntakeResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            "other" => Ok(Sex::Other),
            other => Err(IntakeError::InvalidInput(format!(
                "sex must be one of male, female, other (got {other:?})"
            ))),
        }
    }
}

/// Patient risk factors.
///
/// Patches replace this object as a whole, so every flag is required when it is
/// deserialised from a patch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RiskFactors {
    pub smoking: bool,
    pub alcohol: bool,
    pub family_history: bool,
    pub travel_occupational: bool,
}

// ============================================================================
// Complaints and history
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaints {
    /// Selected complaints in the order they were ticked.
    pub selected_complaints: Vec<String>,
    pub other_complaints: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct History {
    pub onset: String,
    pub duration: String,
    pub progression: String,
    pub associated_symptoms: Vec<String>,
}

// ============================================================================
// Examination
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Examination {
    pub vitals: Vitals,
    pub general_examination: Vec<String>,
    /// Free-text system examination findings, one entry per finding.
    pub system_examination: Vec<String>,
}

/// Vital signs as entered. Replaced as a whole by patches.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Vitals {
    pub bp: String,
    pub hr: String,
    pub rr: String,
    pub temp: String,
    pub spo2: String,
    pub bmi: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VitalSign {
    Bp,
    Hr,
    Rr,
    Temp,
    Spo2,
    Bmi,
}

impl VitalSign {
    pub const ALL: [VitalSign; 6] = [
        VitalSign::Bp,
        VitalSign::Hr,
        VitalSign::Rr,
        VitalSign::Temp,
        VitalSign::Spo2,
        VitalSign::Bmi,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VitalSign::Bp => "bp",
            VitalSign::Hr => "hr",
            VitalSign::Rr => "rr",
            VitalSign::Temp => "temp",
            VitalSign::Spo2 => "spo2",
            VitalSign::Bmi => "bmi",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VitalSign::Bp => "Blood Pressure (mmHg)",
            VitalSign::Hr => "Heart Rate (bpm)",
            VitalSign::Rr => "Respiratory Rate (per min)",
            VitalSign::Temp => "Temperature (°C)",
            VitalSign::Spo2 => "SpO2 (%)",
            VitalSign::Bmi => "BMI (kg/m2)",
        }
    }
}

impl Vitals {
    pub fn get(&self, sign: VitalSign) -> &str {
        match sign {
            VitalSign::Bp => &self.bp,
            VitalSign::Hr => &self.hr,
            VitalSign::Rr => &self.rr,
            VitalSign::Temp => &self.temp,
            VitalSign::Spo2 => &self.spo2,
            VitalSign::Bmi => &self.bmi,
        }
    }

    pub fn set(&mut self, sign: VitalSign, value: String) {
        let slot = match sign {
            VitalSign::Bp => &mut self.bp,
            VitalSign::Hr => &mut self.hr,
            VitalSign::Rr => &mut self.rr,
            VitalSign::Temp => &mut self.temp,
            VitalSign::Spo2 => &mut self.spo2,
            VitalSign::Bmi => &mut self.bmi,
        };
        *slot = value;
    }
}

// ============================================================================
// Investigations, feedback and AI data
// ============================================================================

/// Investigations ticked by the clinician.
///
/// `available` and `suggested` are independent lists; a test may appear in both.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investigations {
    pub available: Vec<String>,
    pub suggested: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    /// `None` until the clinician rates the suggestions.
    pub ai_accuracy: Option<bool>,
    pub ai_usefulness: Option<bool>,
    pub comments: String,
    pub suggestions: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiData {
    pub probable_systems: Vec<String>,
    pub suggested_tests: Vec<String>,
    pub suspected_diagnoses: Vec<SuspectedDiagnosis>,
    pub treatment_guidelines: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuspectedDiagnosis {
    pub diagnosis: NonEmptyText,
    pub confidence: Confidence,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_record_is_empty() {
        let record = IntakeRecord::new(AiData::default());
        assert_eq!(record.demographics.name, "");
        assert_eq!(record.demographics.sex, None);
        assert_eq!(record.demographics.risk_factors, RiskFactors::default());
        assert!(record.complaints.selected_complaints.is_empty());
        assert_eq!(record.examination.vitals, Vitals::default());
        assert_eq!(record.feedback.ai_accuracy, None);
    }

    #[test]
    fn serialises_with_camel_case_keys() {
        let mut record = IntakeRecord::default();
        record.demographics.patient_id = "P-001".into();
        record.demographics.risk_factors.family_history = true;
        record.demographics.sex = Some(Sex::Female);

        let json = record.to_json_pretty().expect("render json");
        assert!(json.contains("\"patientId\": \"P-001\""));
        assert!(json.contains("\"familyHistory\": true"));
        assert!(json.contains("\"sex\": \"female\""));
        assert!(json.contains("\"aiData\""));
        assert!(json.contains("\"selectedComplaints\""));
    }

    #[test]
    fn yaml_rendering_parses_back() {
        let mut record = IntakeRecord::default();
        record.examination.vitals.bp = "120/80".into();
        record.history.associated_symptoms = vec!["Night sweats".into()];

        let yaml = record.to_yaml().expect("render yaml");
        let parsed: IntakeRecord = serde_yaml::from_str(&yaml).expect("parse yaml");
        assert_eq!(parsed, record);
    }

    #[test]
    fn vitals_get_and_set_address_single_sign() {
        let mut vitals = Vitals::default();
        vitals.set(VitalSign::Spo2, "97".into());
        assert_eq!(vitals.get(VitalSign::Spo2), "97");
        for sign in VitalSign::ALL.into_iter().filter(|s| *s != VitalSign::Spo2) {
            assert_eq!(vitals.get(sign), "");
        }
    }

    #[test]
    fn sex_parses_case_insensitively() {
        assert_eq!("Female".parse::<Sex>().expect("valid"), Sex::Female);
        let err = "unknown".parse::<Sex>().expect_err("invalid");
        assert!(matches!(err, IntakeError::InvalidInput(_)));
    }
}
