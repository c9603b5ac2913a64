//! Single-field bindings for form inputs.
//!
//! Text inputs, selects and yes/no buttons each edit one field. These bindings turn a
//! single-field edit into a [`SectionPatch`], spreading nested objects (vitals, risk
//! factors) from the current record so sibling values survive the one-level merge.

use crate::patch::{
    AiDataPatch, ComplaintsPatch, DemographicsPatch, ExaminationPatch, FeedbackPatch,
    HistoryPatch,
};
use crate::record::{RiskFactors, Sex, VitalSign};
use crate::{IntakeError, IntakeRecord, IntakeResult, SectionKey, SectionPatch};
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

/// A free-text or single-choice field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextField {
    Name,
    PatientId,
    Age,
    Sex,
    Occupation,
    OtherComplaints,
    Onset,
    Duration,
    Progression,
    Vital(VitalSign),
    Comments,
    Suggestions,
    TreatmentGuidelines,
}

impl TextField {
    pub const ALL: [TextField; 18] = [
        TextField::Name,
        TextField::PatientId,
        TextField::Age,
        TextField::Sex,
        TextField::Occupation,
        TextField::OtherComplaints,
        TextField::Onset,
        TextField::Duration,
        TextField::Progression,
        TextField::Vital(VitalSign::Bp),
        TextField::Vital(VitalSign::Hr),
        TextField::Vital(VitalSign::Rr),
        TextField::Vital(VitalSign::Temp),
        TextField::Vital(VitalSign::Spo2),
        TextField::Vital(VitalSign::Bmi),
        TextField::Comments,
        TextField::Suggestions,
        TextField::TreatmentGuidelines,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TextField::Name => "demographics.name",
            TextField::PatientId => "demographics.patientId",
            TextField::Age => "demographics.age",
            TextField::Sex => "demographics.sex",
            TextField::Occupation => "demographics.occupation",
            TextField::OtherComplaints => "complaints.otherComplaints",
            TextField::Onset => "history.onset",
            TextField::Duration => "history.duration",
            TextField::Progression => "history.progression",
            TextField::Vital(VitalSign::Bp) => "examination.vitals.bp",
            TextField::Vital(VitalSign::Hr) => "examination.vitals.hr",
            TextField::Vital(VitalSign::Rr) => "examination.vitals.rr",
            TextField::Vital(VitalSign::Temp) => "examination.vitals.temp",
            TextField::Vital(VitalSign::Spo2) => "examination.vitals.spo2",
            TextField::Vital(VitalSign::Bmi) => "examination.vitals.bmi",
            TextField::Comments => "feedback.comments",
            TextField::Suggestions => "feedback.suggestions",
            TextField::TreatmentGuidelines => "aiData.treatmentGuidelines",
        }
    }

    pub fn section(self) -> SectionKey {
        match self {
            TextField::Name
            | TextField::PatientId
            | TextField::Age
            | TextField::Sex
            | TextField::Occupation => SectionKey::Demographics,
            TextField::OtherComplaints => SectionKey::Complaints,
            TextField::Onset | TextField::Duration | TextField::Progression => {
                SectionKey::History
            }
            TextField::Vital(_) => SectionKey::Examination,
            TextField::Comments | TextField::Suggestions => SectionKey::Feedback,
            TextField::TreatmentGuidelines => SectionKey::AiSuggestions,
        }
    }

    /// Builds the patch that sets this field to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::InvalidInput`] if `value` is not a recognised sex. An empty
    /// value clears the sex.
    pub fn patch(self, record: &IntakeRecord, value: String) -> IntakeResult<SectionPatch> {
        let patch = match self {
            TextField::Name => DemographicsPatch {
                name: Some(value),
                ..DemographicsPatch::default()
            }
            .into(),
            TextField::PatientId => DemographicsPatch {
                patient_id: Some(value),
                ..DemographicsPatch::default()
            }
            .into(),
            TextField::Age => DemographicsPatch {
                age: Some(value),
                ..DemographicsPatch::default()
            }
            .into(),
            TextField::Sex => {
                let sex = if value.trim().is_empty() {
                    None
                } else {
                    Some(value.parse::<Sex>()?)
                };
                DemographicsPatch {
                    sex: Some(sex),
                    ..DemographicsPatch::default()
                }
                .into()
            }
            TextField::Occupation => DemographicsPatch {
                occupation: Some(value),
                ..DemographicsPatch::default()
            }
            .into(),
            TextField::OtherComplaints => ComplaintsPatch {
                other_complaints: Some(value),
                ..ComplaintsPatch::default()
            }
            .into(),
            TextField::Onset => HistoryPatch {
                onset: Some(value),
                ..HistoryPatch::default()
            }
            .into(),
            TextField::Duration => HistoryPatch {
                duration: Some(value),
                ..HistoryPatch::default()
            }
            .into(),
            TextField::Progression => HistoryPatch {
                progression: Some(value),
                ..HistoryPatch::default()
            }
            .into(),
            TextField::Vital(sign) => {
                let mut vitals = record.examination.vitals.clone();
                vitals.set(sign, value);
                ExaminationPatch {
                    vitals: Some(vitals),
                    ..ExaminationPatch::default()
                }
                .into()
            }
            TextField::Comments => FeedbackPatch {
                comments: Some(value),
                ..FeedbackPatch::default()
            }
            .into(),
            TextField::Suggestions => FeedbackPatch {
                suggestions: Some(value),
                ..FeedbackPatch::default()
            }
            .into(),
            TextField::TreatmentGuidelines => AiDataPatch {
                treatment_guidelines: Some(value),
                ..AiDataPatch::default()
            }
            .into(),
        };
        Ok(patch)
    }
}

/// A yes/no field: a risk factor or a feedback rating.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlagField {
    Smoking,
    Alcohol,
    FamilyHistory,
    TravelOccupational,
    AiAccuracy,
    AiUsefulness,
}

impl FlagField {
    pub const ALL: [FlagField; 6] = [
        FlagField::Smoking,
        FlagField::Alcohol,
        FlagField::FamilyHistory,
        FlagField::TravelOccupational,
        FlagField::AiAccuracy,
        FlagField::AiUsefulness,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FlagField::Smoking => "demographics.riskFactors.smoking",
            FlagField::Alcohol => "demographics.riskFactors.alcohol",
            FlagField::FamilyHistory => "demographics.riskFactors.familyHistory",
            FlagField::TravelOccupational => "demographics.riskFactors.travelOccupational",
            FlagField::AiAccuracy => "feedback.aiAccuracy",
            FlagField::AiUsefulness => "feedback.aiUsefulness",
        }
    }

    pub fn section(self) -> SectionKey {
        match self {
            FlagField::AiAccuracy | FlagField::AiUsefulness => SectionKey::Feedback,
            _ => SectionKey::Demographics,
        }
    }

    /// Builds the patch that sets this flag.
    ///
    /// Feedback ratings keep `None` as "not rated"; risk factors treat `None` as `false`.
    pub fn patch(self, record: &IntakeRecord, value: Option<bool>) -> SectionPatch {
        let risk = |update: fn(&mut RiskFactors, bool)| {
            let mut risk_factors = record.demographics.risk_factors;
            update(&mut risk_factors, value.unwrap_or(false));
            SectionPatch::from(DemographicsPatch {
                risk_factors: Some(risk_factors),
                ..DemographicsPatch::default()
            })
        };

        match self {
            FlagField::Smoking => risk(|r, v| r.smoking = v),
            FlagField::Alcohol => risk(|r, v| r.alcohol = v),
            FlagField::FamilyHistory => risk(|r, v| r.family_history = v),
            FlagField::TravelOccupational => risk(|r, v| r.travel_occupational = v),
            FlagField::AiAccuracy => FeedbackPatch {
                ai_accuracy: Some(value),
                ..FeedbackPatch::default()
            }
            .into(),
            FlagField::AiUsefulness => FeedbackPatch {
                ai_usefulness: Some(value),
                ..FeedbackPatch::default()
            }
            .into(),
        }
    }
}

macro_rules! impl_field_path {
    ($($field:ident => $kind:literal),* $(,)?) => {
        $(
            impl std::fmt::Display for $field {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl FromStr for $field {
                type Err = IntakeError;

                fn from_str(s: &str) -> IntakeResult<Self> {
                    let path = s.trim();
                    $field::ALL
                        .into_iter()
                        .find(|field| field.as_str() == path)
                        .ok_or_else(|| {
                            IntakeError::InvalidInput(format!(concat!("unknown ", $kind, ": {}"), path))
                        })
                }
            }

            impl<'de> Deserialize<'de> for $field {
                fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
                where
                    D: Deserializer<'de>,
                {
                    let s = String::deserialize(deserializer)?;
                    s.parse().map_err(serde::de::Error::custom)
                }
            }
        )*
    };
}

impl_field_path! {
    TextField => "text field",
    FlagField => "flag field",
}
