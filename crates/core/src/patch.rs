//! Typed partial updates, one per record section.
//!
//! A patch names only the fields it changes. Applying it replaces each supplied field and
//! leaves every other field of the section, and every other section, untouched.
//!
//! The merge is exactly one level deep. Nested objects (`riskFactors`, `vitals`) are
//! supplied whole: a patch carrying `vitals` replaces all six vital signs, so callers that
//! change one sign start from the current `Vitals` and change that field before patching.
//! [`crate::field::TextField`] and [`crate::field::FlagField`] do that spreading for
//! single-field edits.
//!
//! Patches deserialize strictly: unknown keys are rejected, and nested objects must be
//! complete.

use crate::record::{
    AiData, Complaints, Demographics, Examination, Feedback, History, Investigations,
    RiskFactors, Sex, SuspectedDiagnosis, Vitals,
};
use crate::SectionKey;
use serde::{Deserialize, Deserializer};

/// Replace `target` when the patch supplies a value.
fn merge<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

/// Distinguishes an explicit `null` (clear the value) from an absent key.
fn explicit_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DemographicsPatch {
    pub name: Option<String>,
    pub patient_id: Option<String>,
    pub age: Option<String>,
    #[serde(default, deserialize_with = "explicit_option")]
    pub sex: Option<Option<Sex>>,
    pub occupation: Option<String>,
    pub risk_factors: Option<RiskFactors>,
}

impl DemographicsPatch {
    pub fn apply(self, target: &mut Demographics) {
        merge(&mut target.name, self.name);
        merge(&mut target.patient_id, self.patient_id);
        merge(&mut target.age, self.age);
        merge(&mut target.sex, self.sex);
        merge(&mut target.occupation, self.occupation);
        merge(&mut target.risk_factors, self.risk_factors);
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ComplaintsPatch {
    pub selected_complaints: Option<Vec<String>>,
    pub other_complaints: Option<String>,
}

impl ComplaintsPatch {
    pub fn apply(self, target: &mut Complaints) {
        merge(&mut target.selected_complaints, self.selected_complaints);
        merge(&mut target.other_complaints, self.other_complaints);
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HistoryPatch {
    pub onset: Option<String>,
    pub duration: Option<String>,
    pub progression: Option<String>,
    pub associated_symptoms: Option<Vec<String>>,
}

impl HistoryPatch {
    pub fn apply(self, target: &mut History) {
        merge(&mut target.onset, self.onset);
        merge(&mut target.duration, self.duration);
        merge(&mut target.progression, self.progression);
        merge(&mut target.associated_symptoms, self.associated_symptoms);
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExaminationPatch {
    pub vitals: Option<Vitals>,
    pub general_examination: Option<Vec<String>>,
    pub system_examination: Option<Vec<String>>,
}

impl ExaminationPatch {
    pub fn apply(self, target: &mut Examination) {
        merge(&mut target.vitals, self.vitals);
        merge(&mut target.general_examination, self.general_examination);
        merge(&mut target.system_examination, self.system_examination);
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InvestigationsPatch {
    pub available: Option<Vec<String>>,
    pub suggested: Option<Vec<String>>,
}

impl InvestigationsPatch {
    pub fn apply(self, target: &mut Investigations) {
        merge(&mut target.available, self.available);
        merge(&mut target.suggested, self.suggested);
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FeedbackPatch {
    #[serde(default, deserialize_with = "explicit_option")]
    pub ai_accuracy: Option<Option<bool>>,
    #[serde(default, deserialize_with = "explicit_option")]
    pub ai_usefulness: Option<Option<bool>>,
    pub comments: Option<String>,
    pub suggestions: Option<String>,
}

impl FeedbackPatch {
    pub fn apply(self, target: &mut Feedback) {
        merge(&mut target.ai_accuracy, self.ai_accuracy);
        merge(&mut target.ai_usefulness, self.ai_usefulness);
        merge(&mut target.comments, self.comments);
        merge(&mut target.suggestions, self.suggestions);
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AiDataPatch {
    pub probable_systems: Option<Vec<String>>,
    pub suggested_tests: Option<Vec<String>>,
    pub suspected_diagnoses: Option<Vec<SuspectedDiagnosis>>,
    pub treatment_guidelines: Option<String>,
}

impl AiDataPatch {
    pub fn apply(self, target: &mut AiData) {
        merge(&mut target.probable_systems, self.probable_systems);
        merge(&mut target.suggested_tests, self.suggested_tests);
        merge(&mut target.suspected_diagnoses, self.suspected_diagnoses);
        merge(&mut target.treatment_guidelines, self.treatment_guidelines);
    }
}

/// A patch addressed to exactly one record section.
///
/// On the wire the variant key names the section, e.g. `{demographics: {name: Jane}}`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionPatch {
    Demographics(DemographicsPatch),
    Complaints(ComplaintsPatch),
    History(HistoryPatch),
    Examination(ExaminationPatch),
    Investigations(InvestigationsPatch),
    Feedback(FeedbackPatch),
    AiData(AiDataPatch),
}

impl SectionPatch {
    /// The form section whose slice this patch updates.
    ///
    /// AI data is rendered by the `ai-suggestions` section.
    pub fn section(&self) -> SectionKey {
        match self {
            SectionPatch::Demographics(_) => SectionKey::Demographics,
            SectionPatch::Complaints(_) => SectionKey::Complaints,
            SectionPatch::History(_) => SectionKey::History,
            SectionPatch::Examination(_) => SectionKey::Examination,
            SectionPatch::Investigations(_) => SectionKey::Investigations,
            SectionPatch::Feedback(_) => SectionKey::Feedback,
            SectionPatch::AiData(_) => SectionKey::AiSuggestions,
        }
    }
}

macro_rules! impl_from_patch {
    ($($patch:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$patch> for SectionPatch {
                fn from(patch: $patch) -> Self {
                    SectionPatch::$variant(patch)
                }
            }
        )*
    };
}

impl_from_patch! {
    DemographicsPatch => Demographics,
    ComplaintsPatch => Complaints,
    HistoryPatch => History,
    ExaminationPatch => Examination,
    InvestigationsPatch => Investigations,
    FeedbackPatch => Feedback,
    AiDataPatch => AiData,
}
