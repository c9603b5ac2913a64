//! Toggle-set updates for checkbox-backed list fields.
//!
//! Every multi-select list in the record behaves the same way: ticking an item appends it
//! once, in selection order; unticking removes it. [`toggle`] implements that once and
//! [`ToggleField`] binds it to the six list fields of the record.

use crate::patch::{ComplaintsPatch, ExaminationPatch, HistoryPatch, InvestigationsPatch};
use crate::{IntakeError, IntakeRecord, IntakeResult, SectionKey, SectionPatch};
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

/// Returns `current` with `item` present or absent.
///
/// - present and missing: `item` is appended at the end
/// - present and already there: unchanged
/// - absent: every occurrence of `item` is removed
pub fn toggle<T: PartialEq + Clone>(current: &[T], item: &T, present: bool) -> Vec<T> {
    if present {
        let mut next = current.to_vec();
        if !current.contains(item) {
            next.push(item.clone());
        }
        next
    } else {
        current.iter().filter(|x| *x != item).cloned().collect()
    }
}

/// A list-valued record field driven by checkboxes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ToggleField {
    SelectedComplaints,
    AssociatedSymptoms,
    GeneralExamination,
    SystemExamination,
    AvailableInvestigations,
    SuggestedInvestigations,
}

impl ToggleField {
    pub const ALL: [ToggleField; 6] = [
        ToggleField::SelectedComplaints,
        ToggleField::AssociatedSymptoms,
        ToggleField::GeneralExamination,
        ToggleField::SystemExamination,
        ToggleField::AvailableInvestigations,
        ToggleField::SuggestedInvestigations,
    ];

    /// Dotted path of the field in the serialised record.
    pub fn as_str(self) -> &'static str {
        match self {
            ToggleField::SelectedComplaints => "complaints.selectedComplaints",
            ToggleField::AssociatedSymptoms => "history.associatedSymptoms",
            ToggleField::GeneralExamination => "examination.generalExamination",
            ToggleField::SystemExamination => "examination.systemExamination",
            ToggleField::AvailableInvestigations => "investigations.available",
            ToggleField::SuggestedInvestigations => "investigations.suggested",
        }
    }

    pub fn section(self) -> SectionKey {
        match self {
            ToggleField::SelectedComplaints => SectionKey::Complaints,
            ToggleField::AssociatedSymptoms => SectionKey::History,
            ToggleField::GeneralExamination | ToggleField::SystemExamination => {
                SectionKey::Examination
            }
            ToggleField::AvailableInvestigations | ToggleField::SuggestedInvestigations => {
                SectionKey::Investigations
            }
        }
    }

    pub fn get(self, record: &IntakeRecord) -> &[String] {
        match self {
            ToggleField::SelectedComplaints => &record.complaints.selected_complaints,
            ToggleField::AssociatedSymptoms => &record.history.associated_symptoms,
            ToggleField::GeneralExamination => &record.examination.general_examination,
            ToggleField::SystemExamination => &record.examination.system_examination,
            ToggleField::AvailableInvestigations => &record.investigations.available,
            ToggleField::SuggestedInvestigations => &record.investigations.suggested,
        }
    }

    /// A section patch that replaces this field with `items`.
    pub fn patch(self, items: Vec<String>) -> SectionPatch {
        match self {
            ToggleField::SelectedComplaints => ComplaintsPatch {
                selected_complaints: Some(items),
                ..ComplaintsPatch::default()
            }
            .into(),
            ToggleField::AssociatedSymptoms => HistoryPatch {
                associated_symptoms: Some(items),
                ..HistoryPatch::default()
            }
            .into(),
            ToggleField::GeneralExamination => ExaminationPatch {
                general_examination: Some(items),
                ..ExaminationPatch::default()
            }
            .into(),
            ToggleField::SystemExamination => ExaminationPatch {
                system_examination: Some(items),
                ..ExaminationPatch::default()
            }
            .into(),
            ToggleField::AvailableInvestigations => InvestigationsPatch {
                available: Some(items),
                ..InvestigationsPatch::default()
            }
            .into(),
            ToggleField::SuggestedInvestigations => InvestigationsPatch {
                suggested: Some(items),
                ..InvestigationsPatch::default()
            }
            .into(),
        }
    }

    /// Builds the patch that ticks or unticks `item` against the current record.
    pub fn toggled(self, record: &IntakeRecord, item: &str, present: bool) -> SectionPatch {
        let items = toggle(self.get(record), &item.to_string(), present);
        self.patch(items)
    }
}

impl std::fmt::Display for ToggleField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToggleField {
    type Err = IntakeError;

    fn from_str(s: &str) -> IntakeResult<Self> {
        let path = s.trim();
        ToggleField::ALL
            .into_iter()
            .find(|field| field.as_str() == path)
            .ok_or_else(|| IntakeError::InvalidInput(format!("unknown list field: {path}")))
    }
}

impl<'de> Deserialize<'de> for ToggleField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
