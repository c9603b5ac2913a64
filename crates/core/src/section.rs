//! Section identifiers for the intake form.
//!
//! The form is a fixed, ordered list of seven sections. The order here is the display
//! order of the tabs and the order the step navigator walks.

use crate::{IntakeError, IntakeResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One top-level section of the intake form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionKey {
    Demographics,
    Complaints,
    History,
    Examination,
    Investigations,
    AiSuggestions,
    Feedback,
}

impl SectionKey {
    /// All sections in display order.
    pub const ORDER: [SectionKey; 7] = [
        SectionKey::Demographics,
        SectionKey::Complaints,
        SectionKey::History,
        SectionKey::Examination,
        SectionKey::Investigations,
        SectionKey::AiSuggestions,
        SectionKey::Feedback,
    ];

    /// The wire identifier of the section (e.g. `ai-suggestions`).
    pub fn as_str(self) -> &'static str {
        match self {
            SectionKey::Demographics => "demographics",
            SectionKey::Complaints => "complaints",
            SectionKey::History => "history",
            SectionKey::Examination => "examination",
            SectionKey::Investigations => "investigations",
            SectionKey::AiSuggestions => "ai-suggestions",
            SectionKey::Feedback => "feedback",
        }
    }

    /// Human-readable tab label.
    pub fn label(self) -> &'static str {
        match self {
            SectionKey::Demographics => "Demographics",
            SectionKey::Complaints => "Complaints",
            SectionKey::History => "History",
            SectionKey::Examination => "Examination",
            SectionKey::Investigations => "Investigations",
            SectionKey::AiSuggestions => "AI Suggestions",
            SectionKey::Feedback => "Feedback",
        }
    }
}

impl std::fmt::Display for SectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionKey {
    type Err = IntakeError;

    fn from_str(s: &str) -> IntakeResult<Self> {
        let key = s.trim();
        SectionKey::ORDER
            .into_iter()
            .find(|section| section.as_str() == key)
            .ok_or_else(|| IntakeError::InvalidKey(key.to_string()))
    }
}
