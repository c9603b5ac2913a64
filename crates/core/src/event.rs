//! Form events: the input actions a section view or shell sends to the store.
//!
//! Events are deserialised from scripts in externally tagged form:
//!
//! ```yaml
//! - update: { demographics: { name: Jane Doe } }
//! - set: { field: examination.vitals.bp, value: 120/80 }
//! - flag: { field: feedback.aiAccuracy, value: true }
//! - toggle: { field: complaints.selectedComplaints, item: Fever }
//! - goto: investigations
//! - next
//! - previous
//! ```

use crate::{FlagField, SectionKey, SectionPatch, TextField, ToggleField};
use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum FormEvent {
    /// Merge a typed patch into one section.
    Update(SectionPatch),
    /// Set one text field.
    Set { field: TextField, value: String },
    /// Set or clear one yes/no field.
    Flag {
        field: FlagField,
        value: Option<bool>,
    },
    /// Tick or untick one item of a list field.
    Toggle {
        field: ToggleField,
        item: String,
        #[serde(default = "ticked")]
        present: bool,
    },
    Goto(SectionKey),
    Next,
    Previous,
}

fn ticked() -> bool {
    true
}

impl FormEvent {
    /// Short description for logs.
    pub fn describe(&self) -> String {
        match self {
            FormEvent::Update(patch) => format!("update {}", patch.section()),
            FormEvent::Set { field, .. } => format!("set {field}"),
            FormEvent::Flag { field, value } => format!("flag {field} = {value:?}"),
            FormEvent::Toggle {
                field,
                item,
                present,
            } => format!("toggle {field} {item:?} -> {present}"),
            FormEvent::Goto(key) => format!("goto {key}"),
            FormEvent::Next => "next".to_string(),
            FormEvent::Previous => "previous".to_string(),
        }
    }
}
