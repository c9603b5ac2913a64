//! Derived summary panels, one per section.
//!
//! Each section shows a short recap of what has been entered so far. Summaries are
//! recomputed from the record on demand and hold no state of their own.

use crate::record::{IntakeRecord, VitalSign};
use crate::SectionKey;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionSummary {
    pub title: &'static str,
    pub lines: Vec<String>,
}

impl std::fmt::Display for SectionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.title)?;
        if self.lines.is_empty() {
            return writeln!(f, "  (nothing recorded)");
        }
        for line in &self.lines {
            writeln!(f, "  {line}")?;
        }
        Ok(())
    }
}

/// Pushes `label: value` when `value` is not blank.
fn labelled(lines: &mut Vec<String>, label: &str, value: &str) {
    if !value.trim().is_empty() {
        lines.push(format!("{label}: {value}"));
    }
}

/// Pushes `label: a, b, c` when `items` is not empty.
fn listed(lines: &mut Vec<String>, label: &str, items: &[String]) {
    if !items.is_empty() {
        lines.push(format!("{label}: {}", items.join(", ")));
    }
}

fn rating(value: Option<bool>, yes: &str, no: &str) -> String {
    match value {
        Some(true) => yes.to_string(),
        Some(false) => no.to_string(),
        None => "Not rated".to_string(),
    }
}

pub fn summarise(record: &IntakeRecord, section: SectionKey) -> SectionSummary {
    let mut lines = Vec::new();

    match section {
        SectionKey::Demographics => {
            let d = &record.demographics;
            labelled(&mut lines, "Name", &d.name);
            labelled(&mut lines, "Patient ID", &d.patient_id);
            labelled(&mut lines, "Age", &d.age);
            if let Some(sex) = d.sex {
                lines.push(format!("Sex: {sex}"));
            }
            labelled(&mut lines, "Occupation", &d.occupation);

            let risk = d.risk_factors;
            let present: Vec<String> = [
                (risk.smoking, "Smoking"),
                (risk.alcohol, "Alcohol"),
                (risk.family_history, "Family history"),
                (risk.travel_occupational, "Travel/occupational exposure"),
            ]
            .into_iter()
            .filter(|(flag, _)| *flag)
            .map(|(_, label)| label.to_string())
            .collect();
            listed(&mut lines, "Risk factors", &present);
        }
        SectionKey::Complaints => {
            let c = &record.complaints;
            listed(&mut lines, "Selected", &c.selected_complaints);
            labelled(&mut lines, "Other", &c.other_complaints);
        }
        SectionKey::History => {
            let h = &record.history;
            labelled(&mut lines, "Onset", &h.onset);
            labelled(&mut lines, "Duration", &h.duration);
            labelled(&mut lines, "Progression", &h.progression);
            listed(&mut lines, "Associated symptoms", &h.associated_symptoms);
        }
        SectionKey::Examination => {
            let e = &record.examination;
            for sign in VitalSign::ALL {
                labelled(&mut lines, sign.label(), e.vitals.get(sign));
            }
            listed(&mut lines, "General", &e.general_examination);
            listed(&mut lines, "Systems", &e.system_examination);
        }
        SectionKey::Investigations => {
            let i = &record.investigations;
            listed(&mut lines, "Available", &i.available);
            listed(&mut lines, "Suggested", &i.suggested);
        }
        SectionKey::AiSuggestions => {
            let ai = &record.ai_data;
            listed(&mut lines, "Probable systems", &ai.probable_systems);
            listed(&mut lines, "Suggested tests", &ai.suggested_tests);
            for suspected in &ai.suspected_diagnoses {
                lines.push(format!(
                    "Diagnosis: {} ({})",
                    suspected.diagnosis, suspected.confidence
                ));
            }
            labelled(&mut lines, "Guidelines", &ai.treatment_guidelines);
        }
        SectionKey::Feedback => {
            let fb = &record.feedback;
            if fb.ai_accuracy.is_some() || fb.ai_usefulness.is_some() {
                lines.push(format!(
                    "Accuracy: {}",
                    rating(fb.ai_accuracy, "Accurate", "Inaccurate")
                ));
                lines.push(format!(
                    "Usefulness: {}",
                    rating(fb.ai_usefulness, "Useful", "Not useful")
                ));
            }
            labelled(&mut lines, "Comments", &fb.comments);
            labelled(&mut lines, "Suggestions", &fb.suggestions);
        }
    }

    SectionSummary {
        title: section.label(),
        lines,
    }
}
