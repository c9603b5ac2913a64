//! Replayable form-event scripts.
//!
//! A script is a YAML (or JSON) document listing [`FormEvent`]s under `events`:
//!
//! ```yaml
//! events:
//!   - update:
//!       demographics:
//!         name: Jane Doe
//!   - toggle: { field: complaints.selectedComplaints, item: Fever }
//!   - next
//! ```
//!
//! Parsing is strict: unknown keys and wrongly-typed values are rejected with the path of
//! the failing field.

use crate::{FormEvent, FormStore, IntakeError, IntakeResult};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScriptWire {
    // YAML 0.9 tags enums as `!variant`; events are written as single-key maps instead.
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    events: Vec<FormEvent>,
}

/// Script operations.
///
/// This is a zero-sized type used for namespacing script-related operations.
pub struct Script;

impl Script {
    /// Parse a script from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::Script`] naming the failing path (e.g. `events[2].set.field`)
    /// if the text does not match the script schema.
    pub fn parse(text: &str) -> IntakeResult<Vec<FormEvent>> {
        let deserializer = serde_yaml::Deserializer::from_str(text);

        match serde_path_to_error::deserialize::<_, ScriptWire>(deserializer) {
            Ok(wire) => Ok(wire.events),
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() || path == "." {
                    "<root>"
                } else {
                    path.as_str()
                };
                Err(IntakeError::Script(format!(
                    "schema mismatch at {path}: {source}"
                )))
            }
        }
    }

    /// Read and parse a script file.
    pub fn load(path: &Path) -> IntakeResult<Vec<FormEvent>> {
        let text = std::fs::read_to_string(path).map_err(IntakeError::FileRead)?;
        Self::parse(&text)
    }

    /// Apply `events` to `store` in order, stopping at the first failure.
    ///
    /// Returns the number of events applied.
    pub fn replay(store: &mut FormStore, events: Vec<FormEvent>) -> IntakeResult<usize> {
        let mut applied = 0;
        for event in events {
            tracing::debug!(event = %event.describe(), "replaying form event");
            store.apply(event)?;
            applied += 1;
        }
        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Sex;
    use crate::{CoreConfig, SectionKey, SectionPatch, TextField, ToggleField};
    use std::io::Write;
    use std::sync::Arc;

    const INTAKE_SCRIPT: &str = r#"events:
  - update:
      demographics:
        name: Jane Doe
        sex: female
  - set: { field: examination.vitals.bp, value: 120/80 }
  - set: { field: examination.vitals.hr, value: "72" }
  - flag: { field: demographics.riskFactors.smoking, value: true }
  - flag: { field: feedback.aiAccuracy }
  - toggle: { field: complaints.selectedComplaints, item: Fever }
  - toggle: { field: complaints.selectedComplaints, item: Cough }
  - toggle: { field: complaints.selectedComplaints, item: Fever, present: false }
  - goto: investigations
  - next
"#;

    fn store() -> FormStore {
        let mut store = FormStore::with_static_suggestions(Arc::new(CoreConfig::default()));
        store.start().expect("start");
        store
    }

    #[test]
    fn parses_every_event_kind() {
        let events = Script::parse(INTAKE_SCRIPT).expect("parse script");
        assert_eq!(events.len(), 10);
        assert_eq!(
            events[1],
            FormEvent::Set {
                field: TextField::Vital(crate::VitalSign::Bp),
                value: "120/80".into(),
            }
        );
        assert_eq!(
            events[5],
            FormEvent::Toggle {
                field: ToggleField::SelectedComplaints,
                item: "Fever".into(),
                present: true,
            }
        );
        assert_eq!(events[8], FormEvent::Goto(SectionKey::Investigations));
        assert_eq!(events[9], FormEvent::Next);
    }

    #[test]
    fn replay_builds_expected_record() {
        let mut store = store();
        let events = Script::parse(INTAKE_SCRIPT).expect("parse script");
        let applied = Script::replay(&mut store, events).expect("replay");
        assert_eq!(applied, 10);

        let record = store.record().expect("record");
        assert_eq!(record.demographics.name, "Jane Doe");
        assert_eq!(record.demographics.sex, Some(Sex::Female));
        assert!(record.demographics.risk_factors.smoking);
        assert_eq!(record.examination.vitals.bp, "120/80");
        assert_eq!(record.examination.vitals.hr, "72");
        assert_eq!(record.feedback.ai_accuracy, None);
        assert_eq!(record.complaints.selected_complaints, vec!["Cough"]);
        assert_eq!(
            store.active_section().expect("active"),
            SectionKey::AiSuggestions
        );
    }

    #[test]
    fn accepts_json_documents() {
        let events = Script::parse(r#"{"events": ["next", {"goto": "feedback"}]}"#)
            .expect("parse json");
        assert_eq!(
            events,
            vec![FormEvent::Next, FormEvent::Goto(SectionKey::Feedback)]
        );
    }

    #[test]
    fn parses_nested_section_patch_under_update() {
        let events = Script::parse(
            "events:\n  - update:\n      feedback:\n        aiAccuracy: null\n        comments: Helpful\n",
        )
        .expect("parse update");

        match &events[0] {
            FormEvent::Update(SectionPatch::Feedback(patch)) => {
                assert_eq!(patch.ai_accuracy, Some(None));
                assert_eq!(patch.comments.as_deref(), Some("Helpful"));
            }
            other => panic!("expected feedback update, got {other:?}"),
        }
    }

    #[test]
    fn mismatch_reports_path_of_failing_event() {
        let text = "events:\n  - next\n  - set: { field: demographics.nickname, value: Jo }\n";
        let err = Script::parse(text).expect_err("unknown field path");
        match err {
            IntakeError::Script(msg) => {
                assert!(msg.contains("events[1]"), "missing path in {msg}");
                assert!(msg.contains("demographics.nickname"));
            }
            other => panic!("expected Script error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_top_level_key() {
        let err = Script::parse("events: []\nsteps: []\n").expect_err("unknown key");
        match err {
            IntakeError::Script(msg) => assert!(msg.contains("steps")),
            other => panic!("expected Script error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_misspelt_patch_field_with_path() {
        let text = "events:\n  - update:\n      demographics:\n        nmae: Jane\n";
        let err = Script::parse(text).expect_err("typo");
        match err {
            IntakeError::Script(msg) => {
                assert!(msg.contains("nmae"));
                assert!(msg.contains("events[0]"));
            }
            other => panic!("expected Script error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_wrong_types() {
        let text = "events:\n  - flag: { field: feedback.aiUsefulness, value: maybe }\n";
        let err = Script::parse(text).expect_err("wrong type");
        assert!(matches!(err, IntakeError::Script(_)));
    }

    #[test]
    fn rejects_unknown_section_key() {
        let err = Script::parse("events:\n  - goto: labs\n").expect_err("unknown section");
        match err {
            IntakeError::Script(msg) => assert!(msg.contains("labs")),
            other => panic!("expected Script error, got {other:?}"),
        }
    }

    #[test]
    fn replay_stops_at_first_failure() {
        let mut store = store();
        let events = Script::parse(
            "events:\n  - set: { field: demographics.age, value: \"40\" }\n  - set: { field: demographics.sex, value: unknown }\n  - next\n",
        )
        .expect("parse");

        let err = Script::replay(&mut store, events).expect_err("invalid sex");
        assert!(matches!(err, IntakeError::InvalidInput(_)));
        assert_eq!(store.record().expect("record").demographics.age, "40");
        assert_eq!(
            store.active_section().expect("active"),
            SectionKey::Demographics
        );
    }

    #[test]
    fn loads_script_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"events:\n  - previous\n").expect("write");

        let events = Script::load(file.path()).expect("load");
        assert_eq!(events, vec![FormEvent::Previous]);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = Script::load(&dir.path().join("missing.yaml")).expect_err("missing");
        assert!(matches!(err, IntakeError::FileRead(_)));
    }
}
