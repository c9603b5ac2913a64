//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into the form store. Binaries read environment variables; the store never does.

use crate::{IntakeResult, SectionKey};
use intake_types::NonEmptyText;

/// Core configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreConfig {
    initial_section: SectionKey,
    clinician: Option<NonEmptyText>,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Arguments
    ///
    /// * `initial_section` - Section that is active when a session starts.
    /// * `clinician` - Optional name recorded on each session.
    pub fn new(initial_section: SectionKey, clinician: Option<NonEmptyText>) -> Self {
        Self {
            initial_section,
            clinician,
        }
    }

    pub fn initial_section(&self) -> SectionKey {
        self.initial_section
    }

    pub fn clinician(&self) -> Option<&NonEmptyText> {
        self.clinician.as_ref()
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::new(SectionKey::Demographics, None)
    }
}

/// Parse the initial section from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`SectionKey::Demographics`].
pub fn initial_section_from_env_value(value: Option<String>) -> IntakeResult<SectionKey> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let parsed = value.map(|v| v.parse::<SectionKey>()).transpose()?;

    Ok(parsed.unwrap_or(SectionKey::Demographics))
}

/// Parse the clinician name from an optional string value. Blank values are ignored.
pub fn clinician_from_env_value(value: Option<String>) -> Option<NonEmptyText> {
    value.and_then(|v| NonEmptyText::new(v).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IntakeError;

    #[test]
    fn blank_initial_section_defaults_to_demographics() {
        assert_eq!(
            initial_section_from_env_value(None).expect("default"),
            SectionKey::Demographics
        );
        assert_eq!(
            initial_section_from_env_value(Some("  ".into())).expect("default"),
            SectionKey::Demographics
        );
    }

    #[test]
    fn parses_initial_section() {
        assert_eq!(
            initial_section_from_env_value(Some(" history ".into())).expect("history"),
            SectionKey::History
        );
    }

    #[test]
    fn rejects_unknown_initial_section() {
        let err = initial_section_from_env_value(Some("labs".into())).expect_err("unknown");
        assert!(matches!(err, IntakeError::InvalidKey(key) if key == "labs"));
    }

    #[test]
    fn clinician_ignores_blank_values() {
        assert_eq!(clinician_from_env_value(Some("   ".into())), None);
        assert_eq!(
            clinician_from_env_value(Some("Dr Okafor".into()))
                .expect("named")
                .as_str(),
            "Dr Okafor"
        );
    }
}
