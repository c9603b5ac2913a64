//! Step navigation across the fixed ordered list of sections.
//!
//! Navigation is unconditional: it never checks whether the current section has been
//! filled in. Stepping past either end leaves the section where it is.

use crate::SectionKey;

/// Position of a section within the form, as shown in a progress indicator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    /// One-based step number.
    pub step: usize,
    /// Total number of steps.
    pub total: usize,
    /// Rounded completion percentage for this step.
    pub percent: u8,
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Step {} of {} ({}% complete)",
            self.step, self.total, self.percent
        )
    }
}

/// Zero-based index of `key` in [`SectionKey::ORDER`].
pub fn position(key: SectionKey) -> usize {
    SectionKey::ORDER
        .iter()
        .position(|section| *section == key)
        .unwrap_or_default()
}

/// The section after `current`, or `current` itself at the last section.
pub fn next(current: SectionKey) -> SectionKey {
    SectionKey::ORDER
        .get(position(current) + 1)
        .copied()
        .unwrap_or(current)
}

/// The section before `current`, or `current` itself at the first section.
pub fn previous(current: SectionKey) -> SectionKey {
    position(current)
        .checked_sub(1)
        .and_then(|index| SectionKey::ORDER.get(index).copied())
        .unwrap_or(current)
}

pub fn is_first(key: SectionKey) -> bool {
    position(key) == 0
}

pub fn is_last(key: SectionKey) -> bool {
    position(key) == SectionKey::ORDER.len() - 1
}

pub fn progress(key: SectionKey) -> Progress {
    let step = position(key) + 1;
    let total = SectionKey::ORDER.len();
    // total is a small constant so the rounded value always fits in a u8
    let percent = ((step * 100 + total / 2) / total) as u8;
    Progress {
        step,
        total,
        percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn previous_at_first_section_is_a_no_op() {
        assert_eq!(
            previous(SectionKey::Demographics),
            SectionKey::Demographics
        );
        assert!(is_first(SectionKey::Demographics));
    }

    #[test]
    fn next_at_last_section_is_a_no_op() {
        assert_eq!(next(SectionKey::Feedback), SectionKey::Feedback);
        assert!(is_last(SectionKey::Feedback));
    }

    #[test]
    fn seven_steps_visit_every_section_then_stop() {
        let mut current = SectionKey::Demographics;
        let mut visited = vec![current];
        for _ in 0..7 {
            current = next(current);
            visited.push(current);
        }

        let mut expected = SectionKey::ORDER.to_vec();
        expected.push(SectionKey::Feedback);
        assert_eq!(visited, expected);
    }

    #[test]
    fn investigations_steps_to_ai_suggestions() {
        assert_eq!(next(SectionKey::Investigations), SectionKey::AiSuggestions);
        assert_eq!(previous(SectionKey::AiSuggestions), SectionKey::Investigations);
    }

    #[test]
    fn progress_rounds_percentage() {
        let first = progress(SectionKey::Demographics);
        assert_eq!((first.step, first.total, first.percent), (1, 7, 14));

        let third = progress(SectionKey::History);
        assert_eq!(third.percent, 43);
        assert_eq!(third.to_string(), "Step 3 of 7 (43% complete)");

        assert_eq!(progress(SectionKey::Feedback).percent, 100);
    }
}
