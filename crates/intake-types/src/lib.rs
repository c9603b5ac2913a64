//! Validated primitive types shared by the intake crates.

/// Errors that can occur when constructing validated intake primitives.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TypesError {
    /// The input text was empty or contained only whitespace
    #[error("text cannot be empty")]
    Empty,
    /// A confidence score fell outside the 0..=100 percentage range
    #[error("confidence must be between 0 and 100, got {0}")]
    ConfidenceOutOfRange(u64),
}

/// A string type that guarantees non-empty content.
///
/// The input is trimmed of leading and trailing whitespace during construction,
/// so `"  Pneumonia "` and `"Pneumonia"` produce the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::Empty`] if the trimmed input is empty.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TypesError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TypesError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// A confidence score expressed as a whole percentage.
///
/// Construction rejects anything above 100, so a `Confidence` can always be
/// rendered as a percentage without clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Confidence(u8);

impl Confidence {
    /// Upper bound of the percentage scale.
    pub const MAX: u8 = 100;

    /// Creates a new `Confidence` from a percentage.
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::ConfidenceOutOfRange`] if `percent` is greater than 100.
    pub fn new(percent: u8) -> Result<Self, TypesError> {
        if percent > Self::MAX {
            return Err(TypesError::ConfidenceOutOfRange(u64::from(percent)));
        }
        Ok(Self(percent))
    }

    /// Returns the percentage value.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl serde::Serialize for Confidence {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Confidence {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = u64::deserialize(deserializer)?;
        let percent = u8::try_from(raw)
            .map_err(|_| TypesError::ConfidenceOutOfRange(raw))
            .and_then(Confidence::new)
            .map_err(serde::de::Error::custom)?;
        Ok(percent)
    }
}
