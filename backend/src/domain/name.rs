//! Human-readable names shared by users, companies, and drivers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum number of characters accepted for a name.
pub const NAME_MAX: usize = 255;

/// Validation errors returned by [`Name::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameValidationError {
    /// Name was missing or blank once trimmed.
    Empty,
    /// Name exceeds [`NAME_MAX`] characters.
    TooLong {
        /// Upper bound on the character count.
        max: usize,
    },
}

impl NameValidationError {
    /// Stable machine-readable reason code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Empty => "empty_name",
            Self::TooLong { .. } => "name_too_long",
        }
    }
}

impl fmt::Display for NameValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "name must not be empty"),
            Self::TooLong { max } => write!(f, "name must be at most {max} characters"),
        }
    }
}

impl std::error::Error for NameValidationError {}

/// Non-empty, trimmed name of at most [`NAME_MAX`] characters.
///
/// # Examples
/// ```
/// use fleet_backend::domain::Name;
///
/// let name = Name::new("  Acme Transportes ").expect("valid name");
/// assert_eq!(name.as_ref(), "Acme Transportes");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    /// Validate and construct a [`Name`].
    pub fn new(name: impl AsRef<str>) -> Result<Self, NameValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(NameValidationError::Empty);
        }
        if trimmed.chars().count() > NAME_MAX {
            return Err(NameValidationError::TooLong { max: NAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Name> for String {
    fn from(value: Name) -> Self {
        value.0
    }
}

impl TryFrom<String> for Name {
    type Error = NameValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn blank_names_are_rejected(#[case] raw: &str) {
        assert_eq!(Name::new(raw), Err(NameValidationError::Empty));
    }

    #[rstest]
    fn overlong_names_are_rejected() {
        let raw = "a".repeat(NAME_MAX + 1);
        assert_eq!(
            Name::new(raw),
            Err(NameValidationError::TooLong { max: NAME_MAX })
        );
    }

    #[rstest]
    fn length_counts_characters_not_bytes() {
        let raw = "é".repeat(NAME_MAX);
        assert!(Name::new(raw).is_ok());
    }
}
