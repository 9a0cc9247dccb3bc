//! Masking error types.
//!
//! Masking errors never leave the field that produced them: the caller keeps
//! the previous valid value and leaves the user's text alone.

use thiserror::Error;

/// Text that cannot be interpreted as a number on blur.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MaskParseError {
    /// Characters other than digits, separators, whitespace and a leading
    /// minus remained after stripping separators.
    #[error("not a number: {input:?} (unexpected {found:?})")]
    NotNumeric { input: String, found: char },

    /// A minus sign appeared after the first digit.
    #[error("misplaced sign in {input:?}")]
    MisplacedSign { input: String },

    /// The value does not fit the fixed-point representation.
    #[error("value has too many digits ({digits}) for a fixed-point value")]
    Overflow { digits: usize },
}

impl MaskParseError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotNumeric { found, .. } => {
                format!("The value contains '{found}', which is not part of a number.")
            }
            Self::MisplacedSign { .. } => {
                "A minus sign is only allowed before the first digit.".to_string()
            }
            Self::Overflow { .. } => "The number is too large.".to_string(),
        }
    }
}
