//! Digit extraction: the only way a numeric value enters a masked field.

use std::fmt;

/// Sign and digit characters of a field, the single source of truth for its
/// value. Never derived from floating point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RawDigits {
    negative: bool,
    digits: String,
}

impl RawDigits {
    /// Keep only ASCII digits from `text`. A `-` counts as the sign only
    /// when it appears before the first digit; everything else is dropped.
    pub fn extract(text: &str) -> Self {
        let mut negative = false;
        let mut digits = String::with_capacity(text.len());
        for c in text.chars() {
            if c.is_ascii_digit() {
                digits.push(c);
            } else if c == '-' && digits.is_empty() {
                negative = true;
            }
        }
        Self { negative, digits }
    }

    pub(crate) fn from_parts(negative: bool, digits: String) -> Self {
        debug_assert!(digits.bytes().all(|b| b.is_ascii_digit()));
        Self { negative, digits }
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// True when every digit is zero (or there are none).
    pub fn is_zero(&self) -> bool {
        self.digits.bytes().all(|b| b == b'0')
    }

    /// Leading zeros stripped; a zero value carries no sign.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let digits = self.digits.trim_start_matches('0').to_string();
        Self {
            negative: self.negative && !digits.is_empty(),
            digits,
        }
    }
}

impl fmt::Display for RawDigits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        f.write_str(&self.digits)
    }
}

/// Count ASCII digits in the first `offset` characters of `text`.
pub fn digits_before(text: &str, offset: usize) -> usize {
    text.chars()
        .take(offset)
        .filter(char::is_ascii_digit)
        .count()
}
