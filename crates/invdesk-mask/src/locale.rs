use serde::{Deserialize, Serialize};

/// Decimal and grouping separators of a display locale.
///
/// The default is Brazilian Portuguese (`1.234,56`), the locale every field
/// of the application renders in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberLocale {
    pub decimal: char,
    pub grouping: char,
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self::pt_br()
    }
}

impl NumberLocale {
    /// `1.234,56`
    pub const fn pt_br() -> Self {
        Self {
            decimal: ',',
            grouping: '.',
        }
    }

    /// `1,234.56`
    pub const fn en_us() -> Self {
        Self {
            decimal: '.',
            grouping: ',',
        }
    }

    /// The other locale's decimal separator, which in this locale is the
    /// grouping separator.
    pub const fn foreign_decimal(&self) -> char {
        self.grouping
    }

    pub fn is_separator(&self, c: char) -> bool {
        c == self.decimal || c == self.grouping
    }
}
