//! Input masking for numeric, date and taxpayer-document fields.
//!
//! A numeric field's value lives in its [`RawDigits`]: the digits the user
//! typed plus an optional leading sign. The display string is always
//! re-derived from them, with the last `decimal_places` digits as the
//! fraction, so no floating point touches the value until it is handed to a
//! [`FixedDecimal`] for transport.
//!
//! # Example
//!
//! ```
//! use invdesk_mask::{NumberLocale, finalize_on_blur, mask_text};
//!
//! assert_eq!(mask_text("1234567", 3, NumberLocale::pt_br()), "1.234,567");
//! assert_eq!(finalize_on_blur("1234.56", 2, NumberLocale::pt_br()).unwrap(), "1.234,56");
//! ```

pub mod blur;
pub mod date;
pub mod digits;
pub mod document;
pub mod error;
pub mod field;
pub mod fixed;
pub mod live;
pub mod locale;
pub mod profile;

pub use blur::{finalize_on_blur, parse_display};
pub use date::{
    SearchTerm, display_to_iso, finalize_date, iso_to_display, live_date, normalize_search_term,
};
pub use digits::{RawDigits, digits_before};
pub use document::{DocumentKind, mask_document};
pub use error::MaskParseError;
pub use field::{Keystroke, MaskedField};
pub use fixed::{FixedDecimal, weighted_average};
pub use live::{LiveEdit, apply_live_input, map_caret, mask, mask_text, strip_grouping_for_edit};
pub use locale::NumberLocale;
pub use profile::{FieldProfile, is_numeric_column};
