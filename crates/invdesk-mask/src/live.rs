//! Live masking: every keystroke reformats the whole field.
//!
//! The digit stream is read as an integer count of smallest units (cents,
//! grams): the last `decimal_places` digits are the fraction. No floating
//! point is involved at any step.

use crate::digits::{RawDigits, digits_before};
use crate::locale::NumberLocale;

/// Result of applying one input event to a masked field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveEdit {
    pub raw: RawDigits,
    pub display: String,
    /// Caret offset in characters within `display`.
    pub caret: usize,
}

/// Render `raw` as a fixed-decimal, grouped display string.
///
/// Empty input renders as an empty string: a blank field is not zero. A
/// sign typed before any digit renders as `-` so the next keystroke keeps it.
pub fn mask(raw: &RawDigits, decimal_places: u32, locale: NumberLocale) -> String {
    if raw.is_empty() {
        return if raw.is_negative() {
            "-".to_string()
        } else {
            String::new()
        };
    }
    let places = decimal_places as usize;
    let digits = raw.digits();
    let (int_raw, frac) = if digits.len() <= places {
        ("", format!("{digits:0>places$}"))
    } else {
        let split = digits.len() - places;
        (&digits[..split], digits[split..].to_string())
    };

    let int_part = match int_raw.trim_start_matches('0') {
        "" => "0",
        trimmed => trimmed,
    };

    let mut out = String::with_capacity(int_part.len() + int_part.len() / 3 + places + 2);
    if raw.is_negative() && !raw.is_zero() {
        out.push('-');
    }
    push_grouped(&mut out, int_part, locale.grouping);
    if places > 0 {
        out.push(locale.decimal);
        out.push_str(&frac);
    }
    out
}

fn push_grouped(out: &mut String, int_part: &str, grouping: char) {
    let len = int_part.len();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(grouping);
        }
        out.push(c);
    }
}

/// Mask a raw string in one step: extract digits, then render.
pub fn mask_text(text: &str, decimal_places: u32, locale: NumberLocale) -> String {
    mask(&RawDigits::extract(text), decimal_places, locale)
}

/// Re-mask the field after the browser applied a keystroke or paste.
///
/// `text` is the field content after the edit and `caret` the caret offset
/// within it. Junk characters are discarded silently; this never fails.
pub fn apply_live_input(
    previous: &RawDigits,
    text: &str,
    caret: usize,
    decimal_places: u32,
    locale: NumberLocale,
) -> LiveEdit {
    let raw = RawDigits::extract(text);
    let display = mask(&raw, decimal_places, locale);
    let caret = map_caret(text, caret, &display);
    if raw.normalized() != previous.normalized() {
        tracing::trace!(
            digits = raw.digits().len(),
            decimal_places,
            "live mask updated value"
        );
    }
    LiveEdit {
        raw,
        display,
        caret,
    }
}

/// Map a caret offset across a reformat.
///
/// With `k` digits before the caret in `old_display`, the new caret sits
/// immediately after the `k`-th digit of `new_display`, or at its end when
/// it has fewer than `k` digits. With `k == 0` the caret sits just before
/// the first digit, or after a lone sign, so it stays behind a leading sign.
pub fn map_caret(old_display: &str, old_caret: usize, new_display: &str) -> usize {
    let wanted = digits_before(old_display, old_caret);
    let mut seen = 0;
    for (offset, c) in new_display.chars().enumerate() {
        if !c.is_ascii_digit() {
            continue;
        }
        if wanted == 0 {
            return offset;
        }
        seen += 1;
        if seen == wanted {
            return offset + 1;
        }
    }
    if wanted == 0 {
        new_display.chars().take_while(|&c| c == '-').count()
    } else {
        new_display.chars().count()
    }
}

/// Drop grouping separators so the user edits `1234,56` instead of
/// `1.234,56` once the field has focus.
pub fn strip_grouping_for_edit(display: &str, locale: NumberLocale) -> String {
    display.chars().filter(|&c| c != locale.grouping).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn br(text: &str, places: u32) -> String {
        mask_text(text, places, NumberLocale::pt_br())
    }

    #[test]
    fn pads_short_input_with_zero_integer() {
        assert_eq!(br("123", 3), "0,123");
        assert_eq!(br("5", 2), "0,05");
        assert_eq!(br("0", 2), "0,00");
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(br("123456", 3), "123,456");
        assert_eq!(br("1234567", 3), "1.234,567");
        assert_eq!(br("123456789012", 2), "1.234.567.890,12");
    }

    #[test]
    fn strips_leading_zeros_from_integer_part() {
        assert_eq!(br("000123", 2), "1,23");
        assert_eq!(br("0,123", 2), "1,23");
    }

    #[test]
    fn zero_places_has_no_decimal_separator() {
        assert_eq!(br("1234", 0), "1.234");
        assert_eq!(br("0007", 0), "7");
    }

    #[test]
    fn en_us_locale_swaps_separators() {
        assert_eq!(mask_text("123456", 2, NumberLocale::en_us()), "1,234.56");
    }

    #[test]
    fn negative_values_keep_sign_unless_zero() {
        assert_eq!(br("-123456", 2), "-1.234,56");
        assert_eq!(br("-000", 2), "0,00");
    }

    #[test]
    fn blank_input_stays_blank() {
        assert_eq!(br("", 2), "");
        assert_eq!(br("abc", 2), "");
    }

    #[test]
    fn caret_follows_digit_inserted_mid_number() {
        // "1.234,56" with "9" typed after the "2"
        let edit = apply_live_input(
            &RawDigits::extract("123456"),
            "1.2934,56",
            4,
            2,
            NumberLocale::pt_br(),
        );
        assert_eq!(edit.display, "12.934,56");
        assert_eq!(edit.caret, 4);
    }

    #[test]
    fn caret_goes_to_end_when_digits_shrink() {
        assert_eq!(map_caret("0,123", 5, "1,23"), 4);
    }

    #[test]
    fn caret_with_no_digits_before_stays_after_sign() {
        assert_eq!(map_caret("-1,00", 1, "-1,00"), 1);
        assert_eq!(map_caret("", 0, ""), 0);
        assert_eq!(map_caret("-", 1, "-"), 1);
    }

    #[test]
    fn lone_sign_is_kept_until_digits_arrive() {
        let edit = apply_live_input(&RawDigits::default(), "-", 1, 2, NumberLocale::pt_br());
        assert_eq!(edit.display, "-");
        assert_eq!(edit.caret, 1);
        assert!(edit.raw.is_negative());
        assert_eq!(br("-x", 2), "-");
    }

    #[test]
    fn focus_strips_grouping() {
        assert_eq!(
            strip_grouping_for_edit("1.234.567,89", NumberLocale::pt_br()),
            "1234567,89"
        );
    }
}
