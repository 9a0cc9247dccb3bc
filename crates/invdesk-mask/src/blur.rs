//! Blur finalization: accept whatever the user left in the field and render
//! it canonically.
//!
//! Three shapes are accepted:
//!
//! - locale-formatted (`1.234,56` in pt-BR),
//! - foreign-formatted (`1234.56`),
//! - bare digits (`123456`, read like live input as `1.234,56`).
//!
//! A lone foreign separator is ambiguous (`1.234` may be a thousand or a
//! decimal). The rule is best-effort and kept deliberately simple: it is a
//! decimal separator only when one or two digits follow its last occurrence.

use crate::digits::RawDigits;
use crate::error::MaskParseError;
use crate::live::mask;
use crate::locale::NumberLocale;

/// Finalize a field's text on blur.
///
/// Blank input stays blank. On error the caller keeps its previous value.
pub fn finalize_on_blur(
    text: &str,
    decimal_places: u32,
    locale: NumberLocale,
) -> Result<String, MaskParseError> {
    let Some(raw) = parse_display(text, decimal_places, locale)? else {
        return Ok(String::new());
    };
    Ok(mask(&raw, decimal_places, locale))
}

/// Parse any accepted shape into raw digits scaled to `decimal_places`.
///
/// Returns `Ok(None)` for blank input.
pub fn parse_display(
    text: &str,
    decimal_places: u32,
    locale: NumberLocale,
) -> Result<Option<RawDigits>, MaskParseError> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Ok(None);
    }

    let (negative, body) = split_sign(&compact, text)?;
    if let Some(found) = body
        .chars()
        .find(|&c| !c.is_ascii_digit() && !locale.is_separator(c))
    {
        return Err(if found == '-' {
            MaskParseError::MisplacedSign {
                input: text.to_string(),
            }
        } else {
            MaskParseError::NotNumeric {
                input: text.to_string(),
                found,
            }
        });
    }
    if !body.chars().any(|c| c.is_ascii_digit()) {
        // Only separators left: nothing numeric to keep.
        return Ok(None);
    }

    let places = decimal_places as usize;
    let digits = if let Some(idx) = body.rfind(locale.decimal) {
        let int_part = only_digits(&body[..idx]);
        let frac_part = only_digits(&body[idx + locale.decimal.len_utf8()..]);
        scale_fraction(&int_part, &frac_part, places)
    } else if let Some(idx) = body.rfind(locale.foreign_decimal()) {
        let trailing = &body[idx + locale.foreign_decimal().len_utf8()..];
        if (1..=2).contains(&trailing.len()) {
            tracing::debug!(
                trailing = trailing.len(),
                "treating lone foreign separator as decimal"
            );
            scale_fraction(&only_digits(&body[..idx]), trailing, places)
        } else {
            scale_fraction(&only_digits(body), "", places)
        }
    } else {
        body.to_string()
    };

    Ok(Some(RawDigits::from_parts(negative, digits)))
}

fn split_sign<'a>(compact: &'a str, original: &str) -> Result<(bool, &'a str), MaskParseError> {
    match compact.strip_prefix('-') {
        Some(rest) if rest.starts_with('-') => Err(MaskParseError::MisplacedSign {
            input: original.to_string(),
        }),
        Some(rest) => Ok((true, rest)),
        None => Ok((false, compact)),
    }
}

fn only_digits(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}

/// Combine an integer and fraction into a digit string with exactly
/// `places` fractional digits, rounding half away from zero when the
/// fraction is longer.
fn scale_fraction(int_part: &str, frac_part: &str, places: usize) -> String {
    let mut combined = String::with_capacity(int_part.len() + places + 1);
    combined.push_str(if int_part.is_empty() { "0" } else { int_part });

    if frac_part.len() <= places {
        combined.push_str(frac_part);
        combined.extend(std::iter::repeat_n('0', places - frac_part.len()));
        return combined;
    }

    combined.push_str(&frac_part[..places]);
    if frac_part.as_bytes()[places] >= b'5' {
        increment(&mut combined);
    }
    combined
}

fn increment(digits: &mut String) {
    let mut bytes = std::mem::take(digits).into_bytes();
    let mut carry = true;
    for b in bytes.iter_mut().rev() {
        if !carry {
            break;
        }
        if *b == b'9' {
            *b = b'0';
        } else {
            *b += 1;
            carry = false;
        }
    }
    if carry {
        bytes.insert(0, b'1');
    }
    // Only ASCII digits were touched.
    *digits = String::from_utf8(bytes).unwrap_or_default();
}
