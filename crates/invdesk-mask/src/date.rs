//! Date fields: `DD/MM/YYYY` on screen, ISO `YYYY-MM-DD` on the wire.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

const MAX_DATE_DIGITS: usize = 8;

static DISPLAY_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{2})/(\d{2})/(\d{4})$").expect("display date regex")
});

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("ISO date regex"));

/// Live date mask: at most eight digits, rendered as `DD`, `DD/MM`, then
/// `DD/MM/YYYY` as they arrive.
pub fn live_date(text: &str) -> String {
    let digits: String = text
        .chars()
        .filter(char::is_ascii_digit)
        .take(MAX_DATE_DIGITS)
        .collect();
    let mut out = String::with_capacity(MAX_DATE_DIGITS + 2);
    for (i, c) in digits.chars().enumerate() {
        if i == 2 || i == 4 {
            out.push('/');
        }
        out.push(c);
    }
    out
}

/// Expand a date field on blur.
///
/// Eight digits become `DD/MM/YYYY`, six become `DD/MM/20YY` and four become
/// `DD/MM`. Any other digit count leaves the text as typed.
pub fn finalize_date(text: &str) -> String {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    match digits.len() {
        8 => format!("{}/{}/{}", &digits[..2], &digits[2..4], &digits[4..]),
        6 => format!("{}/{}/20{}", &digits[..2], &digits[2..4], &digits[4..]),
        4 => format!("{}/{}", &digits[..2], &digits[2..]),
        _ => text.to_string(),
    }
}

/// `31/12/2024` to `2024-12-31`.
///
/// ISO input passes through. Anything else, including impossible calendar
/// dates, maps to an empty string.
pub fn display_to_iso(display: &str) -> String {
    let display = display.trim();
    if let Some(caps) = DISPLAY_DATE.captures(display) {
        let (day, month, year) = (&caps[1], &caps[2], &caps[3]);
        return match calendar_date(year, month, day) {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => String::new(),
        };
    }
    if let Some(caps) = ISO_DATE.captures(display)
        && calendar_date(&caps[1], &caps[2], &caps[3]).is_some()
    {
        return display.to_string();
    }
    String::new()
}

/// `2024-12-31` to `31/12/2024`. Anything that is not ISO passes through.
pub fn iso_to_display(iso: &str) -> String {
    let trimmed = iso.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    match ISO_DATE.captures(trimmed) {
        Some(caps) => format!("{}/{}/{}", &caps[3], &caps[2], &caps[1]),
        None => iso.to_string(),
    }
}

fn calendar_date(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

/// A list search term as sent to the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchTerm {
    pub q: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q_raw: Option<String>,
}

/// Dates typed in the search box are searched as ISO, with the text as
/// typed kept alongside in `q_raw`. Other terms go through trimmed.
pub fn normalize_search_term(term: &str) -> SearchTerm {
    let raw = term.trim();
    let iso = if DISPLAY_DATE.is_match(raw) {
        display_to_iso(raw)
    } else {
        String::new()
    };
    if iso.is_empty() {
        SearchTerm {
            q: raw.to_string(),
            q_raw: None,
        }
    } else {
        SearchTerm {
            q: iso,
            q_raw: Some(raw.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_date_renders_progressively() {
        assert_eq!(live_date("3"), "3");
        assert_eq!(live_date("311"), "31/1");
        assert_eq!(live_date("3112"), "31/12");
        assert_eq!(live_date("31/12/20245"), "31/12/2024");
        assert_eq!(live_date("ab"), "");
    }

    #[test]
    fn blur_expands_short_dates() {
        assert_eq!(finalize_date("31122024"), "31/12/2024");
        assert_eq!(finalize_date("31/12/24"), "31/12/2024");
        assert_eq!(finalize_date("3112"), "31/12");
        assert_eq!(finalize_date("311"), "311");
    }

    #[test]
    fn display_iso_conversion() {
        assert_eq!(display_to_iso("31/12/2024"), "2024-12-31");
        assert_eq!(display_to_iso("2024-12-31"), "2024-12-31");
        assert_eq!(display_to_iso("31/02/2024"), "");
        assert_eq!(display_to_iso("abc"), "");
        assert_eq!(iso_to_display("2024-12-31"), "31/12/2024");
        assert_eq!(iso_to_display("31/12/2024"), "31/12/2024");
        assert_eq!(iso_to_display(""), "");
    }

    #[test]
    fn search_term_for_dates_carries_raw_text() {
        assert_eq!(
            normalize_search_term(" 05/03/2025 "),
            SearchTerm {
                q: "2025-03-05".to_string(),
                q_raw: Some("05/03/2025".to_string()),
            }
        );
        assert_eq!(
            normalize_search_term("2024-12-31"),
            SearchTerm {
                q: "2024-12-31".to_string(),
                q_raw: None,
            }
        );
        assert_eq!(
            normalize_search_term("31/02/2024"),
            SearchTerm {
                q: "31/02/2024".to_string(),
                q_raw: None,
            }
        );
        assert_eq!(
            normalize_search_term("aço"),
            SearchTerm {
                q: "aço".to_string(),
                q_raw: None,
            }
        );
    }
}
