//! A numeric input field driven by the masker.

use crate::blur::parse_display;
use crate::digits::RawDigits;
use crate::error::MaskParseError;
use crate::fixed::FixedDecimal;
use crate::live::{self, LiveEdit, mask, strip_grouping_for_edit};
use crate::locale::NumberLocale;
use crate::profile::FieldProfile;

/// One edit as the browser would apply it at the caret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keystroke {
    Insert(char),
    Paste(String),
    Backspace,
    Delete,
}

/// State of one numeric input.
///
/// `raw` is the value; `display` is always `mask(raw, places, locale)`
/// except while focused, when grouping separators are hidden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedField {
    profile: FieldProfile,
    locale: NumberLocale,
    raw: RawDigits,
    display: String,
    caret: usize,
}

impl MaskedField {
    pub fn new(profile: FieldProfile, locale: NumberLocale) -> Self {
        Self {
            profile,
            locale,
            raw: RawDigits::default(),
            display: String::new(),
            caret: 0,
        }
    }

    /// Field for a named column, using the column's decimal places.
    pub fn for_column(column: &str, locale: NumberLocale) -> Self {
        Self::new(FieldProfile::for_column(column), locale)
    }

    /// Seed the field with a value in any shape blur accepts.
    pub fn with_value(mut self, text: &str) -> Result<Self, MaskParseError> {
        let raw = parse_display(text, self.profile.decimal_places, self.locale)?;
        self.set_raw(raw.unwrap_or_default());
        self.caret = self.display_len();
        Ok(self)
    }

    pub fn profile(&self) -> FieldProfile {
        self.profile
    }

    pub fn raw(&self) -> &RawDigits {
        &self.raw
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn set_caret(&mut self, caret: usize) {
        self.caret = caret.min(self.display_len());
    }

    /// The field's value, `None` when blank.
    pub fn value(&self) -> Result<Option<FixedDecimal>, MaskParseError> {
        FixedDecimal::from_raw(&self.raw, self.profile.decimal_places)
    }

    /// Re-mask after the browser changed the text to `text` with the caret
    /// at `caret`.
    pub fn apply_live_input(&mut self, text: &str, caret: usize) -> LiveEdit {
        let edit = live::apply_live_input(
            &self.raw,
            text,
            caret,
            self.profile.decimal_places,
            self.locale,
        );
        self.raw = edit.raw.clone();
        self.display = edit.display.clone();
        self.caret = edit.caret;
        edit
    }

    /// Apply a keystroke at the caret, then re-mask.
    pub fn key(&mut self, keystroke: &Keystroke) -> LiveEdit {
        let mut chars: Vec<char> = self.display.chars().collect();
        let mut caret = self.caret.min(chars.len());
        match keystroke {
            Keystroke::Insert(c) => {
                chars.insert(caret, *c);
                caret += 1;
            }
            Keystroke::Paste(text) => {
                let pasted: Vec<char> = text.chars().collect();
                let count = pasted.len();
                chars.splice(caret..caret, pasted);
                caret += count;
            }
            Keystroke::Backspace => {
                if caret > 0 {
                    caret -= 1;
                    chars.remove(caret);
                }
            }
            Keystroke::Delete => {
                if caret < chars.len() {
                    chars.remove(caret);
                }
            }
        }
        let text: String = chars.into_iter().collect();
        self.apply_live_input(&text, caret)
    }

    /// Focus-in: hide grouping separators and put the caret at the end.
    pub fn focus(&mut self) {
        self.display = strip_grouping_for_edit(&self.display, self.locale);
        self.caret = self.display_len();
    }

    /// Blur: render the current text canonically.
    ///
    /// On error the previous value and the text stay as they are.
    pub fn finalize_on_blur(&mut self) -> Result<(), MaskParseError> {
        match parse_display(&self.display, self.profile.decimal_places, self.locale) {
            Ok(raw) => {
                self.set_raw(raw.unwrap_or_default());
                self.caret = self.caret.min(self.display_len());
                Ok(())
            }
            Err(error) => {
                tracing::debug!(%error, "blur kept previous value");
                Err(error)
            }
        }
    }

    fn set_raw(&mut self, raw: RawDigits) {
        self.display = mask(&raw, self.profile.decimal_places, self.locale);
        self.raw = raw;
    }

    fn display_len(&self) -> usize {
        self.display.chars().count()
    }
}
