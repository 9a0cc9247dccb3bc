//! CPF/CNPJ taxpayer document mask.

use std::fmt;

const CPF_DIGITS: usize = 11;
const CNPJ_DIGITS: usize = 14;

/// `000.000.000-00`
const CPF_LAYOUT: &[(usize, char)] = &[(3, '.'), (6, '.'), (9, '-')];
/// `00.000.000/0000-00`
const CNPJ_LAYOUT: &[(usize, char)] = &[(2, '.'), (5, '.'), (8, '/'), (12, '-')];

/// What a document field currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Cpf,
    Cnpj,
    Incomplete,
}

impl DocumentKind {
    pub fn classify(digits: &str) -> Self {
        let count = digits.chars().filter(char::is_ascii_digit).count();
        match count {
            CPF_DIGITS => Self::Cpf,
            CNPJ_DIGITS => Self::Cnpj,
            _ => Self::Incomplete,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cpf => "CPF",
            Self::Cnpj => "CNPJ",
            Self::Incomplete => "incomplete",
        })
    }
}

/// Mask a document field as the user types. Up to eleven digits read as a
/// CPF; more switch to the CNPJ layout, capped at fourteen digits.
pub fn mask_document(text: &str) -> String {
    let digits: Vec<char> = text
        .chars()
        .filter(char::is_ascii_digit)
        .take(CNPJ_DIGITS)
        .collect();
    let layout = if digits.len() <= CPF_DIGITS {
        CPF_LAYOUT
    } else {
        CNPJ_LAYOUT
    };

    let mut out = String::with_capacity(digits.len() + layout.len());
    for (i, &c) in digits.iter().enumerate() {
        // a separator only appears once a digit follows it
        if let Some(&(_, sep)) = layout.iter().find(|(at, _)| *at == i) {
            out.push(sep);
        }
        out.push(c);
    }
    out
}
