//! Which columns are numeric, and how many decimals they carry.

use serde::{Deserialize, Serialize};

/// Decimal places for currency columns.
pub const CURRENCY_PLACES: u32 = 2;

/// Decimal places for weight columns (`peso*`, kilograms to the gram).
pub const WEIGHT_PLACES: u32 = 3;

const EXACT_NUMERIC_COLUMNS: &[&str] = &[
    "custo_empresa",
    "valor_integral",
    "valor_unitario_energia",
    "valor_mao_obra_tm_metallica",
    "ipi",
];

const NUMERIC_COLUMN_PREFIXES: &[&str] = &["valor_unitario", "duplicata", "peso"];

/// Masking configuration of one field, fixed when the field is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldProfile {
    pub decimal_places: u32,
}

impl Default for FieldProfile {
    fn default() -> Self {
        Self::currency()
    }
}

impl FieldProfile {
    pub const fn new(decimal_places: u32) -> Self {
        Self { decimal_places }
    }

    pub const fn currency() -> Self {
        Self::new(CURRENCY_PLACES)
    }

    pub const fn weight() -> Self {
        Self::new(WEIGHT_PLACES)
    }

    /// Profile for a column name: weights get three places, everything
    /// else two.
    pub fn for_column(column: &str) -> Self {
        if column.starts_with("peso") {
            Self::weight()
        } else {
            Self::currency()
        }
    }
}

/// True for columns whose inputs take the numeric masking role.
pub fn is_numeric_column(column: &str) -> bool {
    EXACT_NUMERIC_COLUMNS.contains(&column)
        || NUMERIC_COLUMN_PREFIXES
            .iter()
            .any(|prefix| column.starts_with(prefix))
}
