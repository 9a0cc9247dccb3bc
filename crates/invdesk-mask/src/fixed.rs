//! Fixed-point values for transport and arithmetic.

use std::fmt;

use crate::digits::RawDigits;
use crate::error::MaskParseError;

/// Largest digit count that always fits an `i128` unit count.
const MAX_DIGITS: usize = 38;

/// A decimal number stored as an integer count of `10^-scale` units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedDecimal {
    units: i128,
    scale: u32,
}

impl FixedDecimal {
    pub const fn new(units: i128, scale: u32) -> Self {
        Self { units, scale }
    }

    /// Read masked digits as units at `scale`. Blank digits have no value.
    pub fn from_raw(raw: &RawDigits, scale: u32) -> Result<Option<Self>, MaskParseError> {
        let normalized = raw.normalized();
        if raw.is_empty() {
            return Ok(None);
        }
        let digits = normalized.digits();
        if digits.len() > MAX_DIGITS {
            return Err(MaskParseError::Overflow {
                digits: digits.len(),
            });
        }
        let magnitude: i128 = if digits.is_empty() {
            0
        } else {
            digits.parse().map_err(|_| MaskParseError::Overflow {
                digits: digits.len(),
            })?
        };
        let units = if normalized.is_negative() {
            -magnitude
        } else {
            magnitude
        };
        Ok(Some(Self { units, scale }))
    }

    pub const fn units(&self) -> i128 {
        self.units
    }

    pub const fn scale(&self) -> u32 {
        self.scale
    }

    /// Plain dot-decimal rendering for the server (`-1234.56`).
    pub fn to_plain_string(&self) -> String {
        let magnitude = self.units.unsigned_abs().to_string();
        let places = self.scale as usize;
        let sign = if self.units < 0 { "-" } else { "" };
        if places == 0 {
            return format!("{sign}{magnitude}");
        }
        let padded = format!("{magnitude:0>width$}", width = places + 1);
        let (int_part, frac_part) = padded.split_at(padded.len() - places);
        format!("{sign}{int_part}.{frac_part}")
    }

    /// Lossy conversion; only for the final hand-off to a float consumer.
    pub fn to_f64(&self) -> f64 {
        self.to_plain_string().parse().unwrap_or(f64::NAN)
    }

    /// Re-express at `scale`, rounding half away from zero when reducing.
    pub fn rescale(&self, scale: u32) -> Option<Self> {
        if scale >= self.scale {
            let factor = pow10(scale - self.scale)?;
            return Some(Self::new(self.units.checked_mul(factor)?, scale));
        }
        let divisor = pow10(self.scale - scale)?;
        Some(Self::new(div_round(self.units, divisor)?, scale))
    }
}

impl fmt::Display for FixedDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_plain_string())
    }
}

/// Weighted average Σ(v·w)/Σw at `scale`, rounding half away from zero.
///
/// Rows with a zero weight are skipped. Returns `None` when the weights sum
/// to zero or an intermediate overflows.
pub fn weighted_average(
    rows: &[(FixedDecimal, FixedDecimal)],
    scale: u32,
) -> Option<FixedDecimal> {
    let value_scale = rows.iter().map(|(v, _)| v.scale).max()?;
    let weight_scale = rows.iter().map(|(_, w)| w.scale).max()?;

    let mut sum_weighted: i128 = 0;
    let mut sum_weights: i128 = 0;
    for (value, weight) in rows {
        if weight.units == 0 {
            continue;
        }
        let v = value.rescale(value_scale)?.units;
        let w = weight.rescale(weight_scale)?.units;
        sum_weighted = sum_weighted.checked_add(v.checked_mul(w)?)?;
        sum_weights = sum_weights.checked_add(w)?;
    }
    if sum_weights == 0 {
        return None;
    }

    // avg = Σvw / 10^(vs+ws) / (Σw / 10^ws) = Σvw / (Σw · 10^vs)
    let numerator = sum_weighted.checked_mul(pow10(scale)?)?;
    let denominator = sum_weights.checked_mul(pow10(value_scale)?)?;
    Some(FixedDecimal::new(div_round(numerator, denominator)?, scale))
}

fn pow10(exp: u32) -> Option<i128> {
    10i128.checked_pow(exp)
}

fn div_round(numerator: i128, denominator: i128) -> Option<i128> {
    let quotient = numerator.checked_div(denominator)?;
    let remainder = numerator.checked_rem(denominator)?;
    if remainder.unsigned_abs() * 2 >= denominator.unsigned_abs() {
        let away = if (numerator < 0) != (denominator < 0) { -1 } else { 1 };
        quotient.checked_add(away)
    } else {
        Some(quotient)
    }
}
