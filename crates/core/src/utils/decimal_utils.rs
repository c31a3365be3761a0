use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

use crate::constants::DISPLAY_DECIMAL_PRECISION;

/// Parses a decimal string, with support for scientific notation.
/// Returns `None` for blanks and non-numeric placeholders.
pub fn parse_decimal_str(value: &str) -> Option<Decimal> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Numeric coercion of a raw JSON cell.
///
/// Numbers and numeric strings coerce; `null`, booleans, arrays, objects and
/// non-numeric strings do not.
pub fn coerce_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_decimal_str(&n.to_string()),
        Value::String(s) => parse_decimal_str(s),
        _ => None,
    }
}

/// Rounds a monetary amount for display. Only payload builders call this.
pub fn round_display(value: Decimal) -> Decimal {
    value.round_dp(DISPLAY_DECIMAL_PRECISION)
}
