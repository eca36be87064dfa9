use crate::types::errors::AmountError;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Textual values treated as a missing cell, compared case-insensitively.
const NULL_MARKERS: [&str; 6] = ["na", "n/a", "nan", "null", "none", "<na>"];

/// Returns `true` when a raw cell carries no value.
pub fn is_null_marker(value: &str) -> bool {
    let value = value.trim();

    value.is_empty() || NULL_MARKERS.iter().any(|marker| value.eq_ignore_ascii_case(marker))
}

/// Parses a raw amount cell into an exact decimal.
///
/// Accepts an optional sign, plain decimals (`15.50`, `-10`) and scientific
/// notation (`1.5e2`). No rounding is applied.
pub fn parse_amount(value: &str) -> Result<Decimal, AmountError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(AmountError::Empty);
    }

    let parsed = if value.contains(['e', 'E']) {
        Decimal::from_scientific(value)
    } else {
        Decimal::from_str(value)
    };

    parsed.map_err(|error| AmountError::InvalidFormat {
        value: value.to_string(),
        reason: error.to_string()
    })
}
