//! Numeric normalization of untyped cells.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::models::workbook::Cell;

/// Tokens that mean "no value" in hand-written statements.
const NULL_TOKENS: [&str; 4] = ["", "-", "n/a", "nan"];

/// Convert a cell into a decimal, or `None` when it holds no usable number.
///
/// Never fails: malformed text degrades to `None`.
pub fn clean_numeric(cell: &Cell) -> Option<Decimal> {
    match cell {
        Cell::Empty => None,
        Cell::Number(n) => Decimal::from_f64(*n),
        Cell::Bool(b) => Some(if *b { Decimal::ONE } else { Decimal::ZERO }),
        Cell::Text(s) => clean_numeric_str(s),
    }
}

/// Text path of [`clean_numeric`].
///
/// `(123)` reads as `-123`. Every character other than ASCII digits, `.`
/// and `-` is dropped before parsing, so `"Rp 1,234.5"` reads as `1234.5`.
/// Dots always mean a decimal point: `"1.234.567"` has two of them and
/// yields `None`.
pub fn clean_numeric_str(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    let lowered = trimmed.to_lowercase();
    if NULL_TOKENS.contains(&lowered.as_str()) {
        return None;
    }

    let signed = match trimmed.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        Some(inner) => format!("-{inner}"),
        None => trimmed.to_string(),
    };

    let digits: String = signed
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if digits.is_empty() {
        return None;
    }

    Decimal::from_str(&digits).ok()
}
