//! Reader for the semicolon-delimited NAV catalog.
//!
//! A catalog line looks like
//! `119551;INF209KA12Z1;INF209KA13Z9;Aditya Birla Sun Life Banking & PSU Debt Fund;311.0957;17-Oct-2026`
//! and the NAV sits in the fifth field.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::errors::MarketDataError;

/// Separator between catalog fields.
pub const NAV_FIELD_SEPARATOR: char = ';';

/// Zero-based index of the NAV field.
pub const NAV_FIELD_INDEX: usize = 4;

/// Returns the NAV of the first line that contains `symbol`.
///
/// Matching is a literal substring test on the whole line, so a symbol that
/// is a prefix of another (`ABC` / `ABCD`) matches whichever line comes
/// first.
pub fn parse_nav<S: AsRef<str>>(lines: &[S], symbol: &str) -> Result<Decimal, MarketDataError> {
    let line: &str = lines
        .iter()
        .map(|line| AsRef::<str>::as_ref(line))
        .find(|line| line.contains(symbol))
        .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

    let field = line
        .split(NAV_FIELD_SEPARATOR)
        .nth(NAV_FIELD_INDEX)
        .ok_or_else(|| MarketDataError::MalformedNav {
            symbol: symbol.to_string(),
            message: format!("expected at least {} fields", NAV_FIELD_INDEX + 1),
        })?;

    Decimal::from_str(field.trim()).map_err(|e| MarketDataError::MalformedNav {
        symbol: symbol.to_string(),
        message: format!("'{}': {}", field, e),
    })
}
