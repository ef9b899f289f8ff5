use rust_decimal::Decimal;
use std::str::FromStr;

use crate::errors::ParseError;

/// Parses a raw matched numeric token into a decimal value.
///
/// Policy: every comma is treated as a thousands separator and stripped
/// before parsing. Locales using comma as the decimal separator are out of
/// scope and will mis-parse. Anything left that is not a valid non-negative
/// decimal is a `ParseError`; callers skip that span only.
pub fn parse(raw: &str) -> Result<Decimal, ParseError> {
    let cleaned = raw.replace(',', "");
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        return Err(ParseError::EmptyAmount);
    }

    let value = Decimal::from_str(cleaned)
        .map_err(|_| ParseError::InvalidAmount(raw.to_string()))?;

    if value.is_sign_negative() {
        return Err(ParseError::NegativeAmount(raw.to_string()));
    }

    Ok(value)
}
