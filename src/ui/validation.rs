//! Form validation gate run before create and update.

use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

/// Form fields that can receive focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Country,
    SubsidyType,
    Amount,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Country is required")]
    CountryRequired,

    #[error("Amount is required")]
    AmountRequired,

    #[error("Amount must be a valid number")]
    AmountNotNumeric,

    #[error("Amount must be greater than 0")]
    AmountNotPositive,
}

impl FieldError {
    /// The field that receives focus after this error.
    pub fn field(&self) -> Field {
        match self {
            Self::CountryRequired => Field::Country,
            Self::AmountRequired | Self::AmountNotNumeric | Self::AmountNotPositive => {
                Field::Amount
            }
        }
    }
}

/// Largest scale a `Decimal` holds exactly.
const MAX_SCALE: i64 = 28;

/// Parse amount text as typed by the user. Plain and scientific notation
/// (`1.5e6`) are accepted. Text that `Decimal` could only hold rounded, or
/// that uses `_` digit separators, is rejected.
pub fn parse_amount(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.contains('_') {
        return None;
    }
    match text.split_once(|c: char| c == 'e' || c == 'E') {
        None => parse_exact(text),
        Some((mantissa, exponent)) => {
            let mantissa = parse_exact(mantissa)?;
            let exponent: i64 = exponent.parse().ok()?;
            if i64::from(mantissa.scale()) - exponent > MAX_SCALE {
                return None;
            }
            Decimal::from_scientific(text).ok()
        }
    }
}

/// Plain notation only. `from_str` rounds fractions it cannot hold, which
/// shows up as a scale shorter than the typed fraction.
fn parse_exact(text: &str) -> Option<Decimal> {
    let value = Decimal::from_str(text).ok()?;
    let typed_scale = text.split_once('.').map_or(0, |(_, frac)| frac.len());
    (value.scale() as usize == typed_scale).then_some(value)
}

/// Checks in order: country, amount present, amount numeric, amount positive.
/// Returns the trimmed country and the parsed amount.
pub fn validate_form(country: &str, amount_text: &str) -> Result<(String, Decimal), FieldError> {
    let country = country.trim();
    if country.is_empty() {
        return Err(FieldError::CountryRequired);
    }
    if amount_text.trim().is_empty() {
        return Err(FieldError::AmountRequired);
    }
    let amount = parse_amount(amount_text).ok_or(FieldError::AmountNotNumeric)?;
    if amount <= Decimal::ZERO {
        return Err(FieldError::AmountNotPositive);
    }
    Ok((country.to_string(), amount))
}
