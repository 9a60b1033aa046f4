//! Money helpers
//!
//! Amounts are carried as [`Money`] in the API and as integer minor units (paise) in
//! stored records.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use thiserror::Error;

/// Currency of every price in the store.
pub const CURRENCY: &Currency = iso::INR;

/// Errors parsing a price string.
#[derive(Debug, Error, PartialEq)]
pub enum PriceParseError {
    /// The string was not `AMOUNT CURRENCY` with a decimal amount.
    #[error("invalid price format: {0}")]
    InvalidPrice(String),

    /// The currency code is not the store currency.
    #[error("unsupported currency: {0}")]
    UnsupportedCurrency(String),
}

/// Wrap minor units in the store currency.
pub fn inr(minor: i64) -> Money<'static, Currency> {
    Money::from_minor(minor, CURRENCY)
}

/// Price of `quantity` units at `unit_price` minor units, or `None` on overflow.
pub fn line_total(unit_price: i64, quantity: u32) -> Option<i64> {
    unit_price.checked_mul(i64::from(quantity))
}

/// Parse a price string such as `"40.00 INR"` into minor units.
///
/// # Errors
///
/// Returns a [`PriceParseError`] if the string is not `AMOUNT INR` or the amount does
/// not fit in minor units.
pub fn parse_price(s: &str) -> Result<i64, PriceParseError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(PriceParseError::InvalidPrice(s.to_string()));
    };

    if !code.eq_ignore_ascii_case(CURRENCY.iso_alpha_code) {
        return Err(PriceParseError::UnsupportedCurrency(code.to_string()));
    }

    amount
        .parse::<Decimal>()
        .ok()
        .and_then(|value| value.checked_mul(Decimal::ONE_HUNDRED))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| PriceParseError::InvalidPrice(s.to_string()))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_amount_into_paise() -> TestResult {
        assert_eq!(parse_price("40 INR")?, 40_00);
        assert_eq!(parse_price("1200.50 inr")?, 1200_50);

        Ok(())
    }

    #[test]
    fn rejects_other_currencies() {
        assert_eq!(
            parse_price("1.00 GBP"),
            Err(PriceParseError::UnsupportedCurrency("GBP".to_string()))
        );
    }

    #[test]
    fn rejects_malformed_prices() {
        for input in ["", "40", "forty INR", "40 INR extra"] {
            assert!(
                matches!(parse_price(input), Err(PriceParseError::InvalidPrice(_))),
                "{input:?} should not parse"
            );
        }
    }

    #[test]
    fn line_total_detects_overflow() {
        assert_eq!(line_total(40_00, 3), Some(120_00));
        assert_eq!(line_total(i64::MAX, 2), None);
    }
}
