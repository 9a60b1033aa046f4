//! Pricing
//!
//! Stateless derivation of shipping, discount and final total from a cart subtotal, the
//! chosen shipping option and an optional coupon.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::money::{CURRENCY, inr};

pub mod coupons;
pub mod shipping;

pub use coupons::{COUPONS, Coupon, CouponEntry, CouponError, CouponKind, CouponStatus, find_coupon};
pub use shipping::ShippingOption;

/// Errors specific to pricing calculations.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// The subtotal is not in the store currency.
    #[error("subtotal must be in INR, got {0}")]
    Currency(&'static str),

    /// The subtotal is negative.
    #[error("subtotal cannot be negative")]
    NegativeSubtotal,

    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// An amount overflowed minor units.
    #[error("amount overflowed")]
    Overflow,
}

/// Amounts shown in the order summary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBreakdown {
    subtotal: Money<'static, Currency>,
    shipping: Money<'static, Currency>,
    discount: Money<'static, Currency>,
    total: Money<'static, Currency>,
}

impl PriceBreakdown {
    /// Cart value before shipping and discounts
    pub fn subtotal(&self) -> Money<'static, Currency> {
        self.subtotal
    }

    /// Shipping charge
    pub fn shipping(&self) -> Money<'static, Currency> {
        self.shipping
    }

    /// Coupon discount. May exceed subtotal plus shipping for fixed coupons.
    pub fn discount(&self) -> Money<'static, Currency> {
        self.discount
    }

    /// Amount payable, never below zero
    pub fn total(&self) -> Money<'static, Currency> {
        self.total
    }
}

/// Price a checkout.
///
/// # Errors
///
/// Returns a [`PricingError`] if the subtotal is negative or in another currency, or if
/// any amount overflows.
pub fn calculate(
    subtotal: Money<'_, Currency>,
    shipping: ShippingOption,
    coupon: Option<Coupon>,
) -> Result<PriceBreakdown, PricingError> {
    if subtotal.currency() != CURRENCY {
        return Err(PricingError::Currency(subtotal.currency().iso_alpha_code));
    }

    let subtotal = subtotal.to_minor_units();

    if subtotal < 0 {
        return Err(PricingError::NegativeSubtotal);
    }

    let shipping_cost = shipping_cost(subtotal, shipping, coupon);
    let discount = discount_amount(subtotal, coupon)?;

    let total = subtotal
        .checked_add(shipping_cost)
        .and_then(|gross| gross.checked_sub(discount))
        .ok_or(PricingError::Overflow)?
        .max(0);

    Ok(PriceBreakdown {
        subtotal: inr(subtotal),
        shipping: inr(shipping_cost),
        discount: inr(discount),
        total: inr(total),
    })
}

/// Shipping charge in minor units. A free-shipping coupon overrides every option.
pub fn shipping_cost(subtotal: i64, shipping: ShippingOption, coupon: Option<Coupon>) -> i64 {
    match coupon {
        Some(Coupon {
            kind: CouponKind::FreeShipping,
            ..
        }) => 0,
        _ => shipping.cost(subtotal),
    }
}

/// Coupon discount in minor units.
///
/// # Errors
///
/// Returns [`PricingError::PercentConversion`] if a percentage discount cannot be
/// represented in minor units.
pub fn discount_amount(subtotal: i64, coupon: Option<Coupon>) -> Result<i64, PricingError> {
    let Some(coupon) = coupon else {
        return Ok(0);
    };

    match coupon.kind {
        CouponKind::Percentage(points) => {
            let percent = Percentage::from(Decimal::from(points) / Decimal::ONE_HUNDRED);

            percent_of_minor(&percent, subtotal)
        }
        CouponKind::Fixed(amount) => Ok(amount),
        CouponKind::FreeShipping => Ok(0),
    }
}

/// Calculate a percentage of a minor unit amount, rounding half away from zero.
fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, PricingError> {
    let minor = Decimal::from_i64(minor).ok_or(PricingError::PercentConversion)?;

    ((*percent) * Decimal::ONE) // decimal_percentage does not expose the underlying Decimal
        .checked_mul(minor)
        .ok_or(PricingError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(PricingError::PercentConversion)
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use testresult::TestResult;

    use super::*;

    fn coupon(code: &str) -> TestResult<Coupon> {
        Ok(find_coupon(code).ok_or("unknown coupon")?)
    }

    #[test]
    fn standard_shipping_free_above_threshold() -> TestResult {
        let breakdown = calculate(inr(600_00), ShippingOption::Standard, None)?;

        assert_eq!(breakdown.shipping(), inr(0));
        assert_eq!(breakdown.total(), inr(600_00));

        Ok(())
    }

    #[test]
    fn standard_shipping_charged_below_threshold() -> TestResult {
        let breakdown = calculate(inr(300_00), ShippingOption::Standard, None)?;

        assert_eq!(breakdown.shipping(), inr(40_00));
        assert_eq!(breakdown.total(), inr(340_00));

        Ok(())
    }

    #[test]
    fn express_shipping_is_flat() -> TestResult {
        let breakdown = calculate(inr(300_00), ShippingOption::Express, None)?;

        assert_eq!(breakdown.shipping(), inr(80_00));
        assert_eq!(breakdown.total(), inr(380_00));

        Ok(())
    }

    #[test]
    fn percentage_coupon_discounts_subtotal() -> TestResult {
        let breakdown = calculate(
            inr(300_00),
            ShippingOption::Standard,
            Some(coupon("FRESH10")?),
        )?;

        assert_eq!(breakdown.discount(), inr(30_00));
        assert_eq!(breakdown.total(), inr(310_00));

        Ok(())
    }

    #[test]
    fn percentage_coupon_rounds_to_nearest_paisa() -> TestResult {
        assert_eq!(discount_amount(99_95, Some(coupon("FRESH10")?))?, 10_00);
        assert_eq!(discount_amount(99_94, Some(coupon("FRESH10")?))?, 9_99);

        Ok(())
    }

    #[test]
    fn fixed_coupon_subtracts_flat_amount() -> TestResult {
        let breakdown = calculate(
            inr(300_00),
            ShippingOption::Standard,
            Some(coupon("FLAT50")?),
        )?;

        assert_eq!(breakdown.discount(), inr(50_00));
        assert_eq!(breakdown.total(), inr(290_00));

        Ok(())
    }

    #[test]
    fn free_shipping_coupon_overrides_express() -> TestResult {
        let breakdown = calculate(
            inr(300_00),
            ShippingOption::Express,
            Some(coupon("FREESHIP")?),
        )?;

        assert_eq!(breakdown.shipping(), inr(0));
        assert_eq!(breakdown.discount(), inr(0));
        assert_eq!(breakdown.total(), inr(300_00));

        Ok(())
    }

    #[test]
    fn total_is_floored_at_zero() -> TestResult {
        let breakdown = calculate(
            inr(10_00),
            ShippingOption::Standard,
            Some(coupon("FLAT50")?),
        )?;

        assert_eq!(breakdown.shipping(), inr(40_00));
        assert_eq!(breakdown.discount(), inr(50_00));
        assert_eq!(breakdown.total(), inr(0));

        let breakdown = calculate(inr(5_00), ShippingOption::Standard, Some(coupon("FLAT50")?))?;

        assert_eq!(breakdown.total(), inr(0));

        Ok(())
    }

    #[test]
    fn empty_cart_costs_nothing() -> TestResult {
        let breakdown = calculate(inr(0), ShippingOption::Express, None)?;

        assert_eq!(breakdown.shipping(), inr(0));
        assert_eq!(breakdown.total(), inr(0));

        Ok(())
    }

    #[test]
    fn other_currency_is_rejected() {
        let result = calculate(
            Money::from_minor(100, iso::GBP),
            ShippingOption::Standard,
            None,
        );

        assert_eq!(result, Err(PricingError::Currency("GBP")));
    }

    #[test]
    fn negative_subtotal_is_rejected() {
        let result = calculate(inr(-1), ShippingOption::Standard, None);

        assert_eq!(result, Err(PricingError::NegativeSubtotal));
    }

    #[test]
    fn percent_of_minor_overflow_returns_error() {
        let percent = Percentage::from(2.0);

        assert_eq!(
            percent_of_minor(&percent, i64::MAX),
            Err(PricingError::PercentConversion)
        );
    }
}
