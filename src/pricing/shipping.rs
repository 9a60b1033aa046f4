//! Shipping

use std::fmt;

use serde::{Deserialize, Serialize};

/// Flat standard shipping charge in minor units.
pub const STANDARD_SHIPPING: i64 = 40_00;

/// Flat express shipping charge in minor units.
pub const EXPRESS_SHIPPING: i64 = 80_00;

/// Standard shipping is free for subtotals strictly above this, in minor units.
pub const FREE_STANDARD_SHIPPING_ABOVE: i64 = 500_00;

/// Delivery speed chosen at checkout.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum ShippingOption {
    /// 3-5 days, free above the threshold
    #[default]
    Standard,

    /// 1-2 days, flat charge
    Express,
}

impl ShippingOption {
    /// Charge for this option before coupons, in minor units.
    ///
    /// Nothing is charged for an empty cart.
    pub fn cost(self, subtotal: i64) -> i64 {
        if subtotal == 0 {
            return 0;
        }

        match self {
            Self::Express => EXPRESS_SHIPPING,
            Self::Standard if subtotal > FREE_STANDARD_SHIPPING_ABOVE => 0,
            Self::Standard => STANDARD_SHIPPING,
        }
    }
}

impl fmt::Display for ShippingOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => f.write_str("standard"),
            Self::Express => f.write_str("express"),
        }
    }
}
