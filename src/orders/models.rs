//! Order records

use std::{fmt, str::FromStr};

use jiff::civil::Date;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};

use crate::{
    cart::{CartLineItem, LineKind},
    catalog::ItemId,
    money::inr,
    orders::OrderError,
    pricing::ShippingOption,
};

/// Order identity, derived from the creation time in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ORD{}", self.0)
    }
}

impl FromStr for OrderId {
    type Err = OrderError;

    /// Accepts `ORD1700000000000` or the bare number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim();
        let digits = digits.strip_prefix("ORD").unwrap_or(digits);

        digits
            .parse()
            .map(Self)
            .map_err(|error| OrderError::InvalidId(format!("{s}: {error}")))
    }
}

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Placed, awaiting delivery
    #[default]
    Processing,

    /// Receipt confirmed
    Delivered,

    /// Abandoned
    Cancelled,
}

impl OrderStatus {
    /// Whether the order can no longer change.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Processing => f.write_str("Processing"),
            Self::Delivered => f.write_str("Delivered"),
            Self::Cancelled => f.write_str("Cancelled"),
        }
    }
}

/// How the customer pays.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Credit or debit card
    #[default]
    Card,

    /// UPI transfer
    Upi,

    /// Cash on delivery
    Cod,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Card => f.write_str("card"),
            Self::Upi => f.write_str("upi"),
            Self::Cod => f.write_str("cod"),
        }
    }
}

/// Where an order ships.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    /// Recipient
    pub name: String,

    /// Street address
    pub address: String,

    /// Postal code
    pub pincode: String,

    /// Contact number
    pub phone: String,
}

impl Default for ShippingAddress {
    /// Placeholder used until an address form exists.
    fn default() -> Self {
        Self {
            name: "SmartSupply User".to_string(),
            address: "123 Default Lane, Checkout City".to_string(),
            pincode: "110011".to_string(),
            phone: "9999988888".to_string(),
        }
    }
}

/// A purchased line, copied out of the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Cart line identity
    pub id: ItemId,

    /// Display name
    pub name: String,

    /// Units bought
    pub quantity: u32,

    /// Unit price in minor units
    pub price: i64,

    /// Product image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Regular or bulk
    pub kind: LineKind,
}

impl From<&CartLineItem> for OrderItem {
    fn from(line: &CartLineItem) -> Self {
        Self {
            id: line.id(),
            name: line.name().to_string(),
            quantity: line.quantity(),
            price: line.unit_price(),
            image: line.image().map(str::to_string),
            kind: line.kind(),
        }
    }
}

/// Coupon recorded against an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountApplied {
    /// Coupon code
    pub code: String,

    /// Amount taken off, in minor units
    pub amount: i64,
}

/// Everything about an order known at checkout, before it is assigned an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSnapshot {
    /// Purchased lines
    pub items: Vec<OrderItem>,

    /// Sum of line totals in minor units
    pub subtotal: i64,

    /// Shipping charge in minor units
    pub shipping_cost: i64,

    /// Amount paid in minor units
    pub total: i64,

    /// Coupon, only when it reduced the price
    pub discount_applied: Option<DiscountApplied>,

    /// Delivery speed
    pub shipping_method: ShippingOption,

    /// Payment choice
    pub payment_method: PaymentMethod,

    /// Free-text notes
    pub order_notes: String,

    /// Delivery address
    pub shipping_address: ShippingAddress,
}

/// A placed order. Only `status` changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Identity
    pub id: OrderId,

    /// Day the order was placed, UTC
    pub date: Date,

    /// Lifecycle state
    pub status: OrderStatus,

    /// Purchased lines
    pub items: Vec<OrderItem>,

    /// Sum of line totals in minor units
    pub subtotal: i64,

    /// Shipping charge in minor units
    pub shipping_cost: i64,

    /// Amount paid in minor units
    pub total: i64,

    /// Coupon, only when it reduced the price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_applied: Option<DiscountApplied>,

    /// Delivery speed
    pub shipping_method: ShippingOption,

    /// Payment choice
    #[serde(default)]
    pub payment_method: PaymentMethod,

    /// Free-text notes
    #[serde(default)]
    pub order_notes: String,

    /// Delivery address
    #[serde(default)]
    pub shipping_address: ShippingAddress,
}

impl Order {
    pub(crate) fn from_snapshot(id: OrderId, date: Date, snapshot: OrderSnapshot) -> Self {
        let OrderSnapshot {
            items,
            subtotal,
            shipping_cost,
            total,
            discount_applied,
            shipping_method,
            payment_method,
            order_notes,
            shipping_address,
        } = snapshot;

        Self {
            id,
            date,
            status: OrderStatus::Processing,
            items,
            subtotal,
            shipping_cost,
            total,
            discount_applied,
            shipping_method,
            payment_method,
            order_notes,
            shipping_address,
        }
    }

    /// Amount paid.
    pub fn total_price(&self) -> Money<'static, Currency> {
        inr(self.total)
    }

    /// Units across all lines.
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}
