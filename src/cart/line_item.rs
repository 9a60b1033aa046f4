//! Cart line items

use jiff::civil::Date;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};

use crate::{
    cart::CartError,
    catalog::{FarmerId, ItemId, Product},
    money::{inr, line_total},
};

/// The two kinds of cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// A catalog product, merged by id.
    Regular,

    /// A standalone bulk order, never merged.
    Bulk,
}

/// How often a bulk order is delivered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryFrequency {
    /// Delivered once
    #[default]
    OneTime,

    /// Delivered every week
    Weekly,

    /// Delivered every month
    Monthly,
}

/// Fulfilment state of a bulk order line. Lines only exist as `Pending` while in the cart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkStatus {
    /// Awaiting checkout
    #[default]
    Pending,
}

/// A catalog product with a quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductLine {
    /// Product copied from the catalog
    pub product: Product,

    /// Units ordered, at least 1
    pub quantity: u32,
}

/// A bulk order placed with a farmer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkOrderLine {
    /// Synthetic time-based id
    pub id: ItemId,

    /// Supplying farmer
    pub farmer_id: FarmerId,

    /// Farmer's name
    pub farmer_name: String,

    /// Farm name
    pub farmer_title: String,

    /// Product name
    pub product: String,

    /// Units ordered
    pub quantity: u32,

    /// Unit of sale
    pub unit: String,

    /// Price per unit in minor units
    pub price: i64,

    /// `price * quantity` in minor units
    pub total: i64,

    /// Requested first delivery
    pub delivery_date: Date,

    /// Repeat schedule
    pub delivery_frequency: DeliveryFrequency,

    /// Free-text instructions
    #[serde(default)]
    pub special_instructions: String,

    /// Line status
    #[serde(default)]
    pub status: BulkStatus,
}

/// One entry in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CartLineItem {
    /// A catalog product, at most one line per product id.
    Regular(ProductLine),

    /// A catalog product ordered in bulk from the product listing.
    BulkProduct(ProductLine),

    /// A bulk order placed with a farmer.
    BulkOrder(BulkOrderLine),
}

impl CartLineItem {
    /// Line identity.
    pub fn id(&self) -> ItemId {
        match self {
            Self::Regular(line) | Self::BulkProduct(line) => line.product.id,
            Self::BulkOrder(line) => line.id,
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        match self {
            Self::Regular(line) | Self::BulkProduct(line) => &line.product.name,
            Self::BulkOrder(line) => &line.product,
        }
    }

    /// Whether this is a regular or a bulk line.
    pub fn kind(&self) -> LineKind {
        match self {
            Self::Regular(_) => LineKind::Regular,
            Self::BulkProduct(_) | Self::BulkOrder(_) => LineKind::Bulk,
        }
    }

    /// Units ordered.
    pub fn quantity(&self) -> u32 {
        match self {
            Self::Regular(line) | Self::BulkProduct(line) => line.quantity,
            Self::BulkOrder(line) => line.quantity,
        }
    }

    /// Price per unit in minor units.
    pub fn unit_price(&self) -> i64 {
        match self {
            Self::Regular(line) | Self::BulkProduct(line) => line.product.price,
            Self::BulkOrder(line) => line.price,
        }
    }

    /// Image URL, if the line came from a catalog product.
    pub fn image(&self) -> Option<&str> {
        match self {
            Self::Regular(line) | Self::BulkProduct(line) => line.product.image.as_deref(),
            Self::BulkOrder(_) => None,
        }
    }

    /// Unit price times quantity in minor units, or `None` on overflow.
    pub fn line_total(&self) -> Option<i64> {
        line_total(self.unit_price(), self.quantity())
    }

    /// Unit price times quantity as money, or `None` on overflow.
    pub fn total_price(&self) -> Option<Money<'static, Currency>> {
        self.line_total().map(inr)
    }

    /// Replace the quantity. Bulk order totals follow the new quantity.
    ///
    /// Fails with [`CartError::Overflow`], leaving the line unchanged, if the bulk order
    /// total does not fit in minor units.
    pub(crate) fn set_quantity(&mut self, quantity: u32) -> Result<(), CartError> {
        match self {
            Self::Regular(line) | Self::BulkProduct(line) => line.quantity = quantity,
            Self::BulkOrder(line) => {
                line.total = line_total(line.price, quantity).ok_or(CartError::Overflow)?;
                line.quantity = quantity;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn tomatoes() -> Product {
        Product {
            id: ItemId(1),
            name: "Fresh Tomatoes".to_string(),
            price: 48_00,
            image: Some("tomatoes.jpg".to_string()),
            category: Some("Vegetables".to_string()),
            tags: Vec::new(),
        }
    }

    fn greens_order() -> BulkOrderLine {
        BulkOrderLine {
            id: ItemId(1_700_000_000_000),
            farmer_id: FarmerId(1),
            farmer_name: "Ramesh Kumar".to_string(),
            farmer_title: "Ramesh's Organic Farm".to_string(),
            product: "Premium Leafy Greens".to_string(),
            quantity: 50,
            unit: "kg".to_string(),
            price: 60_00,
            total: 3_000_00,
            delivery_date: jiff::civil::date(2025, 1, 10),
            delivery_frequency: DeliveryFrequency::Weekly,
            special_instructions: String::new(),
            status: BulkStatus::Pending,
        }
    }

    #[test]
    fn kinds_collapse_bulk_variants() {
        let regular = CartLineItem::Regular(ProductLine {
            product: tomatoes(),
            quantity: 1,
        });
        let bulk_product = CartLineItem::BulkProduct(ProductLine {
            product: tomatoes(),
            quantity: 20,
        });
        let bulk_order = CartLineItem::BulkOrder(greens_order());

        assert_eq!(regular.kind(), LineKind::Regular);
        assert_eq!(bulk_product.kind(), LineKind::Bulk);
        assert_eq!(bulk_order.kind(), LineKind::Bulk);
    }

    #[test]
    fn bulk_order_total_follows_quantity() -> TestResult {
        let mut line = CartLineItem::BulkOrder(greens_order());

        line.set_quantity(100)?;

        let CartLineItem::BulkOrder(order) = &line else {
            panic!("variant changed");
        };

        assert_eq!(order.total, 6_000_00);
        assert_eq!(line.line_total(), Some(6_000_00));
        assert_eq!(line.total_price(), Some(inr(6_000_00)));

        Ok(())
    }

    #[test]
    fn overflowing_bulk_total_is_rejected() {
        let mut order = greens_order();
        order.price = i64::MAX / 2;
        let mut line = CartLineItem::BulkOrder(order);
        let before = line.clone();

        assert_eq!(line.set_quantity(3), Err(CartError::Overflow));
        assert_eq!(line, before);
        assert_eq!(line.total_price(), None);
    }

    #[test]
    fn serialized_lines_carry_kind_tag() -> TestResult {
        let line = CartLineItem::BulkOrder(greens_order());

        let json = serde_json::to_value(&line)?;

        assert_eq!(json["kind"], "bulk_order");
        assert_eq!(json["delivery_frequency"], "weekly");
        assert_eq!(json["delivery_date"], "2025-01-10");
        assert_eq!(json["status"], "pending");

        let parsed: CartLineItem = serde_json::from_value(json)?;

        assert_eq!(parsed, line);

        Ok(())
    }
}
