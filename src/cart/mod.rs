//! Cart

use std::fmt;

use thiserror::Error;

use crate::catalog::Product;

pub mod bulk;
pub mod line_item;
pub mod service;

pub use bulk::{BulkOrderDraft, BulkOrderError, BulkOrderRequest, bulk_product};
pub use line_item::{
    BulkOrderLine, BulkStatus, CartLineItem, DeliveryFrequency, LineKind, ProductLine,
};
pub use service::CartService;

/// Errors from cart operations.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// A bulk line with zero quantity was requested.
    #[error("cart lines must have a quantity of at least 1")]
    ZeroQuantity,

    /// A cart total does not fit in minor units.
    #[error("cart total overflowed")]
    Overflow,
}

/// Something to add to the cart.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAddition {
    /// A catalog product, merged with an existing line of the same id.
    Product(Product),

    /// A catalog product ordered in bulk; always a new line.
    BulkProduct {
        /// Product copied from the catalog
        product: Product,
        /// Units ordered
        quantity: u32,
    },

    /// A farmer bulk order; always a new line with a fresh id.
    BulkOrder(BulkOrderRequest),
}

impl From<Product> for CartAddition {
    fn from(product: Product) -> Self {
        Self::Product(product)
    }
}

impl From<BulkOrderRequest> for CartAddition {
    fn from(request: BulkOrderRequest) -> Self {
        Self::BulkOrder(request)
    }
}

/// User-facing confirmation of a cart change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartNotice {
    /// A new regular line was added.
    Added {
        /// Product name
        name: String,
    },

    /// An existing regular line gained one unit.
    QuantityIncreased {
        /// Product name
        name: String,
    },

    /// A bulk line was added.
    BulkAdded {
        /// Product name
        name: String,
        /// Units ordered
        quantity: u32,
    },

    /// A line was removed.
    Removed {
        /// Product name
        name: String,
    },

    /// Every line was removed.
    Cleared,
}

impl fmt::Display for CartNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added { name } => write!(f, "{name} added to cart!"),
            Self::QuantityIncreased { name } => write!(f, "Increased {name} quantity in cart!"),
            Self::BulkAdded { name, quantity } => write!(f, "Added {quantity} {name} to cart!"),
            Self::Removed { name } => write!(f, "{name} removed from cart"),
            Self::Cleared => f.write_str("Cart cleared!"),
        }
    }
}
