//! Bulk orders
//!
//! A [`BulkOrderDraft`] holds the in-progress bulk order form for one farmer. Quantities
//! move in steps of the product's minimum order and never drop below it, and a draft
//! only becomes a [`BulkOrderRequest`] once a product and a delivery date are chosen.

use jiff::civil::Date;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    cart::{CartAddition, line_item::DeliveryFrequency},
    catalog::{Farmer, FarmerId, FarmerProduct, Product},
    money::inr,
};

/// Reasons a bulk order cannot be placed.
#[derive(Debug, Error, PartialEq)]
pub enum BulkOrderError {
    /// No farmer product has been chosen.
    #[error("select a product before placing a bulk order")]
    NoProductSelected,

    /// The farmer does not sell a product by that name.
    #[error("{farmer} does not sell {product}")]
    UnknownProduct {
        /// Farm name
        farmer: String,
        /// Requested product name
        product: String,
    },

    /// No delivery date has been chosen.
    #[error("a delivery date is required")]
    MissingDeliveryDate,

    /// The delivery date is before today.
    #[error("delivery date {date} is in the past (today is {today})")]
    DeliveryDateInPast {
        /// Requested date
        date: Date,
        /// Current date
        today: Date,
    },

    /// A bulk quantity of zero was requested.
    #[error("bulk quantity must be greater than zero")]
    InvalidQuantity,
}

/// A validated bulk order, ready to be added to the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkOrderRequest {
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

    /// Requested first delivery
    pub delivery_date: Date,

    /// Repeat schedule
    pub delivery_frequency: DeliveryFrequency,

    /// Free-text instructions
    pub special_instructions: String,
}

/// In-progress bulk order form for one farmer.
#[derive(Debug, Clone)]
pub struct BulkOrderDraft<'a> {
    farmer: &'a Farmer,
    product: Option<&'a FarmerProduct>,
    quantity: u32,
    delivery_date: Option<Date>,
    frequency: DeliveryFrequency,
    special_instructions: String,
}

impl<'a> BulkOrderDraft<'a> {
    /// Start an empty draft for `farmer`.
    pub fn new(farmer: &'a Farmer) -> Self {
        Self {
            farmer,
            product: None,
            quantity: 0,
            delivery_date: None,
            frequency: DeliveryFrequency::OneTime,
            special_instructions: String::new(),
        }
    }

    /// Choose a product by name, resetting the quantity to its minimum order.
    ///
    /// # Errors
    ///
    /// Returns [`BulkOrderError::UnknownProduct`] if the farmer has no such product.
    pub fn select_product(&mut self, name: &str) -> Result<(), BulkOrderError> {
        let product = self
            .farmer
            .products
            .iter()
            .find(|product| product.name == name)
            .ok_or_else(|| BulkOrderError::UnknownProduct {
                farmer: self.farmer.title.clone(),
                product: name.to_string(),
            })?;

        self.product = Some(product);
        self.quantity = product.min_order;

        Ok(())
    }

    /// Add one minimum-order step.
    pub fn increase(&mut self) {
        if let Some(product) = self.product {
            self.quantity = self.quantity.saturating_add(product.min_order);
        }
    }

    /// Remove one minimum-order step, stopping at the minimum order.
    pub fn decrease(&mut self) {
        if let Some(product) = self.product {
            self.quantity = self
                .quantity
                .saturating_sub(product.min_order)
                .max(product.min_order);
        }
    }

    /// Set the first delivery date.
    pub fn set_delivery_date(&mut self, date: Date) {
        self.delivery_date = Some(date);
    }

    /// Set the repeat schedule.
    pub fn set_frequency(&mut self, frequency: DeliveryFrequency) {
        self.frequency = frequency;
    }

    /// Set free-text instructions.
    pub fn set_special_instructions(&mut self, instructions: impl Into<String>) {
        self.special_instructions = instructions.into();
    }

    /// The selected product, if any.
    pub fn product(&self) -> Option<&'a FarmerProduct> {
        self.product
    }

    /// Current quantity; zero until a product is selected.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Quantity times unit price; zero until a product is selected.
    pub fn total(&self) -> Money<'static, Currency> {
        let price = self.product.map_or(0, |product| product.price);

        inr(price.saturating_mul(i64::from(self.quantity)))
    }

    /// Validate the draft against `today`.
    ///
    /// # Errors
    ///
    /// Returns a [`BulkOrderError`] if no product or delivery date is set, or if the
    /// delivery date is before `today`.
    pub fn build(&self, today: Date) -> Result<BulkOrderRequest, BulkOrderError> {
        let product = self.product.ok_or(BulkOrderError::NoProductSelected)?;
        let delivery_date = self
            .delivery_date
            .ok_or(BulkOrderError::MissingDeliveryDate)?;

        if delivery_date < today {
            return Err(BulkOrderError::DeliveryDateInPast {
                date: delivery_date,
                today,
            });
        }

        Ok(BulkOrderRequest {
            farmer_id: self.farmer.id,
            farmer_name: self.farmer.name.clone(),
            farmer_title: self.farmer.title.clone(),
            product: product.name.clone(),
            quantity: self.quantity,
            unit: product.unit.clone(),
            price: product.price,
            delivery_date,
            delivery_frequency: self.frequency,
            special_instructions: self.special_instructions.clone(),
        })
    }
}

/// Build the cart addition for a catalog product ordered in bulk from the listing.
///
/// # Errors
///
/// Returns [`BulkOrderError::InvalidQuantity`] if `quantity` is zero.
pub fn bulk_product(product: Product, quantity: u32) -> Result<CartAddition, BulkOrderError> {
    if quantity == 0 {
        return Err(BulkOrderError::InvalidQuantity);
    }

    Ok(CartAddition::BulkProduct { product, quantity })
}
