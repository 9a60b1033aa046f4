//! Catalog
//!
//! Static product and farmer reference data. The storefront never mutates it; the cart
//! copies products by value.

use std::{fmt, fs, path::Path, str::FromStr};

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::money::{PriceParseError, inr};

mod fixture;

/// Errors loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading the catalog file.
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("failed to parse catalog YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A product or farmer-product price did not parse.
    #[error("invalid price for {name}: {source}")]
    Price {
        /// Name of the offending product.
        name: String,
        /// Underlying parse error.
        source: PriceParseError,
    },

    /// Two products share one id.
    #[error("duplicate product id {0}")]
    DuplicateProduct(ItemId),

    /// Two farmers share one id.
    #[error("duplicate farmer id {0}")]
    DuplicateFarmer(FarmerId),

    /// A bulk product has a zero minimum order.
    #[error("bulk product {0} has a zero minimum order")]
    ZeroMinimumOrder(String),
}

/// Identity of a product or cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ItemId)
    }
}

/// Identity of a farmer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FarmerId(pub u32);

impl fmt::Display for FarmerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A product sold by the unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product id
    pub id: ItemId,

    /// Display name
    pub name: String,

    /// Unit price in minor units
    pub price: i64,

    /// Image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Category name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Free-form tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Product {
    /// Unit price as money.
    pub fn unit_price(&self) -> Money<'static, Currency> {
        inr(self.price)
    }
}

/// A product a farmer sells in bulk.
#[derive(Debug, Clone, PartialEq)]
pub struct FarmerProduct {
    /// Display name
    pub name: String,

    /// Smallest orderable quantity, also the quantity step
    pub min_order: u32,

    /// Price per unit in minor units
    pub price: i64,

    /// Unit of sale, e.g. `kg` or `L`
    pub unit: String,

    /// Short description
    pub description: String,
}

/// A farmer taking bulk orders.
#[derive(Debug, Clone, PartialEq)]
pub struct Farmer {
    /// Farmer id
    pub id: FarmerId,

    /// Contact name
    pub name: String,

    /// Farm name
    pub title: String,

    /// Products available in bulk
    pub products: Vec<FarmerProduct>,
}

/// Products and farmers.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    farmers: Vec<Farmer>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateProduct`] or [`CatalogError::DuplicateFarmer`].
    pub fn new(products: Vec<Product>, farmers: Vec<Farmer>) -> Result<Self, CatalogError> {
        for (i, product) in products.iter().enumerate() {
            if products.iter().skip(i + 1).any(|other| other.id == product.id) {
                return Err(CatalogError::DuplicateProduct(product.id));
            }
        }

        for (i, farmer) in farmers.iter().enumerate() {
            if farmers.iter().skip(i + 1).any(|other| other.id == farmer.id) {
                return Err(CatalogError::DuplicateFarmer(farmer.id));
            }
        }

        Ok(Self { products, farmers })
    }

    /// Parse a catalog from YAML.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the YAML or any price is invalid.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let fixture: fixture::CatalogFixture = serde_norway::from_str(yaml)?;

        fixture.try_into()
    }

    /// Read and parse a YAML catalog file.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        Self::from_yaml(&fs::read_to_string(path)?)
    }

    /// The sample catalog shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the bundled fixture is invalid.
    pub fn sample() -> Result<Self, CatalogError> {
        Self::from_yaml(include_str!("../../fixtures/catalog.yaml"))
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// All farmers in catalog order.
    pub fn farmers(&self) -> &[Farmer] {
        &self.farmers
    }

    /// Look up a product.
    pub fn product(&self, id: ItemId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Look up a farmer.
    pub fn farmer(&self, id: FarmerId) -> Option<&Farmer> {
        self.farmers.iter().find(|farmer| farmer.id == id)
    }
}
