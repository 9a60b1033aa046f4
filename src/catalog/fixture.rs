//! Catalog YAML fixture

use serde::Deserialize;

use crate::{
    catalog::{Catalog, CatalogError, Farmer, FarmerId, FarmerProduct, ItemId, Product},
    money::parse_price,
};

/// Catalog file layout
#[derive(Debug, Deserialize)]
pub(super) struct CatalogFixture {
    #[serde(default)]
    products: Vec<ProductFixture>,

    #[serde(default)]
    farmers: Vec<FarmerFixture>,
}

/// Product entry (price as e.g. `"40.00 INR"`)
#[derive(Debug, Deserialize)]
struct ProductFixture {
    id: u64,
    name: String,
    price: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct FarmerFixture {
    id: u32,
    name: String,
    title: String,
    #[serde(default)]
    products: Vec<FarmerProductFixture>,
}

#[derive(Debug, Deserialize)]
struct FarmerProductFixture {
    name: String,
    min_order: u32,
    price: String,
    unit: String,
    #[serde(default)]
    description: String,
}

fn price_of(name: &str, price: &str) -> Result<i64, CatalogError> {
    parse_price(price).map_err(|source| CatalogError::Price {
        name: name.to_string(),
        source,
    })
}

impl TryFrom<ProductFixture> for Product {
    type Error = CatalogError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let price = price_of(&fixture.name, &fixture.price)?;

        Ok(Product {
            id: ItemId(fixture.id),
            name: fixture.name,
            price,
            image: fixture.image,
            category: fixture.category,
            tags: fixture.tags,
        })
    }
}

impl TryFrom<FarmerProductFixture> for FarmerProduct {
    type Error = CatalogError;

    fn try_from(fixture: FarmerProductFixture) -> Result<Self, Self::Error> {
        if fixture.min_order == 0 {
            return Err(CatalogError::ZeroMinimumOrder(fixture.name));
        }

        let price = price_of(&fixture.name, &fixture.price)?;

        Ok(FarmerProduct {
            name: fixture.name,
            min_order: fixture.min_order,
            price,
            unit: fixture.unit,
            description: fixture.description,
        })
    }
}

impl TryFrom<FarmerFixture> for Farmer {
    type Error = CatalogError;

    fn try_from(fixture: FarmerFixture) -> Result<Self, Self::Error> {
        let products = fixture
            .products
            .into_iter()
            .map(FarmerProduct::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Farmer {
            id: FarmerId(fixture.id),
            name: fixture.name,
            title: fixture.title,
            products,
        })
    }
}

impl TryFrom<CatalogFixture> for Catalog {
    type Error = CatalogError;

    fn try_from(fixture: CatalogFixture) -> Result<Self, Self::Error> {
        let products = fixture
            .products
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let farmers = fixture
            .farmers
            .into_iter()
            .map(Farmer::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Catalog::new(products, farmers)
    }
}
