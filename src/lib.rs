//! `SmartSupply`
//!
//! Cart, pricing and order-history engine for the `SmartSupply` agricultural marketplace
//! storefront. State lives in memory and is mirrored to a local key-value store after
//! every mutation.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod clock;
pub mod config;
pub mod delivery;
pub mod logging;
pub mod money;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod storage;
pub mod tables;
