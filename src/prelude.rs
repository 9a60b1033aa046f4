//! `SmartSupply` prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{
        BulkOrderDraft, BulkOrderError, BulkOrderRequest, CartAddition, CartError, CartLineItem,
        CartNotice, CartService, DeliveryFrequency, LineKind, bulk_product,
    },
    catalog::{Catalog, CatalogError, Farmer, FarmerId, FarmerProduct, ItemId, Product},
    checkout::{CheckoutError, CheckoutForm, CheckoutReceipt, checkout},
    clock::{Clock, FixedClock, SystemClock},
    delivery::{DeliveryDetails, DeliveryDetailsGenerator},
    money::inr,
    orders::{
        Order, OrderError, OrderId, OrderService, OrderSnapshot, OrderStatus, PaymentMethod,
        ShippingAddress,
    },
    pricing::{
        Coupon, CouponEntry, CouponError, CouponKind, PriceBreakdown, PricingError,
        ShippingOption, calculate,
    },
    storage::{FileStore, JsonStore, KeyValueStore, MemoryStore, StorageError},
};
