//! Orders
//!
//! The order history: placed orders, newest first, persisted after every change.

use thiserror::Error;

pub mod models;
pub mod service;

pub use models::{
    DiscountApplied, Order, OrderId, OrderItem, OrderSnapshot, OrderStatus, PaymentMethod,
    ShippingAddress,
};
pub use service::OrderService;

/// Errors from order operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    /// No order has the given id.
    #[error("order {0} not found")]
    NotFound(OrderId),

    /// The order has already left the processing state.
    #[error("order {id} is {status}, not processing")]
    NotProcessing {
        /// Order
        id: OrderId,
        /// Its current status
        status: OrderStatus,
    },

    /// An order id string could not be parsed.
    #[error("invalid order id: {0:?}")]
    InvalidId(String),
}
