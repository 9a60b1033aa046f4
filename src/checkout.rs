//! Checkout
//!
//! Turns the cart into an order: price it, record the order, then empty the cart.

use thiserror::Error;
use tracing::info;

use crate::{
    cart::{CartError, CartService},
    clock::Clock,
    orders::{
        DiscountApplied, OrderId, OrderItem, OrderService, OrderSnapshot, PaymentMethod,
        ShippingAddress,
    },
    pricing::{self, CouponEntry, PriceBreakdown, PricingError, ShippingOption},
    storage::KeyValueStore,
};

/// Errors that stop a checkout. Nothing has been written when one is returned.
#[derive(Debug, Error, PartialEq)]
pub enum CheckoutError {
    /// There is nothing to buy.
    #[error("cart is empty")]
    EmptyCart,

    /// The cart total could not be computed.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The order could not be priced.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Checkout form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    /// Delivery speed
    pub shipping: ShippingOption,

    /// Coupon field
    pub coupon: CouponEntry,

    /// Free-text notes for the order
    pub notes: String,

    /// Payment choice
    pub payment_method: PaymentMethod,

    /// Delivery address
    pub address: ShippingAddress,
}

impl CheckoutForm {
    /// A blank form with standard shipping, card payment and the placeholder address.
    pub fn new() -> Self {
        Self::default()
    }

    /// Price the current cart with this form's shipping option and coupon.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] if the cart total or the breakdown cannot be computed.
    pub fn summary<S: KeyValueStore, C: Clock>(
        &self,
        cart: &CartService<S, C>,
    ) -> Result<PriceBreakdown, CheckoutError> {
        let subtotal = cart.total_price()?;

        Ok(pricing::calculate(
            subtotal,
            self.shipping,
            self.coupon.applied(),
        )?)
    }
}

/// Result of a successful checkout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckoutReceipt {
    /// The order that was placed
    pub order_id: OrderId,

    /// What was charged
    pub breakdown: PriceBreakdown,
}

/// Place an order for everything in the cart.
///
/// On success the order is at the front of `orders`, the cart is empty, and the form's
/// coupon and notes are reset. Shipping, payment and address choices are kept.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] for an empty cart, or another [`CheckoutError`]
/// if pricing fails. Neither the cart nor the order history is touched on error.
#[tracing::instrument(skip_all, fields(lines = cart.lines().len()))]
pub fn checkout<CS, CC, OS, OC>(
    cart: &mut CartService<CS, CC>,
    orders: &mut OrderService<OS, OC>,
    form: &mut CheckoutForm,
) -> Result<CheckoutReceipt, CheckoutError>
where
    CS: KeyValueStore,
    CC: Clock,
    OS: KeyValueStore,
    OC: Clock,
{
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let breakdown = form.summary(cart)?;

    let discount = breakdown.discount().to_minor_units();
    let discount_applied = form
        .coupon
        .applied()
        .filter(|_| discount > 0)
        .map(|coupon| DiscountApplied {
            code: coupon.code.to_string(),
            amount: discount,
        });

    let snapshot = OrderSnapshot {
        items: cart.lines().iter().map(OrderItem::from).collect(),
        subtotal: breakdown.subtotal().to_minor_units(),
        shipping_cost: breakdown.shipping().to_minor_units(),
        total: breakdown.total().to_minor_units(),
        discount_applied,
        shipping_method: form.shipping,
        payment_method: form.payment_method,
        order_notes: form.notes.clone(),
        shipping_address: form.address.clone(),
    };

    let order_id = orders.add_order(snapshot).id;

    cart.clear_cart();
    form.coupon.reset();
    form.notes.clear();

    info!(%order_id, total = %breakdown.total(), "checked out");

    Ok(CheckoutReceipt {
        order_id,
        breakdown,
    })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::{
        cart::{LineKind, bulk_product},
        catalog::{ItemId, Product},
        clock::FixedClock,
        money::inr,
        orders::OrderStatus,
        storage::MemoryStore,
    };

    fn product(id: u64, name: &str, price: i64) -> Product {
        Product {
            id: ItemId(id),
            name: name.to_string(),
            price,
            image: Some(format!("{id}.jpg")),
            category: None,
            tags: Vec::new(),
        }
    }

    fn services() -> TestResult<(
        CartService<MemoryStore, FixedClock>,
        OrderService<MemoryStore, FixedClock>,
    )> {
        let clock = FixedClock::new("2025-01-10T09:00:00Z".parse()?);
        let store = MemoryStore::new();

        Ok((
            CartService::with_clock(store.clone(), clock.clone()),
            OrderService::with_clock(store, clock),
        ))
    }

    #[test]
    fn empty_cart_is_refused() -> TestResult {
        let (mut cart, mut orders) = services()?;
        let mut form = CheckoutForm::new();

        assert_eq!(
            checkout(&mut cart, &mut orders, &mut form),
            Err(CheckoutError::EmptyCart)
        );
        assert!(orders.orders().is_empty());

        Ok(())
    }

    #[test]
    fn checkout_records_order_and_clears_cart() -> TestResult {
        let (mut cart, mut orders) = services()?;
        let mut form = CheckoutForm::new();

        cart.add_to_cart(product(1, "Fresh Tomatoes", 48_00))?;
        cart.add_to_cart(product(1, "Fresh Tomatoes", 48_00))?;
        cart.add_to_cart(bulk_product(product(4, "Basmati Rice", 120_00), 2)?)?;
        form.coupon.apply("FRESH10")?;
        form.notes = "Leave at the door".to_string();

        let receipt = checkout(&mut cart, &mut orders, &mut form)?;

        assert!(cart.is_empty());
        assert_eq!(receipt.breakdown.subtotal(), inr(336_00));
        assert_eq!(receipt.breakdown.shipping(), inr(40_00));
        assert_eq!(receipt.breakdown.discount(), inr(33_60));
        assert_eq!(receipt.breakdown.total(), inr(342_40));

        let order = orders.get(receipt.order_id).ok_or("order not recorded")?;

        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.total, 342_40);
        assert_eq!(order.order_notes, "Leave at the door");
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items.iter().map(|i| i.kind).collect::<Vec<_>>(), vec![
            LineKind::Regular,
            LineKind::Bulk
        ]);
        assert_eq!(
            order.discount_applied,
            Some(DiscountApplied {
                code: "FRESH10".to_string(),
                amount: 33_60
            })
        );

        assert_eq!(form.coupon.applied(), None);
        assert!(form.notes.is_empty());

        Ok(())
    }

    #[test]
    fn free_shipping_coupon_is_not_recorded_as_discount() -> TestResult {
        let (mut cart, mut orders) = services()?;
        let mut form = CheckoutForm {
            shipping: ShippingOption::Express,
            ..CheckoutForm::new()
        };

        cart.add_to_cart(product(6, "Paneer", 380_00))?;
        form.coupon.apply("FREESHIP")?;

        let receipt = checkout(&mut cart, &mut orders, &mut form)?;
        let order = orders.get(receipt.order_id).ok_or("order not recorded")?;

        assert_eq!(order.shipping_cost, 0);
        assert_eq!(order.total, 380_00);
        assert_eq!(order.discount_applied, None);
        assert_eq!(order.shipping_method, ShippingOption::Express);
        assert_eq!(form.shipping, ShippingOption::Express);

        Ok(())
    }

    #[test]
    fn overflowing_cart_leaves_everything_untouched() -> TestResult {
        let (mut cart, mut orders) = services()?;
        let mut form = CheckoutForm::new();

        cart.add_to_cart(bulk_product(product(1, "Gold", i64::MAX / 2), 3)?)?;
        form.coupon.apply("FLAT50")?;

        let result = checkout(&mut cart, &mut orders, &mut form);

        assert_eq!(result, Err(CheckoutError::Cart(CartError::Overflow)));
        assert_eq!(cart.lines().len(), 1);
        assert!(orders.orders().is_empty());
        assert!(form.coupon.applied().is_some());

        Ok(())
    }
}
