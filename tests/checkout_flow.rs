//! End-to-end storefront flow against the sample catalog.
//!
//! A shopper adds regular and bulk items, orders in bulk from a farmer, applies a coupon,
//! checks out, and finally confirms receipt of the order.
//!
//! Expected amounts:
//!
//! - Fresh Tomatoes x2 at ₹48: ₹96
//! - Milk, bulk x10 at ₹60: ₹600
//! - Farmer bulk order at the product's minimum plus one step
//! - Standard shipping is free because the subtotal is above ₹500
//! - FLAT50 takes ₹50 off

use jiff::civil::date;
use testresult::TestResult;

use smartsupply::prelude::*;

#[test]
fn shopper_checks_out_and_confirms_receipt() -> TestResult {
    let catalog = Catalog::sample()?;
    let clock = FixedClock::new("2025-01-10T09:00:00Z".parse()?);
    let store = MemoryStore::new();

    let mut cart = CartService::with_clock(store.clone(), &clock);
    let mut orders = OrderService::with_clock(store.clone(), &clock);

    let tomatoes = catalog.product(ItemId(1)).ok_or("missing tomatoes")?.clone();
    let milk = catalog.product(ItemId(5)).ok_or("missing milk")?.clone();

    cart.add_to_cart(tomatoes.clone())?;
    cart.add_to_cart(tomatoes)?;
    cart.add_to_cart(bulk_product(milk, 10)?)?;

    let farmer = catalog.farmers().first().ok_or("no farmers")?;
    let mut draft = BulkOrderDraft::new(farmer);
    let farm_product = farmer.products.first().ok_or("farmer sells nothing")?;

    draft.select_product(&farm_product.name)?;
    draft.increase();
    draft.set_delivery_date(date(2025, 1, 20));
    draft.set_frequency(DeliveryFrequency::Weekly);

    let bulk_total = draft.total();
    cart.add_to_cart(draft.build(clock.today())?)?;

    assert_eq!(cart.lines().len(), 3);

    let expected_subtotal = 96_00 + 600_00 + bulk_total.to_minor_units();

    let mut form = CheckoutForm::new();
    form.coupon.apply("flat50")?;

    let receipt = checkout(&mut cart, &mut orders, &mut form)?;

    assert_eq!(receipt.breakdown.subtotal(), inr(expected_subtotal));
    assert_eq!(receipt.breakdown.shipping(), inr(0));
    assert_eq!(receipt.breakdown.total(), inr(expected_subtotal - 50_00));
    assert!(cart.is_empty());

    // Both engines share one store, as they share browser storage.
    let reloaded_cart = CartService::with_clock(store.clone(), &clock);
    assert!(reloaded_cart.is_empty());

    let order = orders.confirm_receipt(receipt.order_id)?;

    assert_eq!(order.status, OrderStatus::Delivered);
    assert_eq!(order.date, date(2025, 1, 10));
    assert_eq!(order.items.len(), 3);
    assert_eq!(
        order.discount_applied.as_ref().map(|d| (d.code.as_str(), d.amount)),
        Some(("FLAT50", 50_00))
    );

    let reloaded_orders = OrderService::with_clock(store, &clock);
    assert_eq!(reloaded_orders.orders(), orders.orders());

    Ok(())
}

#[test]
fn bulk_draft_needs_a_delivery_date_before_reaching_the_cart() -> TestResult {
    let catalog = Catalog::sample()?;
    let farmer = catalog.farmers().first().ok_or("no farmers")?;
    let product = farmer.products.first().ok_or("farmer sells nothing")?;
    let mut cart = CartService::load(MemoryStore::new());

    let mut draft = BulkOrderDraft::new(farmer);
    draft.select_product(&product.name)?;
    draft.decrease();

    assert_eq!(draft.quantity(), product.min_order);
    assert_eq!(
        draft.build(date(2025, 1, 10)),
        Err(BulkOrderError::MissingDeliveryDate)
    );
    assert!(cart.is_empty());

    draft.set_delivery_date(date(2025, 1, 10));
    cart.add_to_cart(draft.build(date(2025, 1, 10))?)?;

    assert_eq!(cart.total_items(), u64::from(product.min_order));

    Ok(())
}
