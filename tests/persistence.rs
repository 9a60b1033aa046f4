//! Cart and order history persisted through the directory-backed store.

use std::fs;

use testresult::TestResult;

use smartsupply::prelude::*;

#[test]
fn cart_and_orders_survive_a_restart() -> TestResult {
    let dir = tempfile::tempdir()?;
    let catalog = Catalog::sample()?;
    let paneer = catalog.product(ItemId(6)).ok_or("missing paneer")?.clone();

    {
        let mut cart = CartService::load(FileStore::new(dir.path()));
        cart.add_to_cart(paneer.clone())?;
        cart.add_to_cart(paneer)?;
    }

    assert!(dir.path().join("shoppingCart.json").is_file());

    let mut cart = CartService::load(FileStore::new(dir.path()));
    let mut orders = OrderService::load(FileStore::new(dir.path()));

    assert_eq!(cart.total_items(), 2);
    assert_eq!(cart.total_price()?, inr(760_00));

    let mut form = CheckoutForm {
        shipping: ShippingOption::Express,
        payment_method: PaymentMethod::Upi,
        ..CheckoutForm::new()
    };
    let receipt = checkout(&mut cart, &mut orders, &mut form)?;

    let orders = OrderService::load(FileStore::new(dir.path()));
    let order = orders.get(receipt.order_id).ok_or("order not persisted")?;

    assert_eq!(order.total, 840_00);
    assert_eq!(order.payment_method, PaymentMethod::Upi);
    assert_eq!(order.shipping_address, ShippingAddress::default());
    assert!(CartService::load(FileStore::new(dir.path())).is_empty());

    Ok(())
}

#[test]
fn corrupted_state_loads_as_empty_and_is_overwritten() -> TestResult {
    let dir = tempfile::tempdir()?;

    fs::write(dir.path().join("shoppingCart.json"), "{not json")?;
    fs::write(dir.path().join("orderHistory.json"), "[1, 2, 3]")?;

    let mut cart = CartService::load(FileStore::new(dir.path()));
    let orders = OrderService::load(FileStore::new(dir.path()));

    assert!(cart.is_empty());
    assert!(orders.orders().is_empty());

    cart.add_to_cart(Catalog::sample()?.products().first().ok_or("empty")?.clone())?;

    let reloaded = CartService::load(FileStore::new(dir.path()));

    assert_eq!(reloaded.lines(), cart.lines());

    Ok(())
}
