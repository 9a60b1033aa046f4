//! Terminal tables
//!
//! Renders catalog listings, the cart with its price summary, and the order history.

use std::io;

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::{CartLineItem, DeliveryFrequency, LineKind},
    catalog::{Farmer, Product},
    delivery::DeliveryDetails,
    money::inr,
    orders::Order,
    pricing::{CouponStatus, PriceBreakdown},
};

/// Errors writing a table.
#[derive(Debug, Error)]
pub enum TableError {
    /// The output could not be written.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Write the product listing.
///
/// # Errors
///
/// Returns [`TableError::Io`] if the output cannot be written.
pub fn write_products(mut out: impl io::Write, products: &[Product]) -> Result<(), TableError> {
    let mut builder = Builder::default();

    builder.push_record(["ID", "Product", "Category", "Price"]);

    for product in products {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            product.category.clone().unwrap_or_default(),
            product.unit_price().to_string(),
        ]);
    }

    write_table(&mut out, builder, 3..4)
}

/// Write each farmer with the products they sell in bulk.
///
/// # Errors
///
/// Returns [`TableError::Io`] if the output cannot be written.
pub fn write_farmers(mut out: impl io::Write, farmers: &[Farmer]) -> Result<(), TableError> {
    let mut builder = Builder::default();

    builder.push_record(["ID", "Farm", "Product", "Minimum", "Price"]);

    for farmer in farmers {
        for product in &farmer.products {
            builder.push_record([
                farmer.id.to_string(),
                format!("{} ({})", farmer.title, farmer.name),
                product.name.clone(),
                format!("{} {}", product.min_order, product.unit),
                format!("{} / {}", inr(product.price), product.unit),
            ]);
        }
    }

    write_table(&mut out, builder, 3..5)
}

/// Write the cart lines followed by the price summary.
///
/// # Errors
///
/// Returns [`TableError::Io`] if the output cannot be written.
pub fn write_cart(
    mut out: impl io::Write,
    lines: &[CartLineItem],
    breakdown: &PriceBreakdown,
    coupon: &CouponStatus,
) -> Result<(), TableError> {
    if lines.is_empty() {
        writeln!(out, "Your cart is empty.")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["ID", "Item", "Kind", "Qty", "Price", "Total"]);

    for line in lines {
        builder.push_record([
            line.id().to_string(),
            line_label(line),
            kind_label(line.kind()).to_string(),
            line.quantity().to_string(),
            inr(line.unit_price()).to_string(),
            line.total_price()
                .map_or_else(|| "overflow".to_string(), |total| total.to_string()),
        ]);
    }

    write_table(&mut out, builder, 3..6)?;

    let coupon = coupon.to_string();

    if !coupon.is_empty() {
        writeln!(out, "{coupon}")?;
    }

    write_summary(&mut out, breakdown)
}

/// Write the order history, newest first.
///
/// # Errors
///
/// Returns [`TableError::Io`] if the output cannot be written.
pub fn write_orders(mut out: impl io::Write, orders: &[Order]) -> Result<(), TableError> {
    if orders.is_empty() {
        writeln!(out, "No orders yet.")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Order", "Date", "Status", "Items", "Shipping", "Total"]);

    for order in orders {
        builder.push_record([
            order.id.to_string(),
            order.date.to_string(),
            order.status.to_string(),
            order.total_items().to_string(),
            order.shipping_method.to_string(),
            order.total_price().to_string(),
        ]);
    }

    write_table(&mut out, builder, 3..6)
}

/// Write one order's lines, charges and courier.
///
/// # Errors
///
/// Returns [`TableError::Io`] if the output cannot be written.
pub fn write_order(
    mut out: impl io::Write,
    order: &Order,
    delivery: &DeliveryDetails,
) -> Result<(), TableError> {
    writeln!(out, "{} placed {} ({})", order.id, order.date, order.status)?;

    let mut builder = Builder::default();

    builder.push_record(["Item", "Kind", "Qty", "Price"]);

    for item in &order.items {
        builder.push_record([
            item.name.clone(),
            kind_label(item.kind).to_string(),
            item.quantity.to_string(),
            inr(item.price).to_string(),
        ]);
    }

    write_table(&mut out, builder, 2..4)?;

    writeln!(out, " Subtotal: {}", inr(order.subtotal))?;
    writeln!(out, " Shipping: {} ({})", inr(order.shipping_cost), order.shipping_method)?;

    if let Some(discount) = &order.discount_applied {
        writeln!(out, " Discount: -{} ({})", inr(discount.amount), discount.code)?;
    }

    writeln!(out, " Total:    {}", order.total_price())?;
    writeln!(out, " Payment:  {}", order.payment_method)?;

    let address = &order.shipping_address;

    writeln!(
        out,
        " Ship to:  {}, {} {} ({})",
        address.name, address.address, address.pincode, address.phone
    )?;
    writeln!(out, " Courier:  {delivery}")?;

    if !order.order_notes.is_empty() {
        writeln!(out, " Notes:    {}", order.order_notes)?;
    }

    Ok(())
}

fn line_label(line: &CartLineItem) -> String {
    match line {
        CartLineItem::Regular(product) | CartLineItem::BulkProduct(product) => {
            product.product.name.clone()
        }
        CartLineItem::BulkOrder(order) => format!(
            "{} from {} ({} {}, {}, {})",
            order.product,
            order.farmer_title,
            order.quantity,
            order.unit,
            order.delivery_date,
            frequency_label(order.delivery_frequency),
        ),
    }
}

fn frequency_label(frequency: DeliveryFrequency) -> &'static str {
    match frequency {
        DeliveryFrequency::OneTime => "one-time",
        DeliveryFrequency::Weekly => "weekly",
        DeliveryFrequency::Monthly => "monthly",
    }
}

fn kind_label(kind: LineKind) -> &'static str {
    match kind {
        LineKind::Regular => "regular",
        LineKind::Bulk => "bulk",
    }
}

fn write_summary(out: &mut impl io::Write, breakdown: &PriceBreakdown) -> Result<(), TableError> {
    writeln!(out, " Subtotal: {}", breakdown.subtotal())?;
    writeln!(out, " Shipping: {}", breakdown.shipping())?;

    if breakdown.discount().is_positive() {
        writeln!(out, " Discount: -{}", breakdown.discount())?;
    }

    writeln!(out, " \x1b[1mTotal:    {}\x1b[0m", breakdown.total())?;

    Ok(())
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    right_aligned: std::ops::Range<usize>,
) -> Result<(), TableError> {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(right_aligned), Alignment::right());

    writeln!(out, "{table}")?;

    Ok(())
}
