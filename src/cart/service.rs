//! Cart service.

use rusty_money::{Money, iso::Currency};
use tracing::{debug, info};

use crate::{
    cart::{
        CartAddition, CartError, CartNotice,
        line_item::{BulkOrderLine, BulkStatus, CartLineItem, ProductLine},
    },
    catalog::ItemId,
    clock::{Clock, MonotonicIds, SystemClock},
    money::{inr, line_total},
    storage::{JsonStore, KeyValueStore},
};

/// Owns the cart lines and mirrors them to storage after every change.
#[derive(Debug)]
pub struct CartService<S, C = SystemClock> {
    store: JsonStore<S>,
    clock: C,
    ids: MonotonicIds,
    lines: Vec<CartLineItem>,
}

impl<S: KeyValueStore> CartService<S> {
    /// Load the cart from `store` using the wall clock for bulk line ids.
    pub fn load(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> CartService<S, C> {
    /// Storage key for the cart.
    pub const STORAGE_KEY: &'static str = "shoppingCart";

    /// Load the cart from `store`. Missing or unreadable state loads as an empty cart.
    pub fn with_clock(store: S, clock: C) -> Self {
        let store = JsonStore::new(store);
        let lines: Vec<CartLineItem> = store.load_or_default(Self::STORAGE_KEY);

        // Bulk order ids are timestamps; never reissue one that is already in the cart.
        let last_bulk_id = lines
            .iter()
            .filter_map(|line| match line {
                CartLineItem::BulkOrder(order) => Some(order.id.0),
                CartLineItem::Regular(_) | CartLineItem::BulkProduct(_) => None,
            })
            .max()
            .unwrap_or(0);

        debug!(lines = lines.len(), "loaded cart");

        Self {
            store,
            clock,
            ids: MonotonicIds::after(last_bulk_id),
            lines,
        }
    }

    /// Cart lines in display order.
    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Borrow the storage adapter.
    pub fn store(&self) -> &JsonStore<S> {
        &self.store
    }

    /// Add a product or bulk order.
    ///
    /// Regular products merge into the first line with the same id, whatever its kind;
    /// bulk additions are always appended as new lines.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ZeroQuantity`] for a bulk addition with no units, or
    /// [`CartError::Overflow`] if a quantity or total no longer fits; the cart is left
    /// unchanged.
    pub fn add_to_cart(
        &mut self,
        addition: impl Into<CartAddition>,
    ) -> Result<CartNotice, CartError> {
        let notice = match addition.into() {
            CartAddition::Product(product) => {
                let existing = self.lines.iter_mut().find(|line| line.id() == product.id);

                if let Some(line) = existing {
                    let quantity = line.quantity().checked_add(1).ok_or(CartError::Overflow)?;

                    line.set_quantity(quantity)?;

                    debug!(id = %product.id, quantity = line.quantity(), "increased cart line");

                    CartNotice::QuantityIncreased { name: product.name }
                } else {
                    let name = product.name.clone();

                    debug!(id = %product.id, "added cart line");

                    self.lines
                        .push(CartLineItem::Regular(ProductLine { product, quantity: 1 }));

                    CartNotice::Added { name }
                }
            }
            CartAddition::BulkProduct { product, quantity } => {
                if quantity == 0 {
                    return Err(CartError::ZeroQuantity);
                }

                let name = product.name.clone();

                debug!(id = %product.id, quantity, "added bulk product line");

                self.lines
                    .push(CartLineItem::BulkProduct(ProductLine { product, quantity }));

                CartNotice::BulkAdded { name, quantity }
            }
            CartAddition::BulkOrder(request) => {
                if request.quantity == 0 {
                    return Err(CartError::ZeroQuantity);
                }

                let total =
                    line_total(request.price, request.quantity).ok_or(CartError::Overflow)?;
                let id = ItemId(self.ids.next(self.clock.now()));
                let notice = CartNotice::BulkAdded {
                    name: request.product.clone(),
                    quantity: request.quantity,
                };

                info!(%id, farmer = %request.farmer_id, quantity = request.quantity, "added bulk order line");

                self.lines.push(CartLineItem::BulkOrder(BulkOrderLine {
                    id,
                    farmer_id: request.farmer_id,
                    farmer_name: request.farmer_name,
                    farmer_title: request.farmer_title,
                    product: request.product,
                    quantity: request.quantity,
                    unit: request.unit,
                    price: request.price,
                    total,
                    delivery_date: request.delivery_date,
                    delivery_frequency: request.delivery_frequency,
                    special_instructions: request.special_instructions,
                    status: BulkStatus::Pending,
                }));

                notice
            }
        };

        self.persist();

        Ok(notice)
    }

    /// Remove every line with `id`. Returns `None` if there was no such line.
    pub fn remove_from_cart(&mut self, id: ItemId) -> Option<CartNotice> {
        let name = self
            .lines
            .iter()
            .find(|line| line.id() == id)
            .map(|line| line.name().to_string())?;

        self.lines.retain(|line| line.id() != id);

        debug!(%id, "removed cart line");

        self.persist();

        Some(CartNotice::Removed { name })
    }

    /// Change the quantity of every line with `id` by `delta`.
    ///
    /// A resulting quantity of zero or less removes the line. Unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Overflow`] if a new quantity or bulk order total does not fit;
    /// the cart is left unchanged.
    pub fn update_quantity(&mut self, id: ItemId, delta: i64) -> Result<(), CartError> {
        if !self.lines.iter().any(|line| line.id() == id) {
            return Ok(());
        }

        let mut lines = Vec::with_capacity(self.lines.len());

        for line in &self.lines {
            if line.id() != id {
                lines.push(line.clone());
                continue;
            }

            let quantity = i64::from(line.quantity()).saturating_add(delta);

            if quantity <= 0 {
                continue;
            }

            let mut line = line.clone();
            line.set_quantity(u32::try_from(quantity).map_err(|_err| CartError::Overflow)?)?;
            lines.push(line);
        }

        self.lines = lines;

        debug!(%id, delta, "updated cart line quantity");

        self.persist();

        Ok(())
    }

    /// Remove every line.
    pub fn clear_cart(&mut self) -> CartNotice {
        self.lines.clear();

        debug!("cleared cart");

        self.persist();

        CartNotice::Cleared
    }

    /// Sum of all line quantities.
    pub fn total_items(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity()))
            .sum()
    }

    /// Sum of unit price times quantity over all lines.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Overflow`] if the total does not fit in minor units.
    pub fn total_price(&self) -> Result<Money<'static, Currency>, CartError> {
        let total = self.lines.iter().try_fold(0_i64, |acc, line| {
            line.line_total()
                .and_then(|line_total| acc.checked_add(line_total))
                .ok_or(CartError::Overflow)
        })?;

        Ok(inr(total))
    }

    fn persist(&mut self) {
        self.store.save(Self::STORAGE_KEY, &self.lines);
    }
}
