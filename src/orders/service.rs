//! Order service.

use jiff::tz::TimeZone;
use tracing::{debug, info};

use crate::{
    clock::{Clock, MonotonicIds, SystemClock},
    orders::{Order, OrderError, OrderId, OrderSnapshot, OrderStatus},
    storage::{JsonStore, KeyValueStore},
};

/// Owns the order history and mirrors it to storage after every change.
#[derive(Debug)]
pub struct OrderService<S, C = SystemClock> {
    store: JsonStore<S>,
    clock: C,
    ids: MonotonicIds,
    orders: Vec<Order>,
}

impl<S: KeyValueStore> OrderService<S> {
    /// Load the history from `store` using the wall clock.
    pub fn load(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> OrderService<S, C> {
    /// Storage key for the order history.
    pub const STORAGE_KEY: &'static str = "orderHistory";

    /// Load the history from `store`. Missing or unreadable state loads as empty.
    pub fn with_clock(store: S, clock: C) -> Self {
        let store = JsonStore::new(store);
        let orders: Vec<Order> = store.load_or_default(Self::STORAGE_KEY);
        let last_id = orders.iter().map(|order| order.id.0).max().unwrap_or(0);

        debug!(orders = orders.len(), "loaded order history");

        Self {
            store,
            clock,
            ids: MonotonicIds::after(last_id),
            orders,
        }
    }

    /// Orders, newest first.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Look up an order.
    pub fn get(&self, id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == id)
    }

    /// Borrow the storage adapter.
    pub fn store(&self) -> &JsonStore<S> {
        &self.store
    }

    /// Record a new order in the `Processing` state and put it at the front of the history.
    #[expect(
        clippy::indexing_slicing,
        reason = "the order was just inserted at the front"
    )]
    pub fn add_order(&mut self, snapshot: OrderSnapshot) -> &Order {
        // Id and date from a single reading
        let now = self.clock.now();
        let id = OrderId(self.ids.next(now));
        let date = now.to_zoned(TimeZone::UTC).date();
        let order = Order::from_snapshot(id, date, snapshot);

        info!(%id, total = order.total, items = order.items.len(), "placed order");

        self.orders.insert(0, order);
        self.persist();

        &self.orders[0]
    }

    /// Replace the status of order `id`. Returns `None`, changing nothing, if there is no
    /// such order.
    pub fn update_order_status(&mut self, id: OrderId, status: OrderStatus) -> Option<&Order> {
        let index = self.orders.iter().position(|order| order.id == id)?;

        if let Some(order) = self.orders.get_mut(index) {
            order.status = status;
        }

        info!(%id, %status, "updated order status");

        self.persist();

        self.orders.get(index)
    }

    /// Mark a processing order as delivered.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NotFound`] for an unknown id, or
    /// [`OrderError::NotProcessing`] if the order is already delivered or cancelled.
    pub fn confirm_receipt(&mut self, id: OrderId) -> Result<&Order, OrderError> {
        let status = self.get(id).ok_or(OrderError::NotFound(id))?.status;

        if status != OrderStatus::Processing {
            return Err(OrderError::NotProcessing { id, status });
        }

        self.update_order_status(id, OrderStatus::Delivered)
            .ok_or(OrderError::NotFound(id))
    }

    fn persist(&mut self) {
        self.store.save(Self::STORAGE_KEY, &self.orders);
    }
}
