use crate::domain::order::{Order, OrderStatus, PaymentStatus};
use crate::domain::ports::OrderStore;
use crate::error::{PrintError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory order store.
///
/// Uses `Arc<RwLock<HashMap<String, Order>>>` to allow shared concurrent
/// access. Backs the test suites and the default server wiring; production
/// deployments swap in a store backed by the real database.
#[derive(Default, Clone)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<HashMap<String, Order>>>,
}

impl InMemoryOrderStore {
    /// Creates a new, empty in-memory order store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an order, keyed by its id.
    pub async fn insert(&self, order: Order) {
        let mut orders = self.orders.write().await;
        orders.insert(order.id.clone(), order);
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn get(&self, order_id: &str) -> Result<Option<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.get(order_id).cloned())
    }

    async fn update_status(
        &self,
        order_id: &str,
        payment_status: PaymentStatus,
        status: OrderStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<()> {
        let mut orders = self.orders.write().await;
        match orders.get_mut(order_id) {
            Some(order) => {
                order.payment_status = payment_status;
                order.status = status;
                order.updated_at = updated_at;
                Ok(())
            }
            None => Err(PrintError::Store(format!("order {order_id} not found"))),
        }
    }
}
