use super::order::{Order, OrderStatus, PaymentStatus};
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn get(&self, order_id: &str) -> Result<Option<Order>>;
    async fn update_status(
        &self,
        order_id: &str,
        payment_status: PaymentStatus,
        status: OrderStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<()>;
}

pub type OrderStoreBox = Box<dyn OrderStore>;
