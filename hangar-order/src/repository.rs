use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Order, OrderStatus};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("order storage failure: {0}")]
    Backend(String),
}

/// Result of a conditional write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapOutcome {
    Swapped,
    /// No order with that id
    Missing,
    /// Status moved on since it was read; carries the stored order
    Stale(Order),
}

/// Storage for orders keyed by id
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Absence is `Ok(None)`, not an error
    async fn get(&self, order_uuid: Uuid) -> Result<Option<Order>, RepositoryError>;

    /// Insert or fully replace, last writer wins
    async fn put(&self, order: Order) -> Result<(), RepositoryError>;

    /// Replace the stored order only while its status is still `expected`
    async fn compare_and_swap(
        &self,
        expected: OrderStatus,
        order: Order,
    ) -> Result<SwapOutcome, RepositoryError>;
}

/// In-memory order store, one lock per instance
#[derive(Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<HashMap<Uuid, Order>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.orders.read().await.is_empty()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn get(&self, order_uuid: Uuid) -> Result<Option<Order>, RepositoryError> {
        Ok(self.orders.read().await.get(&order_uuid).cloned())
    }

    async fn put(&self, order: Order) -> Result<(), RepositoryError> {
        tracing::debug!(order_uuid = %order.order_uuid, status = ?order.status, "storing order");
        self.orders.write().await.insert(order.order_uuid, order);
        Ok(())
    }

    async fn compare_and_swap(
        &self,
        expected: OrderStatus,
        order: Order,
    ) -> Result<SwapOutcome, RepositoryError> {
        let mut orders = self.orders.write().await;

        let Some(current) = orders.get_mut(&order.order_uuid) else {
            return Ok(SwapOutcome::Missing);
        };

        if current.status != expected {
            return Ok(SwapOutcome::Stale(current.clone()));
        }

        tracing::debug!(
            order_uuid = %order.order_uuid,
            from = ?expected,
            to = ?order.status,
            "swapping order"
        );
        *current = order;
        Ok(SwapOutcome::Swapped)
    }
}
