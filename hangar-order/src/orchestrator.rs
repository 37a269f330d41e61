use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use hangar_catalog::{CatalogError, PartCatalog, PartsFilter};
use hangar_core::payment::{PayOrderRequest, PaymentGateway, PaymentMethod};
use uuid::Uuid;

use crate::error::{OrderError, OrderResult};
use crate::models::{Order, OrderStatus};
use crate::repository::{OrderRepository, SwapOutcome};

/// Drives orders through their lifecycle.
///
/// Prices new orders against the parts catalog, charges them through the
/// payment gateway and persists every transition. Store locks are never held
/// while a collaborator is being called; transitions are committed with a
/// compare-and-swap against `PendingPayment` so two racing requests cannot
/// both win.
pub struct OrderOrchestrator {
    catalog: Arc<dyn PartCatalog>,
    payments: Arc<dyn PaymentGateway>,
    orders: Arc<dyn OrderRepository>,
}

impl OrderOrchestrator {
    pub fn new(
        catalog: Arc<dyn PartCatalog>,
        payments: Arc<dyn PaymentGateway>,
        orders: Arc<dyn OrderRepository>,
    ) -> Self {
        Self { catalog, payments, orders }
    }

    /// Price the requested parts and open a new order awaiting payment
    #[tracing::instrument(skip(self, part_uuids), fields(parts = part_uuids.len()))]
    pub async fn create_order(&self, user_uuid: Uuid, part_uuids: Vec<Uuid>) -> OrderResult<Order> {
        if part_uuids.is_empty() {
            return Err(OrderError::Validation("part_uuids must not be empty".to_string()));
        }

        let distinct: HashSet<Uuid> = part_uuids.iter().copied().collect();
        let filter = PartsFilter::by_uuids(distinct.iter().copied());

        let parts = match self.catalog.list(&filter).await {
            Ok(parts) => parts,
            Err(CatalogError::NotFound(_)) => Vec::new(),
            Err(e) => {
                tracing::error!("Inventory lookup failed: {}", e);
                return Err(OrderError::UpstreamUnavailable(format!(
                    "failed to get filtered parts: {}",
                    e
                )));
            }
        };

        let prices: HashMap<Uuid, u64> = parts
            .iter()
            .filter(|part| distinct.contains(&part.uuid))
            .map(|part| (part.uuid, part.price_minor))
            .collect();

        if prices.len() != distinct.len() {
            tracing::warn!(
                requested = distinct.len(),
                found = prices.len(),
                "Rejecting order with unknown parts"
            );
            return Err(OrderError::Validation("missing specified part uuids".to_string()));
        }

        // One term per requested id, so a part ordered twice is priced twice
        let total_price_minor = part_uuids
            .iter()
            .try_fold(0u64, |acc, uuid| prices.get(uuid).and_then(|price| acc.checked_add(*price)))
            .ok_or_else(|| OrderError::Validation("total price is out of range".to_string()))?;

        let order = Order::new(user_uuid, part_uuids, total_price_minor);
        self.orders.put(order.clone()).await?;

        tracing::info!(
            order_uuid = %order.order_uuid,
            total_price_minor,
            "Order created"
        );
        Ok(order)
    }

    pub async fn get_order(&self, order_uuid: Uuid) -> OrderResult<Order> {
        self.orders
            .get(order_uuid)
            .await?
            .ok_or(OrderError::NotFound(order_uuid))
    }

    /// Charge a pending order and return the transaction id
    #[tracing::instrument(skip(self))]
    pub async fn pay_order(&self, order_uuid: Uuid, method: PaymentMethod) -> OrderResult<Uuid> {
        let mut order = self.get_order(order_uuid).await?;

        if let Some(conflict) = order.status.pay_conflict() {
            tracing::warn!(status = ?order.status, "Rejecting payment: {}", conflict);
            return Err(conflict);
        }

        if !method.is_payable() {
            return Err(OrderError::Validation("invalid payment method".to_string()));
        }

        let response = self
            .payments
            .pay(PayOrderRequest {
                order_uuid: order.order_uuid.to_string(),
                user_uuid: order.user_uuid.to_string(),
                payment_method: method,
            })
            .await
            .map_err(|e| {
                tracing::error!("Payment failed: {}", e);
                OrderError::UpstreamUnavailable(format!("failed to pay order: {}", e))
            })?;

        order.mark_paid(response.transaction_uuid, method)?;
        self.commit(order, OrderStatus::pay_conflict).await.inspect_err(|_| {
            // The processor already issued a transaction for an order we can no longer mark paid
            tracing::warn!(
                transaction_uuid = %response.transaction_uuid,
                "Order changed while payment was in flight"
            );
        })?;

        tracing::info!(transaction_uuid = %response.transaction_uuid, "Order paid");
        Ok(response.transaction_uuid)
    }

    /// Cancel an order that has not been paid yet
    #[tracing::instrument(skip(self))]
    pub async fn cancel_order(&self, order_uuid: Uuid) -> OrderResult<Order> {
        let mut order = self.get_order(order_uuid).await?;

        if let Err(conflict) = order.mark_cancelled() {
            tracing::warn!(status = ?order.status, "Rejecting cancellation: {}", conflict);
            return Err(conflict);
        }

        self.commit(order.clone(), OrderStatus::cancel_conflict).await?;

        tracing::info!("Order cancelled");
        Ok(order)
    }

    /// Write a transitioned order, provided it is still pending in the store
    async fn commit(
        &self,
        order: Order,
        conflict_for: fn(&OrderStatus) -> Option<OrderError>,
    ) -> OrderResult<()> {
        let order_uuid = order.order_uuid;

        match self.orders.compare_and_swap(OrderStatus::PendingPayment, order).await? {
            SwapOutcome::Swapped => Ok(()),
            SwapOutcome::Missing => Err(OrderError::NotFound(order_uuid)),
            SwapOutcome::Stale(current) => Err(conflict_for(&current.status).unwrap_or_else(|| {
                OrderError::Internal(format!("order {} lost a transition race", order_uuid))
            })),
        }
    }
}
