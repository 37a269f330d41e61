use chrono::{DateTime, Utc};
use hangar_core::payment::PaymentMethod;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::OrderError;

/// Order status in the lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    PendingPayment,
    Paid,
    Cancelled,
}

impl OrderStatus {
    /// Paid and Cancelled orders never change again
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Paid | OrderStatus::Cancelled)
    }

    /// Conflict raised when paying an order in this status
    pub(crate) fn pay_conflict(&self) -> Option<OrderError> {
        match self {
            OrderStatus::PendingPayment => None,
            OrderStatus::Paid => Some(OrderError::Conflict("order already paid".to_string())),
            OrderStatus::Cancelled => Some(OrderError::Conflict("order cancelled".to_string())),
        }
    }

    /// Conflict raised when cancelling an order in this status
    pub(crate) fn cancel_conflict(&self) -> Option<OrderError> {
        match self {
            OrderStatus::PendingPayment => None,
            OrderStatus::Cancelled => {
                Some(OrderError::Conflict("order already cancelled".to_string()))
            }
            OrderStatus::Paid => Some(OrderError::Conflict(
                "order already paid and cannot be cancelled".to_string(),
            )),
        }
    }
}

/// A customer's purchase of one or more parts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Order {
    pub order_uuid: Uuid,
    pub user_uuid: Uuid,
    pub part_uuids: Vec<Uuid>,
    /// Fixed at creation, never recomputed
    pub total_price_minor: u64,
    pub status: OrderStatus,
    /// Set iff status is Paid
    pub transaction_uuid: Option<Uuid>,
    /// Set iff status is Paid
    pub payment_method: Option<PaymentMethod>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn new(user_uuid: Uuid, part_uuids: Vec<Uuid>, total_price_minor: u64) -> Self {
        let now = Utc::now();
        Self {
            order_uuid: Uuid::new_v4(),
            user_uuid,
            part_uuids,
            total_price_minor,
            status: OrderStatus::PendingPayment,
            transaction_uuid: None,
            payment_method: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Transition: PendingPayment → Paid
    pub fn mark_paid(
        &mut self,
        transaction_uuid: Uuid,
        method: PaymentMethod,
    ) -> Result<(), OrderError> {
        if let Some(conflict) = self.status.pay_conflict() {
            return Err(conflict);
        }

        self.status = OrderStatus::Paid;
        self.transaction_uuid = Some(transaction_uuid);
        self.payment_method = Some(method);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Transition: PendingPayment → Cancelled
    pub fn mark_cancelled(&mut self) -> Result<(), OrderError> {
        if let Some(conflict) = self.status.cancel_conflict() {
            return Err(conflict);
        }

        self.status = OrderStatus::Cancelled;
        self.updated_at = Utc::now();
        Ok(())
    }
}
