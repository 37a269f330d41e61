use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::identity::parse_uuid;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Zero value, never accepted by a gateway
    #[default]
    Unspecified,
    Card,
    Sbp,
    CreditCard,
    InvestorMoney,
}

impl PaymentMethod {
    pub fn is_payable(&self) -> bool {
        !matches!(self, PaymentMethod::Unspecified)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Unspecified => "UNSPECIFIED",
            PaymentMethod::Card => "CARD",
            PaymentMethod::Sbp => "SBP",
            PaymentMethod::CreditCard => "CREDIT_CARD",
            PaymentMethod::InvestorMoney => "INVESTOR_MONEY",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UNSPECIFIED" => Ok(PaymentMethod::Unspecified),
            "CARD" => Ok(PaymentMethod::Card),
            "SBP" => Ok(PaymentMethod::Sbp),
            "CREDIT_CARD" => Ok(PaymentMethod::CreditCard),
            "INVESTOR_MONEY" => Ok(PaymentMethod::InvestorMoney),
            other => Err(PaymentError::InvalidArgument(format!(
                "unknown payment method {:?}",
                other
            ))),
        }
    }
}

/// Request sent to the payment processor.
/// Identifiers stay as strings so the gateway performs its own validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayOrderRequest {
    pub order_uuid: String,
    pub user_uuid: String,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PayOrderResponse {
    pub transaction_uuid: Uuid,
}

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("payment processor unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Charge an order and return the processor's transaction id
    async fn pay(&self, request: PayOrderRequest) -> Result<PayOrderResponse, PaymentError>;
}

/// In-process payment processor. Every well-formed request succeeds.
#[derive(Debug, Default, Clone)]
pub struct LocalPaymentGateway;

impl LocalPaymentGateway {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PaymentGateway for LocalPaymentGateway {
    async fn pay(&self, request: PayOrderRequest) -> Result<PayOrderResponse, PaymentError> {
        parse_uuid("order_uuid", &request.order_uuid)
            .map_err(|e| PaymentError::InvalidArgument(e.to_string()))?;
        parse_uuid("user_uuid", &request.user_uuid)
            .map_err(|e| PaymentError::InvalidArgument(e.to_string()))?;

        if !request.payment_method.is_payable() {
            return Err(PaymentError::InvalidArgument("invalid payment method".to_string()));
        }

        let transaction_uuid = Uuid::new_v4();
        tracing::info!(
            order_uuid = %request.order_uuid,
            method = %request.payment_method,
            "Payment succeeded, transaction_uuid: {}",
            transaction_uuid
        );

        Ok(PayOrderResponse { transaction_uuid })
    }
}
