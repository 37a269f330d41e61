use axum::{extract::State, routing::post, Router};
use hangar_core::payment::{PayOrderRequest, PayOrderResponse};

use crate::error::{AppError, AppJson};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/payments", post(pay))
}

/// POST /payments
/// Direct access to the payment processor, outside of any order lifecycle
pub async fn pay(
    State(state): State<AppState>,
    AppJson(req): AppJson<PayOrderRequest>,
) -> Result<AppJson<PayOrderResponse>, AppError> {
    let response = state.payments.pay(req).await?;
    Ok(AppJson(response))
}
