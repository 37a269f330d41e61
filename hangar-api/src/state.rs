use std::sync::Arc;
use std::time::Duration;

use hangar_catalog::PartCatalog;
use hangar_core::payment::PaymentGateway;
use hangar_order::{OrderOrchestrator, OrderRepository};

#[derive(Clone)]
pub struct AppState {
    pub orders: Arc<OrderOrchestrator>,
    pub catalog: Arc<dyn PartCatalog>,
    pub payments: Arc<dyn PaymentGateway>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(
        catalog: Arc<dyn PartCatalog>,
        payments: Arc<dyn PaymentGateway>,
        order_repo: Arc<dyn OrderRepository>,
        request_timeout: Duration,
    ) -> Self {
        let orders = Arc::new(OrderOrchestrator::new(
            catalog.clone(),
            payments.clone(),
            order_repo,
        ));

        Self {
            orders,
            catalog,
            payments,
            request_timeout,
        }
    }
}
