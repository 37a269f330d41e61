pub mod models;
pub mod error;
pub mod repository;
pub mod orchestrator;

pub use models::{Order, OrderStatus};
pub use error::{OrderError, OrderResult};
pub use repository::{InMemoryOrderRepository, OrderRepository, RepositoryError, SwapOutcome};
pub use orchestrator::OrderOrchestrator;
