use uuid::Uuid;

use crate::repository::RepositoryError;

/// Failure taxonomy for every orchestrator operation
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    /// Malformed input or an unsatisfiable request
    #[error("{0}")]
    Validation(String),

    #[error("order not found: {0}")]
    NotFound(Uuid),

    /// The requested transition is illegal for the current status
    #[error("{0}")]
    Conflict(String),

    /// A collaborator call failed
    #[error("{0}")]
    UpstreamUnavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for OrderError {
    fn from(err: RepositoryError) -> Self {
        OrderError::Internal(err.to_string())
    }
}

pub type OrderResult<T> = Result<T, OrderError>;
