//! Error types for the payment service.

use crate::domain::PaymentStatus;

/// Domain-level errors (business rule violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Cannot move payment from {from} to {to}")]
    InvalidStatusTransition {
        from: PaymentStatus,
        to: PaymentStatus,
    },

    #[error("Unknown payment status: {0}")]
    UnknownStatus(String),
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The backing store could not be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Domain(e @ DomainError::InvalidStatusTransition { .. }) => {
                AppError::Conflict(e.to_string())
            }
            RepoError::Domain(e) => AppError::Internal(e.to_string()),
            RepoError::Unavailable(e) => AppError::ServiceUnavailable(e),
            RepoError::Database(e) => AppError::Internal(e),
            RepoError::NotFound => AppError::NotFound("Resource not found".into()),
            RepoError::Conflict(e) => AppError::Conflict(e),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        RepoError::Domain(err).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_maps_to_service_unavailable() {
        let err: AppError = RepoError::Unavailable("connection refused".into()).into();
        assert!(matches!(err, AppError::ServiceUnavailable(msg) if msg == "connection refused"));
    }

    #[test]
    fn test_invalid_transition_maps_to_conflict() {
        let err: AppError = DomainError::InvalidStatusTransition {
            from: PaymentStatus::Cancelled,
            to: PaymentStatus::Received,
        }
        .into();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn test_corrupt_row_maps_to_internal() {
        let err: AppError = RepoError::Domain(DomainError::UnknownStatus("X".into())).into();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
