//! Repository port trait.
//!
//! This is the primary port in our hexagonal architecture.
//! Adapters (Postgres, SQLite, InMemory) implement this trait.

use chrono::{DateTime, Utc};

use crate::domain::{PagedResult, Payment, PaymentId};
use crate::error::RepoError;

/// Persistence contract for payments.
///
/// Implementations hold no business rules. Each call is atomic on its own;
/// a read followed by a write across two calls is not.
#[async_trait::async_trait]
pub trait PaymentRepository: Send + Sync + 'static {
    /// Appends a new payment.
    ///
    /// Returns `RepoError::Conflict` if the store already holds the client identifier.
    async fn save(&self, payment: Payment) -> Result<Payment, RepoError>;

    /// Point lookup by primary key.
    async fn get_by_id(&self, id: PaymentId) -> Result<Option<Payment>, RepoError>;

    /// Point lookup by the client-supplied identifier.
    async fn get_by_client_identifier(
        &self,
        client_identifier: &str,
    ) -> Result<Option<Payment>, RepoError>;

    /// Replaces the whole stored document with the same id.
    ///
    /// Returns `RepoError::NotFound` when no payment has that id.
    async fn update(&self, payment: Payment) -> Result<Payment, RepoError>;

    /// Payments with `start <= created_at <= end`, newest first, one page at a time.
    async fn get_paged(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        page_number: u32,
        page_size: u32,
    ) -> Result<PagedResult<Payment>, RepoError>;
}
