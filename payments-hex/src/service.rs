//! Payment Application Service
//!
//! Orchestrates domain operations through the repository port.
//! Contains NO infrastructure logic - pure business orchestration.

use payments_types::{
    AppError, GetPaymentsPagedRequest, PagedPaymentResponse, Payment, PaymentId,
    PaymentRepository, ReceivePaymentRequest, RepoError,
};

/// Application service for payment operations.
///
/// Generic over `R: PaymentRepository` - the adapter is injected at compile time.
/// This enables:
/// - Swapping repositories without code changes
/// - Testing with in-memory repo
/// - Compile-time checks for port implementation
pub struct PaymentService<R: PaymentRepository> {
    repo: R,
}

fn duplicate_error(client_identifier: &str) -> AppError {
    AppError::Conflict(format!(
        "Payment with ClientIdentifier '{}' already exists",
        client_identifier
    ))
}

impl<R: PaymentRepository> PaymentService<R> {
    /// Creates a new payment service with the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Registers a new payment unless one with the same client identifier exists.
    ///
    /// An existing record is never touched, even if the request differs from it.
    /// The lookup and the insert are separate store calls; a concurrent insert
    /// that wins the race is caught by the store's unique constraint and
    /// reported as the same conflict.
    pub async fn receive(&self, req: ReceivePaymentRequest) -> Result<Payment, AppError> {
        if self
            .repo
            .get_by_client_identifier(&req.client_identifier)
            .await?
            .is_some()
        {
            tracing::info!(client_identifier = %req.client_identifier, "duplicate payment rejected");
            return Err(duplicate_error(&req.client_identifier));
        }

        let client_identifier = req.client_identifier.clone();
        let payment = Payment::receive(req.client_identifier, req.amount, req.description);

        match self.repo.save(payment).await {
            Ok(saved) => {
                tracing::debug!(payment_id = %saved.id(), "payment received");
                Ok(saved)
            }
            Err(RepoError::Conflict(reason)) => {
                tracing::warn!(%reason, "payment lost uniqueness race at the store");
                Err(duplicate_error(&client_identifier))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Gets a payment by ID.
    pub async fn get_payment(&self, id: PaymentId) -> Result<Payment, AppError> {
        self.repo
            .get_by_id(id)
            .await
            .map_err(Into::into)
            .and_then(|opt| opt.ok_or_else(|| AppError::NotFound(format!("Payment {}", id))))
    }

    /// Cancels a payment. Cancelling an already cancelled payment succeeds.
    pub async fn cancel_payment(&self, id: PaymentId) -> Result<Payment, AppError> {
        let mut payment = self.get_payment(id).await?;

        payment.cancel()?;

        let updated = self.repo.update(payment).await?;
        tracing::debug!(payment_id = %id, "payment cancelled");
        Ok(updated)
    }

    /// Lists payments created within the requested range, newest first.
    pub async fn list_payments(
        &self,
        req: GetPaymentsPagedRequest,
    ) -> Result<PagedPaymentResponse, AppError> {
        let page = self
            .repo
            .get_paged(req.start_date, req.end_date, req.page_number, req.page_size)
            .await?;

        Ok(page.into())
    }
}
