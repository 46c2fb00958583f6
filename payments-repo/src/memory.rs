//! In-memory document store adapter.
//!
//! Useful for local runs (`memory://`) and tests. Data is lost on drop.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use payments_types::{PagedResult, Payment, PaymentId, PaymentRepository, RepoError};

/// Payments keyed by id, plus a unique secondary index on client identifier.
#[derive(Default)]
pub struct InMemoryRepo {
    payments: DashMap<PaymentId, Payment>,
    by_client: DashMap<String, PaymentId>,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored payments.
    pub fn len(&self) -> usize {
        self.payments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }
}

fn duplicate(client_identifier: &str) -> RepoError {
    RepoError::Conflict(format!(
        "client identifier '{}' is already taken",
        client_identifier
    ))
}

#[async_trait]
impl PaymentRepository for InMemoryRepo {
    async fn save(&self, payment: Payment) -> Result<Payment, RepoError> {
        match self.by_client.entry(payment.client_identifier().to_string()) {
            Entry::Occupied(_) => Err(duplicate(payment.client_identifier())),
            Entry::Vacant(slot) => {
                slot.insert(payment.id());
                self.payments.insert(payment.id(), payment.clone());
                Ok(payment)
            }
        }
    }

    async fn get_by_id(&self, id: PaymentId) -> Result<Option<Payment>, RepoError> {
        Ok(self.payments.get(&id).map(|p| p.clone()))
    }

    async fn get_by_client_identifier(
        &self,
        client_identifier: &str,
    ) -> Result<Option<Payment>, RepoError> {
        let Some(id) = self.by_client.get(client_identifier).map(|id| *id) else {
            return Ok(None);
        };
        Ok(self.payments.get(&id).map(|p| p.clone()))
    }

    async fn update(&self, payment: Payment) -> Result<Payment, RepoError> {
        // Never hold a `payments` guard while touching `by_client`; `save` nests the other way.
        let previous = self
            .payments
            .get(&payment.id())
            .map(|p| p.client_identifier().to_string())
            .ok_or(RepoError::NotFound)?;

        if previous != payment.client_identifier() {
            match self.by_client.entry(payment.client_identifier().to_string()) {
                Entry::Occupied(_) => return Err(duplicate(payment.client_identifier())),
                Entry::Vacant(slot) => {
                    slot.insert(payment.id());
                }
            }
            self.by_client.remove(&previous);
        }

        match self.payments.get_mut(&payment.id()) {
            Some(mut stored) => *stored = payment.clone(),
            None => return Err(RepoError::NotFound),
        }
        Ok(payment)
    }

    async fn get_paged(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        page_number: u32,
        page_size: u32,
    ) -> Result<PagedResult<Payment>, RepoError> {
        let mut matches: Vec<Payment> = self
            .payments
            .iter()
            .filter(|p| p.created_at() >= start && p.created_at() <= end)
            .map(|p| p.clone())
            .collect();

        matches.sort_by_key(|p| std::cmp::Reverse(p.created_at()));

        let total = matches.len() as u64;
        let offset = usize::try_from(PagedResult::<Payment>::offset(page_number, page_size))
            .unwrap_or(usize::MAX);
        let items = matches
            .into_iter()
            .skip(offset)
            .take(page_size as usize)
            .collect();

        Ok(PagedResult::new(items, page_number, page_size, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract_tests as contract;

    #[tokio::test]
    async fn test_save_and_get() {
        contract::save_and_get(&InMemoryRepo::new()).await;
    }

    #[tokio::test]
    async fn test_get_missing() {
        contract::get_missing(&InMemoryRepo::new()).await;
    }

    #[tokio::test]
    async fn test_duplicate_client_identifier_conflicts() {
        contract::duplicate_client_identifier_conflicts(&InMemoryRepo::new()).await;
    }

    #[tokio::test]
    async fn test_update_replaces_document() {
        contract::update_replaces_document(&InMemoryRepo::new()).await;
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        contract::update_missing_is_not_found(&InMemoryRepo::new()).await;
    }

    #[tokio::test]
    async fn test_paged_filters_sorts_and_counts() {
        contract::paged_filters_sorts_and_counts(&InMemoryRepo::new()).await;
    }

    #[tokio::test]
    async fn test_paged_bounds_are_inclusive() {
        contract::paged_bounds_are_inclusive(&InMemoryRepo::new()).await;
    }

    #[tokio::test]
    async fn test_paged_far_beyond_last_page() {
        contract::paged_far_beyond_last_page(&InMemoryRepo::new()).await;
    }

    #[tokio::test]
    async fn test_paged_beyond_last_page() {
        contract::paged_beyond_last_page(&InMemoryRepo::new()).await;
    }

    #[tokio::test]
    async fn test_update_moves_client_index() {
        let repo = InMemoryRepo::new();
        let payment = contract::payment_at("old-key", contract::at(10));
        repo.save(payment.clone()).await.unwrap();

        let renamed = Payment::from_parts(
            payment.id(),
            "new-key".to_string(),
            payment.amount(),
            payment.description().to_string(),
            payment.created_at(),
            payment.status(),
        );
        repo.update(renamed).await.unwrap();

        assert!(repo.get_by_client_identifier("old-key").await.unwrap().is_none());
        let found = repo.get_by_client_identifier("new-key").await.unwrap().unwrap();
        assert_eq!(found.id(), payment.id());
        assert_eq!(repo.len(), 1);
    }
}
