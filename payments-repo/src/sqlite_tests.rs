//! SQLite repository integration tests.

#[cfg(test)]
mod tests {
    use payments_types::PaymentRepository;
    use rust_decimal::Decimal;

    use crate::SqliteRepo;
    use crate::contract_tests as contract;

    async fn setup_repo() -> SqliteRepo {
        SqliteRepo::new("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn test_save_and_get() {
        contract::save_and_get(&setup_repo().await).await;
    }

    #[tokio::test]
    async fn test_get_missing() {
        contract::get_missing(&setup_repo().await).await;
    }

    #[tokio::test]
    async fn test_duplicate_client_identifier_conflicts() {
        contract::duplicate_client_identifier_conflicts(&setup_repo().await).await;
    }

    #[tokio::test]
    async fn test_update_replaces_document() {
        contract::update_replaces_document(&setup_repo().await).await;
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        contract::update_missing_is_not_found(&setup_repo().await).await;
    }

    #[tokio::test]
    async fn test_paged_filters_sorts_and_counts() {
        contract::paged_filters_sorts_and_counts(&setup_repo().await).await;
    }

    #[tokio::test]
    async fn test_paged_bounds_are_inclusive() {
        contract::paged_bounds_are_inclusive(&setup_repo().await).await;
    }

    #[tokio::test]
    async fn test_paged_far_beyond_last_page() {
        contract::paged_far_beyond_last_page(&setup_repo().await).await;
    }

    #[tokio::test]
    async fn test_paged_beyond_last_page() {
        contract::paged_beyond_last_page(&setup_repo().await).await;
    }

    #[tokio::test]
    async fn test_decimal_scale_survives_storage() {
        let repo = setup_repo().await;
        let payment = payments_types::Payment::receive(
            "scale".to_string(),
            Decimal::new(1000, 2),
            "ten".to_string(),
        );
        repo.save(payment.clone()).await.unwrap();

        let stored = repo.get_by_id(payment.id()).await.unwrap().unwrap();

        assert_eq!(stored.amount().to_string(), "10.00");
        assert_eq!(stored.created_at(), payment.created_at());
    }

    #[tokio::test]
    async fn test_schema_rejects_unknown_status() {
        let repo = setup_repo().await;

        let result = sqlx::query(
            r#"INSERT INTO payments (id, client_identifier, amount, description, created_at, status)
               VALUES ('x', 'y', '1', 'd', '2025-01-01T00:00:00.000000000Z', 'SETTLED')"#,
        )
        .execute(repo.pool())
        .await;

        assert!(result.is_err());
        assert!(repo.get_by_client_identifier("y").await.unwrap().is_none());
    }
}
