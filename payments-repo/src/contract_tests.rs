//! Behaviour every `PaymentRepository` adapter must share.
//!
//! Each adapter's test module calls these against a fresh, empty store.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;

use payments_types::{Payment, PaymentId, PaymentRepository, PaymentStatus, RepoError};

/// A fixed instant `minutes` after 2025-06-01T12:00:00Z.
pub fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap() + Duration::minutes(minutes)
}

pub fn payment_at(client_identifier: &str, created_at: DateTime<Utc>) -> Payment {
    Payment::from_parts(
        PaymentId::new(),
        client_identifier.to_string(),
        Decimal::new(4275, 2),
        format!("payment {client_identifier}"),
        created_at,
        PaymentStatus::Received,
    )
}

pub async fn save_and_get(repo: &impl PaymentRepository) {
    let payment = payment_at("client-1", at(0));
    let saved = repo.save(payment.clone()).await.unwrap();
    assert_eq!(saved, payment);

    let by_id = repo.get_by_id(payment.id()).await.unwrap().unwrap();
    assert_eq!(by_id.id(), payment.id());
    assert_eq!(by_id.client_identifier(), "client-1");
    assert_eq!(by_id.amount(), Decimal::new(4275, 2));
    assert_eq!(by_id.created_at(), at(0));
    assert_eq!(by_id.status(), PaymentStatus::Received);

    let by_client = repo
        .get_by_client_identifier("client-1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_client.id(), payment.id());
}

pub async fn get_missing(repo: &impl PaymentRepository) {
    assert!(repo.get_by_id(PaymentId::new()).await.unwrap().is_none());
    assert!(
        repo.get_by_client_identifier("nobody")
            .await
            .unwrap()
            .is_none()
    );
}

pub async fn duplicate_client_identifier_conflicts(repo: &impl PaymentRepository) {
    repo.save(payment_at("dup", at(0))).await.unwrap();

    let result = repo.save(payment_at("dup", at(1))).await;

    assert!(matches!(result, Err(RepoError::Conflict(_))));
}

pub async fn update_replaces_document(repo: &impl PaymentRepository) {
    let payment = payment_at("client-2", at(0));
    repo.save(payment.clone()).await.unwrap();

    let replacement = Payment::from_parts(
        payment.id(),
        payment.client_identifier().to_string(),
        Decimal::new(-500, 2),
        "rewritten".to_string(),
        payment.created_at(),
        PaymentStatus::Cancelled,
    );
    let updated = repo.update(replacement).await.unwrap();
    assert_eq!(updated.status(), PaymentStatus::Cancelled);

    let stored = repo.get_by_id(payment.id()).await.unwrap().unwrap();
    assert_eq!(stored.status(), PaymentStatus::Cancelled);
    assert_eq!(stored.description(), "rewritten");
    assert_eq!(stored.amount(), Decimal::new(-500, 2));
    assert_eq!(stored.created_at(), at(0));
}

pub async fn update_missing_is_not_found(repo: &impl PaymentRepository) {
    let result = repo.update(payment_at("ghost", at(0))).await;

    assert!(matches!(result, Err(RepoError::NotFound)));
    assert!(repo.get_by_id(PaymentId::new()).await.unwrap().is_none());
}

pub async fn paged_filters_sorts_and_counts(repo: &impl PaymentRepository) {
    // Two outside the window on each side, five inside.
    repo.save(payment_at("before", at(-60))).await.unwrap();
    for minute in [1, 5, 3, 2, 4] {
        repo.save(payment_at(&format!("in-{minute}"), at(minute)))
            .await
            .unwrap();
    }
    repo.save(payment_at("after", at(60))).await.unwrap();

    let page = repo.get_paged(at(0), at(10), 1, 2).await.unwrap();

    assert_eq!(page.total_count(), 5);
    assert_eq!(page.total_pages(), 3);
    assert_eq!(page.page_number(), 1);
    assert_eq!(page.page_size(), 2);
    let names: Vec<_> = page.items().iter().map(|p| p.client_identifier()).collect();
    assert_eq!(names, vec!["in-5", "in-4"]);

    let page = repo.get_paged(at(0), at(10), 3, 2).await.unwrap();
    let names: Vec<_> = page.items().iter().map(|p| p.client_identifier()).collect();
    assert_eq!(names, vec!["in-1"]);
    assert!(page.has_previous_page());
    assert!(!page.has_next_page());
}

pub async fn paged_bounds_are_inclusive(repo: &impl PaymentRepository) {
    repo.save(payment_at("start", at(0))).await.unwrap();
    repo.save(payment_at("end", at(10))).await.unwrap();

    let page = repo.get_paged(at(0), at(10), 1, 10).await.unwrap();

    assert_eq!(page.total_count(), 2);
    let names: Vec<_> = page.items().iter().map(|p| p.client_identifier()).collect();
    assert_eq!(names, vec!["end", "start"]);
}

pub async fn paged_beyond_last_page(repo: &impl PaymentRepository) {
    for minute in 0..3 {
        repo.save(payment_at(&format!("p-{minute}"), at(minute)))
            .await
            .unwrap();
    }

    let page = repo.get_paged(at(0), at(10), 5, 2).await.unwrap();

    assert!(page.items().is_empty());
    assert_eq!(page.total_count(), 3);
    assert_eq!(page.total_pages(), 2);
    assert_eq!(page.page_number(), 5);
}

pub async fn paged_far_beyond_last_page(repo: &impl PaymentRepository) {
    for minute in 0..3 {
        repo.save(payment_at(&format!("far-{minute}"), at(minute)))
            .await
            .unwrap();
    }

    // (u32::MAX - 1) * u32::MAX does not fit in a signed 64-bit offset.
    let page = repo
        .get_paged(at(0), at(10), u32::MAX, u32::MAX)
        .await
        .unwrap();

    assert!(page.items().is_empty());
    assert_eq!(page.total_count(), 3);
    assert_eq!(page.total_pages(), 1);
    assert!(!page.has_next_page());
}
