//! Data Transfer Objects (DTOs) for requests and responses.
//!
//! Field names go over the wire in camelCase.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{PagedResult, Payment, PaymentId, PaymentStatus};

// ─────────────────────────────────────────────────────────────────────────────
// Requests
// ─────────────────────────────────────────────────────────────────────────────

/// Request to register a new payment event.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReceivePaymentRequest {
    /// Caller-chosen identifier, unique across all payments
    #[schema(example = "order-1042")]
    pub client_identifier: String,
    #[schema(value_type = String, example = "120.50")]
    pub amount: Decimal,
    #[schema(example = "Monthly subscription")]
    pub description: String,
}

/// A date-range page request, already validated by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPaymentsPagedRequest {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub page_number: u32,
    pub page_size: u32,
}

// ─────────────────────────────────────────────────────────────────────────────
// Responses
// ─────────────────────────────────────────────────────────────────────────────

/// Public view of a payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub id: PaymentId,
    #[schema(example = "order-1042")]
    pub client_identifier: String,
    #[schema(value_type = String, example = "120.50")]
    pub amount: Decimal,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub status: PaymentStatus,
}

impl From<&Payment> for PaymentResponse {
    fn from(p: &Payment) -> Self {
        Self {
            id: p.id(),
            client_identifier: p.client_identifier().to_string(),
            amount: p.amount(),
            description: p.description().to_string(),
            created_at: p.created_at(),
            status: p.status(),
        }
    }
}

impl From<Payment> for PaymentResponse {
    fn from(p: Payment) -> Self {
        PaymentResponse::from(&p)
    }
}

/// One page of payments, newest first.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PagedPaymentResponse {
    pub items: Vec<PaymentResponse>,
    #[schema(example = 1)]
    pub page_number: u32,
    #[schema(example = 10)]
    pub page_size: u32,
    #[schema(example = 25)]
    pub total_count: u64,
    #[schema(example = 3)]
    pub total_pages: u64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

impl From<PagedResult<Payment>> for PagedPaymentResponse {
    fn from(page: PagedResult<Payment>) -> Self {
        let total_pages = page.total_pages();
        let has_previous_page = page.has_previous_page();
        let has_next_page = page.has_next_page();
        let page = page.map(PaymentResponse::from);

        Self {
            page_number: page.page_number(),
            page_size: page.page_size(),
            total_count: page.total_count(),
            items: page.into_items(),
            total_pages,
            has_previous_page,
            has_next_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paged_response_copies_derived_fields() {
        let items = vec![
            Payment::receive("client-5".into(), Decimal::new(150, 2), "p1".into()),
            Payment::receive("client-6".into(), Decimal::new(250, 2), "p2".into()),
        ];
        let page = PagedResult::new(items, 2, 2, 5);

        let response = PagedPaymentResponse::from(page);

        assert_eq!(response.page_number, 2);
        assert_eq!(response.page_size, 2);
        assert_eq!(response.total_count, 5);
        assert_eq!(response.total_pages, 3);
        assert!(response.has_previous_page);
        assert!(response.has_next_page);
        assert_eq!(response.items.len(), 2);
        assert_eq!(response.items[0].client_identifier, "client-5");
    }

    #[test]
    fn test_receive_request_reads_camel_case() {
        let req: ReceivePaymentRequest = serde_json::from_str(
            r#"{"clientIdentifier":"client-1","amount":120.50,"description":"desc"}"#,
        )
        .unwrap();
        assert_eq!(req.client_identifier, "client-1");
        assert_eq!(req.amount, Decimal::new(12050, 2));
    }

    #[test]
    fn test_payment_response_writes_camel_case() {
        let payment = Payment::receive("client-9".into(), Decimal::new(21, 0), "ok".into());
        let json = serde_json::to_value(PaymentResponse::from(&payment)).unwrap();
        assert_eq!(json["clientIdentifier"], "client-9");
        assert_eq!(json["status"], "RECEIVED");
        assert!(json.get("createdAt").is_some());
    }
}
