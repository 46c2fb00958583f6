//! OpenAPI document for the HTTP surface.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use payments_types::domain::{PaymentId, PaymentStatus};
use payments_types::dto::{PagedPaymentResponse, PaymentResponse, ReceivePaymentRequest};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Register a payment event
#[utoipa::path(
    post,
    path = "/api/payments/receive",
    tag = "payments",
    request_body = ReceivePaymentRequest,
    responses(
        (status = 202, description = "Payment accepted", body = PaymentResponse),
        (status = 400, description = "Malformed request body"),
        (status = 409, description = "A payment with this client identifier already exists"),
        (status = 503, description = "Payment store unavailable")
    )
)]
async fn receive_payment() {}

/// Get payment by ID
#[utoipa::path(
    get,
    path = "/api/payments/{id}",
    tag = "payments",
    params(
        ("id" = PaymentId, Path, description = "Payment ID (UUID)")
    ),
    responses(
        (status = 200, description = "Payment details", body = PaymentResponse),
        (status = 400, description = "Invalid payment ID"),
        (status = 404, description = "Payment not found")
    )
)]
async fn get_payment() {}

/// Cancel a payment
#[utoipa::path(
    put,
    path = "/api/payments/{id}/cancel",
    tag = "payments",
    params(
        ("id" = PaymentId, Path, description = "Payment ID (UUID)")
    ),
    responses(
        (status = 200, description = "Payment cancelled (or already cancelled)", body = PaymentResponse),
        (status = 400, description = "Invalid payment ID"),
        (status = 404, description = "Payment not found")
    )
)]
async fn cancel_payment() {}

/// List payments created in a date range, newest first
#[utoipa::path(
    get,
    path = "/api/payments",
    tag = "payments",
    params(
        ("startDate" = Option<String>, Query, description = "RFC 3339 or YYYY-MM-DD; defaults to 30 days ago"),
        ("endDate" = Option<String>, Query, description = "RFC 3339 or YYYY-MM-DD; defaults to now"),
        ("pageNumber" = Option<u32>, Query, description = "1-based page number (default 1)"),
        ("pageSize" = Option<u32>, Query, description = "Items per page, 1 to 100 (default 10)")
    ),
    responses(
        (status = 200, description = "One page of payments", body = PagedPaymentResponse),
        (status = 400, description = "Invalid query parameters")
    )
)]
async fn list_payments() {}

/// OpenAPI documentation for the Payments API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Payments Service API",
        version = "1.0.0",
        description = "Records payment events submitted by clients, lets them be looked up, cancelled and listed by creation date.\n\nEach `clientIdentifier` can be received exactly once; a repeat is rejected with `409 Conflict`.",
        license(name = "MIT"),
    ),
    paths(
        health,
        receive_payment,
        get_payment,
        cancel_payment,
        list_payments,
    ),
    components(
        schemas(
            ReceivePaymentRequest,
            PaymentResponse,
            PagedPaymentResponse,
            PaymentStatus,
            PaymentId,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "payments", description = "Payment lifecycle operations"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();

        for expected in [
            "/health",
            "/api/payments",
            "/api/payments/receive",
            "/api/payments/{id}",
            "/api/payments/{id}/cancel",
        ] {
            assert!(paths.iter().any(|p| p == expected), "missing {expected}");
        }
    }
}
