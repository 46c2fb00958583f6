//! # Payments Client SDK
//!
//! A typed Rust client for the Payments API.

use chrono::{DateTime, Utc};
use payments_types::{PagedPaymentResponse, PaymentId, PaymentResponse, ReceivePaymentRequest};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Optional filters for [`PaymentsClient::list_payments`].
///
/// Unset fields fall back to the server defaults.
#[derive(Debug, Default, Clone)]
pub struct ListPaymentsParams {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
}

impl ListPaymentsParams {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(start) = self.start_date {
            query.push(("startDate", start.to_rfc3339()));
        }
        if let Some(end) = self.end_date {
            query.push(("endDate", end.to_rfc3339()));
        }
        if let Some(n) = self.page_number {
            query.push(("pageNumber", n.to_string()));
        }
        if let Some(n) = self.page_size {
            query.push(("pageSize", n.to_string()));
        }
        query
    }
}

/// Payments API client.
pub struct PaymentsClient {
    base_url: String,
    http: Client,
}

impl PaymentsClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Registers a payment. Fails with status 409 if the client identifier was already used.
    pub async fn receive_payment(
        &self,
        client_identifier: &str,
        amount: Decimal,
        description: &str,
    ) -> Result<PaymentResponse, ClientError> {
        let req = ReceivePaymentRequest {
            client_identifier: client_identifier.to_string(),
            amount,
            description: description.to_string(),
        };
        self.post("/api/payments/receive", &req).await
    }

    /// Gets a payment by ID.
    pub async fn get_payment(&self, id: PaymentId) -> Result<PaymentResponse, ClientError> {
        self.get(&format!("/api/payments/{}", id), &[]).await
    }

    /// Cancels a payment.
    pub async fn cancel_payment(&self, id: PaymentId) -> Result<PaymentResponse, ClientError> {
        self.put(&format!("/api/payments/{}/cancel", id)).await
    }

    /// Lists payments, newest first.
    pub async fn list_payments(
        &self,
        params: &ListPaymentsParams,
    ) -> Result<PagedPaymentResponse, ClientError> {
        self.get("/api/payments", &params.to_query()).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(query)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn put<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self
            .http
            .put(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_client_creation() {
        let client = PaymentsClient::new("http://localhost:3000");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = PaymentsClient::new("http://localhost:3000/");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_empty_params_send_no_query() {
        assert!(ListPaymentsParams::default().to_query().is_empty());
    }

    #[test]
    fn test_params_use_wire_names() {
        let params = ListPaymentsParams {
            start_date: Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()),
            end_date: None,
            page_number: Some(2),
            page_size: Some(25),
        };

        let query = params.to_query();

        assert_eq!(
            query,
            vec![
                ("startDate", "2025-01-01T00:00:00+00:00".to_string()),
                ("pageNumber", "2".to_string()),
                ("pageSize", "25".to_string()),
            ]
        );
    }

    #[test]
    fn test_api_error_status() {
        let err = ClientError::Api {
            status: 409,
            message: "duplicate".into(),
        };
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.to_string(), "API error: 409 - duplicate");
    }
}
