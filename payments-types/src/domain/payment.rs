//! Payment domain model.

use chrono::{DateTime, SubsecRound, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::DomainError;

/// Unique identifier for a Payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct PaymentId(Uuid);

impl PaymentId {
    /// Creates a new random PaymentId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a PaymentId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Returns the UUID value.
    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for PaymentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PaymentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PaymentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Lifecycle state of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Registered by the receive use case
    Received,
    /// Awaiting an external decision; never produced by this service
    Pending,
    /// Terminal: no transition leaves this state
    Cancelled,
}

impl PaymentStatus {
    /// Returns true if a payment in `self` may move to `next`.
    ///
    /// Staying in the same state is always allowed, which keeps cancel idempotent.
    pub fn can_transition_to(self, next: PaymentStatus) -> bool {
        use PaymentStatus::*;
        match (self, next) {
            (from, to) if from == to => true,
            (_, Cancelled) => true,
            (Received, Pending) => true,
            _ => false,
        }
    }

    /// Storage and wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Received => "RECEIVED",
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RECEIVED" => Ok(PaymentStatus::Received),
            "PENDING" => Ok(PaymentStatus::Pending),
            "CANCELLED" => Ok(PaymentStatus::Cancelled),
            other => Err(DomainError::UnknownStatus(other.to_string())),
        }
    }
}

/// A payment event submitted by an external client.
///
/// `id` and `created_at` are assigned once at construction; there is no way
/// to change them afterwards. `status` only moves through [`Payment::transition_to`].
#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    id: PaymentId,
    client_identifier: String,
    amount: Decimal,
    description: String,
    created_at: DateTime<Utc>,
    status: PaymentStatus,
}

impl Payment {
    /// Creates a freshly received payment stamped with the current UTC time.
    ///
    /// The timestamp is truncated to whole microseconds, the finest precision
    /// every store keeps, so the returned value equals what is read back.
    /// The amount is taken as-is; sign and magnitude checks are left to callers.
    pub fn receive(client_identifier: String, amount: Decimal, description: String) -> Self {
        Self {
            id: PaymentId::new(),
            client_identifier,
            amount,
            description,
            created_at: Utc::now().trunc_subsecs(6),
            status: PaymentStatus::Received,
        }
    }

    /// Reconstructs a payment from stored fields.
    pub fn from_parts(
        id: PaymentId,
        client_identifier: String,
        amount: Decimal,
        description: String,
        created_at: DateTime<Utc>,
        status: PaymentStatus,
    ) -> Self {
        Self {
            id,
            client_identifier,
            amount,
            description,
            created_at,
            status,
        }
    }

    pub fn id(&self) -> PaymentId {
        self.id
    }

    pub fn client_identifier(&self) -> &str {
        &self.client_identifier
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    /// Moves the payment to `next` if the transition table allows it.
    pub fn transition_to(&mut self, next: PaymentStatus) -> Result<(), DomainError> {
        if !self.status.can_transition_to(next) {
            return Err(DomainError::InvalidStatusTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }

    /// Marks the payment as cancelled. Cancelling twice is a no-op.
    pub fn cancel(&mut self) -> Result<(), DomainError> {
        self.transition_to(PaymentStatus::Cancelled)
    }
}
