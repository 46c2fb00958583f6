//! Shared database row types and error classification for the SQL adapters.

use sqlx::FromRow;

use payments_types::{Payment, PaymentId, PaymentStatus, RepoError};

// ─────────────────────────────────────────────────────────────────────────────
// Error classification
// ─────────────────────────────────────────────────────────────────────────────

/// Sorts a driver error into the repository taxonomy.
///
/// Connectivity faults become `Unavailable`, unique-index violations become
/// `Conflict`, everything else is a plain `Database` error.
pub fn db_error(err: sqlx::Error) -> RepoError {
    match err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => RepoError::Unavailable(err.to_string()),
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepoError::Conflict(db.message().to_string())
        }
        other => RepoError::Database(other.to_string()),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Database row structs (derive FromRow for automatic mapping)
// ─────────────────────────────────────────────────────────────────────────────

/// Payment row as stored by SQLite (text columns throughout).
#[cfg(feature = "sqlite")]
#[derive(FromRow)]
pub struct DbSqlitePayment {
    pub id: String,
    pub client_identifier: String,
    pub amount: String,
    pub description: String,
    pub created_at: String,
    pub status: String,
}

/// Payment row as stored by PostgreSQL.
#[cfg(feature = "postgres")]
#[derive(FromRow)]
pub struct DbPgPayment {
    pub id: uuid::Uuid,
    pub client_identifier: String,
    pub amount: rust_decimal::Decimal,
    pub description: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub status: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Parsing helpers
// ─────────────────────────────────────────────────────────────────────────────

pub fn parse_status(s: &str) -> Result<PaymentStatus, RepoError> {
    s.parse::<PaymentStatus>().map_err(RepoError::Domain)
}

/// Fixed-width RFC 3339 so that text comparison orders like time.
#[cfg(feature = "sqlite")]
pub fn sqlite_timestamp(dt: chrono::DateTime<chrono::Utc>) -> String {
    dt.to_rfc3339_opts(chrono::SecondsFormat::Nanos, true)
}

// ─────────────────────────────────────────────────────────────────────────────
// Domain conversion
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(feature = "sqlite")]
impl DbSqlitePayment {
    /// Convert database row to domain Payment.
    pub fn into_domain(self) -> Result<Payment, RepoError> {
        let id = uuid::Uuid::parse_str(&self.id).map_err(|e| RepoError::Database(e.to_string()))?;
        let amount = self
            .amount
            .parse::<rust_decimal::Decimal>()
            .map_err(|e| RepoError::Database(e.to_string()))?;
        let created_at = chrono::DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| RepoError::Database(e.to_string()))?
            .with_timezone(&chrono::Utc);

        Ok(Payment::from_parts(
            PaymentId::from_uuid(id),
            self.client_identifier,
            amount,
            self.description,
            created_at,
            parse_status(&self.status)?,
        ))
    }
}

#[cfg(feature = "postgres")]
impl DbPgPayment {
    /// Convert database row to domain Payment.
    pub fn into_domain(self) -> Result<Payment, RepoError> {
        Ok(Payment::from_parts(
            PaymentId::from_uuid(self.id),
            self.client_identifier,
            self.amount,
            self.description,
            self.created_at,
            parse_status(&self.status)?,
        ))
    }
}
