//! SQLite repository adapter.
#![allow(clippy::collapsible_if)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::str::FromStr;

use payments_types::{PagedResult, Payment, PaymentId, PaymentRepository, RepoError};

use crate::types::{DbSqlitePayment, db_error, sqlite_timestamp};

const PAYMENT_COLUMNS: &str = "id, client_identifier, amount, description, created_at, status";

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
///
/// Timestamps are stored as fixed-width RFC 3339 text and amounts as decimal
/// text, so range filters and ordering work on plain string comparison.
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        let repo = Self { pool };
        repo.create_schema().await?;
        Ok(repo)
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the database schema (for testing with existing pool).
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        let ddl = include_str!("../migrations/0001_create_payments.sql");
        sqlx::query(ddl)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl PaymentRepository for SqliteRepo {
    async fn save(&self, payment: Payment) -> Result<Payment, RepoError> {
        sqlx::query(
            r#"INSERT INTO payments (id, client_identifier, amount, description, created_at, status)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(payment.id().to_string())
        .bind(payment.client_identifier())
        .bind(payment.amount().to_string())
        .bind(payment.description())
        .bind(sqlite_timestamp(payment.created_at()))
        .bind(payment.status().as_str())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(payment)
    }

    async fn get_by_id(&self, id: PaymentId) -> Result<Option<Payment>, RepoError> {
        let row: Option<DbSqlitePayment> = sqlx::query_as(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE id = ?"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(DbSqlitePayment::into_domain).transpose()
    }

    async fn get_by_client_identifier(
        &self,
        client_identifier: &str,
    ) -> Result<Option<Payment>, RepoError> {
        let row: Option<DbSqlitePayment> = sqlx::query_as(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE client_identifier = ?"
        ))
        .bind(client_identifier)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(DbSqlitePayment::into_domain).transpose()
    }

    async fn update(&self, payment: Payment) -> Result<Payment, RepoError> {
        let result = sqlx::query(
            r#"UPDATE payments
               SET client_identifier = ?, amount = ?, description = ?, created_at = ?, status = ?
               WHERE id = ?"#,
        )
        .bind(payment.client_identifier())
        .bind(payment.amount().to_string())
        .bind(payment.description())
        .bind(sqlite_timestamp(payment.created_at()))
        .bind(payment.status().as_str())
        .bind(payment.id().to_string())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
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
        let start = sqlite_timestamp(start);
        let end = sqlite_timestamp(end);

        let total: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM payments WHERE created_at >= ? AND created_at <= ?"#,
        )
        .bind(&start)
        .bind(&end)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        let offset = PagedResult::<Payment>::offset(page_number, page_size);

        let rows: Vec<DbSqlitePayment> = sqlx::query_as(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments
             WHERE created_at >= ? AND created_at <= ?
             ORDER BY created_at DESC
             LIMIT ? OFFSET ?"
        ))
        .bind(&start)
        .bind(&end)
        .bind(i64::from(page_size))
        .bind(i64::try_from(offset).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        let items = rows
            .into_iter()
            .map(DbSqlitePayment::into_domain)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(total, returned = items.len(), page_number, page_size, "paged query");

        Ok(PagedResult::new(
            items,
            page_number,
            page_size,
            total.max(0) as u64,
        ))
    }
}
