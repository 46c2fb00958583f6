//! PostgreSQL repository adapter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use payments_types::{PagedResult, Payment, PaymentId, PaymentRepository, RepoError};

use crate::types::{DbPgPayment, db_error};

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository. Each statement runs in its own implicit transaction.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

/// Runs all database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_payments_pg.sql"),
        "0001",
    )
    .await
}

impl PostgresRepo {
    /// Creates a new PostgreSQL repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the database schema (for testing with existing pool).
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        run_migrations(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl PaymentRepository for PostgresRepo {
    async fn save(&self, payment: Payment) -> Result<Payment, RepoError> {
        sqlx::query(
            r#"INSERT INTO payments (id, client_identifier, amount, description, created_at, status)
               VALUES ($1, $2, $3, $4, $5, $6)"#,
        )
        .bind(payment.id().into_uuid())
        .bind(payment.client_identifier())
        .bind(payment.amount())
        .bind(payment.description())
        .bind(payment.created_at())
        .bind(payment.status().as_str())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(payment)
    }

    async fn get_by_id(&self, id: PaymentId) -> Result<Option<Payment>, RepoError> {
        let row: Option<DbPgPayment> = sqlx::query_as(
            r#"SELECT id, client_identifier, amount, description, created_at, status
               FROM payments WHERE id = $1"#,
        )
        .bind(id.into_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(DbPgPayment::into_domain).transpose()
    }

    async fn get_by_client_identifier(
        &self,
        client_identifier: &str,
    ) -> Result<Option<Payment>, RepoError> {
        let row: Option<DbPgPayment> = sqlx::query_as(
            r#"SELECT id, client_identifier, amount, description, created_at, status
               FROM payments WHERE client_identifier = $1"#,
        )
        .bind(client_identifier)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(DbPgPayment::into_domain).transpose()
    }

    async fn update(&self, payment: Payment) -> Result<Payment, RepoError> {
        let result = sqlx::query(
            r#"UPDATE payments
               SET client_identifier = $2, amount = $3, description = $4, created_at = $5, status = $6
               WHERE id = $1"#,
        )
        .bind(payment.id().into_uuid())
        .bind(payment.client_identifier())
        .bind(payment.amount())
        .bind(payment.description())
        .bind(payment.created_at())
        .bind(payment.status().as_str())
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
        let total: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM payments WHERE created_at >= $1 AND created_at <= $2"#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        let offset = PagedResult::<Payment>::offset(page_number, page_size);

        let rows: Vec<DbPgPayment> = sqlx::query_as(
            r#"SELECT id, client_identifier, amount, description, created_at, status
               FROM payments
               WHERE created_at >= $1 AND created_at <= $2
               ORDER BY created_at DESC
               LIMIT $3 OFFSET $4"#,
        )
        .bind(start)
        .bind(end)
        .bind(i64::from(page_size))
        .bind(i64::try_from(offset).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        let items = rows
            .into_iter()
            .map(DbPgPayment::into_domain)
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
