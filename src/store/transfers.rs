//! Transfer row CRUD
//!
//! Plain row access only. A transfer is never created through this
//! repository alone in normal operation; `transfer::TransferService` wraps
//! the insert together with its entries and balance updates in one
//! transaction.

use super::models::Transfer;
use sqlx::PgExecutor;

/// Transfer repository
pub struct TransferRepository;

impl TransferRepository {
    /// Insert a transfer row
    pub async fn create(
        db: impl PgExecutor<'_>,
        from_account_id: i64,
        to_account_id: i64,
        amount: i64,
    ) -> Result<Transfer, sqlx::Error> {
        sqlx::query_as(
            r#"INSERT INTO transfers (from_account_id, to_account_id, amount)
               VALUES ($1, $2, $3)
               RETURNING id, from_account_id, to_account_id, amount, created_at"#,
        )
        .bind(from_account_id)
        .bind(to_account_id)
        .bind(amount)
        .fetch_one(db)
        .await
    }

    /// Get transfer by ID
    pub async fn get(db: impl PgExecutor<'_>, id: i64) -> Result<Option<Transfer>, sqlx::Error> {
        sqlx::query_as(
            r#"SELECT id, from_account_id, to_account_id, amount, created_at
               FROM transfers WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// List transfers ordered by id
    pub async fn list(
        db: impl PgExecutor<'_>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Transfer>, sqlx::Error> {
        sqlx::query_as(
            r#"SELECT id, from_account_id, to_account_id, amount, created_at
               FROM transfers ORDER BY id LIMIT $1 OFFSET $2"#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
    }

    /// Overwrite a transfer's amount
    pub async fn update_amount(
        db: impl PgExecutor<'_>,
        id: i64,
        amount: i64,
    ) -> Result<Option<Transfer>, sqlx::Error> {
        sqlx::query_as(
            r#"UPDATE transfers SET amount = $1 WHERE id = $2
               RETURNING id, from_account_id, to_account_id, amount, created_at"#,
        )
        .bind(amount)
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Delete a transfer. Returns false if no row existed.
    pub async fn delete(db: impl PgExecutor<'_>, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM transfers WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
