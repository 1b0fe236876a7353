//! Entry row CRUD
//!
//! Entries are append-style ledger lines. The transfer engine only ever
//! creates them; update/delete exist for CRUD completeness and are not used
//! by the transfer path.

use super::models::Entry;
use sqlx::PgExecutor;

/// Entry repository
pub struct EntryRepository;

impl EntryRepository {
    /// Create a ledger line. Negative amount = debit, positive = credit.
    pub async fn create(
        db: impl PgExecutor<'_>,
        account_id: i64,
        amount: i64,
    ) -> Result<Entry, sqlx::Error> {
        sqlx::query_as(
            r#"INSERT INTO entries (account_id, amount)
               VALUES ($1, $2)
               RETURNING id, account_id, amount, created_at"#,
        )
        .bind(account_id)
        .bind(amount)
        .fetch_one(db)
        .await
    }

    /// Get entry by ID
    pub async fn get(db: impl PgExecutor<'_>, id: i64) -> Result<Option<Entry>, sqlx::Error> {
        sqlx::query_as(
            r#"SELECT id, account_id, amount, created_at
               FROM entries WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// List entries ordered by id
    pub async fn list(
        db: impl PgExecutor<'_>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Entry>, sqlx::Error> {
        sqlx::query_as(
            r#"SELECT id, account_id, amount, created_at
               FROM entries ORDER BY id LIMIT $1 OFFSET $2"#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
    }

    /// List one account's entries ordered by id
    pub async fn list_by_account(
        db: impl PgExecutor<'_>,
        account_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Entry>, sqlx::Error> {
        sqlx::query_as(
            r#"SELECT id, account_id, amount, created_at
               FROM entries WHERE account_id = $1
               ORDER BY id LIMIT $2 OFFSET $3"#,
        )
        .bind(account_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
    }

    /// Overwrite an entry's amount
    pub async fn update_amount(
        db: impl PgExecutor<'_>,
        id: i64,
        amount: i64,
    ) -> Result<Option<Entry>, sqlx::Error> {
        sqlx::query_as(
            r#"UPDATE entries SET amount = $1 WHERE id = $2
               RETURNING id, account_id, amount, created_at"#,
        )
        .bind(amount)
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Delete an entry. Returns false if no row existed.
    pub async fn delete(db: impl PgExecutor<'_>, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM entries WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
