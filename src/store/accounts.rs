//! Account row CRUD

use super::models::Account;
use sqlx::PgExecutor;

/// Account repository
pub struct AccountRepository;

impl AccountRepository {
    /// Create a new account
    pub async fn create(
        db: impl PgExecutor<'_>,
        owner: &str,
        balance: i64,
        currency: &str,
    ) -> Result<Account, sqlx::Error> {
        sqlx::query_as(
            r#"INSERT INTO accounts (owner, balance, currency)
               VALUES ($1, $2, $3)
               RETURNING id, owner, balance, currency, created_at"#,
        )
        .bind(owner)
        .bind(balance)
        .bind(currency)
        .fetch_one(db)
        .await
    }

    /// Get account by ID
    pub async fn get(db: impl PgExecutor<'_>, id: i64) -> Result<Option<Account>, sqlx::Error> {
        sqlx::query_as(
            r#"SELECT id, owner, balance, currency, created_at
               FROM accounts WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// List accounts ordered by id
    pub async fn list(
        db: impl PgExecutor<'_>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Account>, sqlx::Error> {
        sqlx::query_as(
            r#"SELECT id, owner, balance, currency, created_at
               FROM accounts ORDER BY id LIMIT $1 OFFSET $2"#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
    }

    /// Set an account's balance to an absolute value
    pub async fn update_balance(
        db: impl PgExecutor<'_>,
        id: i64,
        balance: i64,
    ) -> Result<Option<Account>, sqlx::Error> {
        sqlx::query_as(
            r#"UPDATE accounts SET balance = $1 WHERE id = $2
               RETURNING id, owner, balance, currency, created_at"#,
        )
        .bind(balance)
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Apply a signed delta to an account's balance and return the updated
    /// row. The UPDATE takes the row lock; the transfer engine relies on that
    /// when it orders its two balance updates.
    pub async fn add_balance(
        db: impl PgExecutor<'_>,
        id: i64,
        delta: i64,
    ) -> Result<Option<Account>, sqlx::Error> {
        sqlx::query_as(
            r#"UPDATE accounts SET balance = balance + $1 WHERE id = $2
               RETURNING id, owner, balance, currency, created_at"#,
        )
        .bind(delta)
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Delete an account. Returns false if no row existed.
    pub async fn delete(db: impl PgExecutor<'_>, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
