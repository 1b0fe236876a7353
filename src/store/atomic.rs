//! Generic atomic-unit executor
//!
//! Runs a caller-supplied unit of work inside one PostgreSQL transaction:
//! commit if the unit succeeds, roll back if it fails, and report a composite
//! fault when the rollback itself fails. The executor knows nothing about
//! what the unit does; the transfer engine is one client of it.

use futures::future::BoxFuture;
use sqlx::{PgPool, Postgres, Transaction};

/// An open transaction against the ledger store.
pub type PgTransaction = Transaction<'static, Postgres>;

/// Error type contract for units of work run through [`run_atomic`].
///
/// `From<sqlx::Error>` absorbs begin/commit failures; `rollback_failed`
/// builds the composite fault so a failed rollback is never silently
/// swallowed.
pub trait AtomicError: From<sqlx::Error> {
    fn rollback_failed(cause: Self, rollback: sqlx::Error) -> Self;
}

/// Transaction isolation level, issued as the transaction's first statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsolationLevel {
    ReadCommitted,
    RepeatableRead,
    Serializable,
}

impl IsolationLevel {
    pub fn as_sql(&self) -> &'static str {
        match self {
            IsolationLevel::ReadCommitted => "SET TRANSACTION ISOLATION LEVEL READ COMMITTED",
            IsolationLevel::RepeatableRead => "SET TRANSACTION ISOLATION LEVEL REPEATABLE READ",
            IsolationLevel::Serializable => "SET TRANSACTION ISOLATION LEVEL SERIALIZABLE",
        }
    }
}

/// Execute `unit` inside one transaction at the store's default isolation
/// level (READ COMMITTED).
///
/// On success the transaction is committed before returning; on failure it is
/// rolled back before the unit's error is returned. Dropping the returned
/// future before completion drops the transaction, which also rolls back, so
/// a cancelled call never leaves partial writes behind.
pub async fn run_atomic<T, E, F>(pool: &PgPool, unit: F) -> Result<T, E>
where
    E: AtomicError,
    F: for<'t> FnOnce(&'t mut PgTransaction) -> BoxFuture<'t, Result<T, E>>,
{
    run_atomic_with(pool, None, unit).await
}

/// Like [`run_atomic`], with an explicit isolation level.
pub async fn run_atomic_with<T, E, F>(
    pool: &PgPool,
    isolation: Option<IsolationLevel>,
    unit: F,
) -> Result<T, E>
where
    E: AtomicError,
    F: for<'t> FnOnce(&'t mut PgTransaction) -> BoxFuture<'t, Result<T, E>>,
{
    let mut tx = pool.begin().await.map_err(E::from)?;

    if let Some(level) = isolation {
        sqlx::query(level.as_sql())
            .execute(&mut *tx)
            .await
            .map_err(E::from)?;
    }

    match unit(&mut tx).await {
        Ok(value) => match tx.commit().await {
            Ok(()) => Ok(value),
            Err(e) => Err(E::from(e)),
        },
        Err(cause) => match tx.rollback().await {
            Ok(()) => Err(cause),
            Err(rollback) => Err(E::rollback_failed(cause, rollback)),
        },
    }
}
