use thiserror::Error;

use crate::store::AtomicError;

#[derive(Error, Debug)]
pub enum TransferError {
    #[error("source and destination accounts are the same")]
    SameAccount,

    #[error("transfer amount must be positive, got {0}")]
    NonPositiveAmount(i64),

    #[error("account {0} not found")]
    AccountNotFound(i64),

    #[error(
        "account {account_id} has insufficient balance: {balance} available, {amount} requested"
    )]
    InsufficientBalance {
        account_id: i64,
        balance: i64,
        amount: i64,
    },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("transfer aborted: {cause}; rollback also failed: {rollback}")]
    RollbackFailed {
        cause: Box<TransferError>,
        rollback: sqlx::Error,
    },
}

impl TransferError {
    /// True for requests the caller got wrong, as opposed to storage faults.
    pub fn is_invalid_request(&self) -> bool {
        matches!(
            self,
            TransferError::SameAccount
                | TransferError::NonPositiveAmount(_)
                | TransferError::InsufficientBalance { .. }
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, TransferError::AccountNotFound(_))
    }
}

impl AtomicError for TransferError {
    fn rollback_failed(cause: Self, rollback: sqlx::Error) -> Self {
        TransferError::RollbackFailed {
            cause: Box::new(cause),
            rollback,
        }
    }
}
