//! Transfer orchestration
//!
//! `TransferService::execute` is the only write path for transfers. Each call
//! is stateless end to end: validate, check both accounts exist, then run the
//! five-operation bundle (transfer row, debit entry, credit entry, two
//! balance updates) inside one atomic unit. All contention is resolved by
//! the store's row locks; the service caches nothing between calls.

use serde::Serialize;
use sqlx::PgPool;
use utoipa::ToSchema;

use super::error::TransferError;
use crate::store::{
    Account, AccountRepository, Entry, EntryRepository, PgTransaction, Transfer,
    TransferRepository, run_atomic,
};

/// A requested funds movement. `amount` is in minor currency units.
#[derive(Debug, Clone, Copy)]
pub struct TransferParams {
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount: i64,
}

/// Everything a committed transfer produced: the transfer row, its two
/// ledger entries, and both account snapshots as of the commit.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TransferResult {
    pub transfer: Transfer,
    pub from_entry: Entry,
    pub to_entry: Entry,
    pub from_account: Account,
    pub to_account: Account,
}

/// Orchestrator-boundary policy. The ledger itself never enforces a
/// non-negative balance; overdraft rejection is opt-in.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransferPolicy {
    pub reject_overdraft: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TransferService {
    policy: TransferPolicy,
}

impl TransferService {
    pub fn new(policy: TransferPolicy) -> Self {
        Self { policy }
    }

    /// Reject malformed requests before any storage interaction.
    pub fn validate(params: &TransferParams) -> Result<(), TransferError> {
        if params.from_account_id == params.to_account_id {
            return Err(TransferError::SameAccount);
        }
        if params.amount <= 0 {
            return Err(TransferError::NonPositiveAmount(params.amount));
        }
        Ok(())
    }

    /// Execute a transfer as one atomic unit.
    ///
    /// On success the transfer row, both entries, and both balance updates
    /// are committed together; on any failure none of them persist. The
    /// service never retries; retry policy belongs to the caller.
    pub async fn execute(
        &self,
        pool: &PgPool,
        params: TransferParams,
    ) -> Result<TransferResult, TransferError> {
        Self::validate(&params)?;

        // Unknown ids are rejected before a transaction is opened.
        for id in [params.from_account_id, params.to_account_id] {
            AccountRepository::get(pool, id)
                .await?
                .ok_or(TransferError::AccountNotFound(id))?;
        }

        let TransferParams {
            from_account_id,
            to_account_id,
            amount,
        } = params;
        let reject_overdraft = self.policy.reject_overdraft;

        run_atomic(pool, move |tx| {
            Box::pin(async move {
                let transfer =
                    TransferRepository::create(&mut **tx, from_account_id, to_account_id, amount)
                        .await?;
                let from_entry =
                    EntryRepository::create(&mut **tx, from_account_id, -amount).await?;
                let to_entry = EntryRepository::create(&mut **tx, to_account_id, amount).await?;

                // Each UPDATE takes the account's row lock. Always touch the
                // lower account id first, regardless of transfer direction,
                // so every concurrent unit acquires the two locks in the same
                // total order and a circular wait cannot form.
                let (from_account, to_account) = if from_account_id < to_account_id {
                    let from_account = apply_delta(tx, from_account_id, -amount).await?;
                    let to_account = apply_delta(tx, to_account_id, amount).await?;
                    (from_account, to_account)
                } else {
                    let to_account = apply_delta(tx, to_account_id, amount).await?;
                    let from_account = apply_delta(tx, from_account_id, -amount).await?;
                    (from_account, to_account)
                };

                if reject_overdraft && from_account.balance < 0 {
                    return Err(TransferError::InsufficientBalance {
                        account_id: from_account_id,
                        balance: from_account.balance + amount,
                        amount,
                    });
                }

                Ok(TransferResult {
                    transfer,
                    from_entry,
                    to_entry,
                    from_account,
                    to_account,
                })
            })
        })
        .await
    }
}

/// Apply a signed delta inside the transaction, reading back the post-update
/// snapshot. A missing row means the account was deleted after the pre-check;
/// surfacing not-found here aborts the whole unit.
async fn apply_delta(
    tx: &mut PgTransaction,
    account_id: i64,
    delta: i64,
) -> Result<Account, TransferError> {
    AccountRepository::add_balance(&mut **tx, account_id, delta)
        .await?
        .ok_or(TransferError::AccountNotFound(account_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_same_account() {
        let params = TransferParams {
            from_account_id: 3,
            to_account_id: 3,
            amount: 10,
        };
        assert!(matches!(
            TransferService::validate(&params),
            Err(TransferError::SameAccount)
        ));
    }

    #[test]
    fn test_validate_rejects_zero_amount() {
        let params = TransferParams {
            from_account_id: 1,
            to_account_id: 2,
            amount: 0,
        };
        assert!(matches!(
            TransferService::validate(&params),
            Err(TransferError::NonPositiveAmount(0))
        ));
    }

    #[test]
    fn test_validate_rejects_negative_amount() {
        let params = TransferParams {
            from_account_id: 1,
            to_account_id: 2,
            amount: -25,
        };
        assert!(matches!(
            TransferService::validate(&params),
            Err(TransferError::NonPositiveAmount(-25))
        ));
    }

    #[test]
    fn test_validate_accepts_well_formed_request() {
        let params = TransferParams {
            from_account_id: 1,
            to_account_id: 2,
            amount: 1,
        };
        assert!(TransferService::validate(&params).is_ok());
    }
}
