//! Concurrency and atomicity tests for the transfer engine.
//!
//! These run real transactions against PostgreSQL and are ignored by
//! default; run them with `cargo test -- --ignored` against a database with
//! db/schema.sql loaded.

mod common;

use std::collections::HashSet;

use ledgerd::store::{AccountRepository, EntryRepository};
use ledgerd::transfer::{TransferError, TransferParams, TransferPolicy, TransferService};

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn concurrent_transfers_commit_in_distinct_ranks() {
    let pool = common::connect().await;
    let account1 = common::create_funded_account(&pool, 1000).await;
    let account2 = common::create_funded_account(&pool, 1000).await;

    let n: i64 = 10;
    let amount: i64 = 10;

    let mut handles = Vec::new();
    for _ in 0..n {
        let pool = pool.clone();
        let params = TransferParams {
            from_account_id: account1.id,
            to_account_id: account2.id,
            amount,
        };
        handles.push(tokio::spawn(async move {
            TransferService::default().execute(&pool, params).await
        }));
    }

    let mut seen_ranks = HashSet::new();
    for handle in handles {
        let result = handle
            .await
            .expect("Task should not panic")
            .expect("Transfer should commit");

        let transfer = &result.transfer;
        assert_eq!(transfer.from_account_id, account1.id);
        assert_eq!(transfer.to_account_id, account2.id);
        assert_eq!(transfer.amount, amount);
        assert!(transfer.id > 0);

        // Both entries must be durably visible outside the transaction.
        let from_entry = EntryRepository::get(&pool, result.from_entry.id)
            .await
            .expect("Should query entry")
            .expect("Debit entry should exist");
        assert_eq!(from_entry.account_id, account1.id);
        assert_eq!(from_entry.amount, -amount);

        let to_entry = EntryRepository::get(&pool, result.to_entry.id)
            .await
            .expect("Should query entry")
            .expect("Credit entry should exist");
        assert_eq!(to_entry.account_id, account2.id);
        assert_eq!(to_entry.amount, amount);

        // Conservation: what left one account arrived at the other.
        let diff_from = account1.balance - result.from_account.balance;
        let diff_to = result.to_account.balance - account2.balance;
        assert_eq!(diff_from, diff_to);
        assert!(diff_from > 0);
        assert_eq!(diff_from % amount, 0);

        // Each committed transfer observes a distinct cumulative delta.
        let k = diff_from / amount;
        assert!((1..=n).contains(&k));
        assert!(seen_ranks.insert(k), "rank {} observed twice", k);
    }
    assert_eq!(seen_ranks.len(), n as usize);

    let updated1 = AccountRepository::get(&pool, account1.id)
        .await
        .expect("Should query account")
        .expect("Account should exist");
    let updated2 = AccountRepository::get(&pool, account2.id)
        .await
        .expect("Should query account")
        .expect("Account should exist");

    assert_eq!(updated1.balance, account1.balance - n * amount);
    assert_eq!(updated2.balance, account2.balance + n * amount);
}

#[tokio::test]
#[ignore]
async fn opposing_transfers_do_not_deadlock() {
    let pool = common::connect().await;
    let account1 = common::create_funded_account(&pool, 1000).await;
    let account2 = common::create_funded_account(&pool, 1000).await;

    let n = 10;
    let amount: i64 = 10;

    // Half the calls transfer 1 -> 2, half 2 -> 1. Without the fixed
    // lock order these would deadlock pairwise inside the store.
    let mut handles = Vec::new();
    for i in 0..n {
        let (from_account_id, to_account_id) = if i % 2 == 1 {
            (account2.id, account1.id)
        } else {
            (account1.id, account2.id)
        };
        let pool = pool.clone();
        let params = TransferParams {
            from_account_id,
            to_account_id,
            amount,
        };
        handles.push(tokio::spawn(async move {
            TransferService::default().execute(&pool, params).await
        }));
    }

    for handle in handles {
        handle
            .await
            .expect("Task should not panic")
            .expect("Transfer should commit");
    }

    // Symmetric amounts: both balances return to their starting values.
    let updated1 = AccountRepository::get(&pool, account1.id)
        .await
        .expect("Should query account")
        .expect("Account should exist");
    let updated2 = AccountRepository::get(&pool, account2.id)
        .await
        .expect("Should query account")
        .expect("Account should exist");

    assert_eq!(updated1.balance, account1.balance);
    assert_eq!(updated2.balance, account2.balance);
}

#[tokio::test]
#[ignore]
async fn rejected_requests_touch_nothing() {
    let pool = common::connect().await;
    let account = common::create_funded_account(&pool, 100).await;

    let service = TransferService::default();

    let same_account = service
        .execute(
            &pool,
            TransferParams {
                from_account_id: account.id,
                to_account_id: account.id,
                amount: 10,
            },
        )
        .await;
    assert!(matches!(same_account, Err(TransferError::SameAccount)));

    let zero_amount = service
        .execute(
            &pool,
            TransferParams {
                from_account_id: account.id,
                to_account_id: account.id + 1,
                amount: 0,
            },
        )
        .await;
    assert!(matches!(
        zero_amount,
        Err(TransferError::NonPositiveAmount(0))
    ));

    let unknown_account = service
        .execute(
            &pool,
            TransferParams {
                from_account_id: account.id,
                to_account_id: i64::MAX,
                amount: 10,
            },
        )
        .await;
    assert!(matches!(
        unknown_account,
        Err(TransferError::AccountNotFound(id)) if id == i64::MAX
    ));

    // No balance change and no ledger lines for the account.
    let unchanged = AccountRepository::get(&pool, account.id)
        .await
        .expect("Should query account")
        .expect("Account should exist");
    assert_eq!(unchanged.balance, account.balance);

    let entries = EntryRepository::list_by_account(&pool, account.id, 10, 0)
        .await
        .expect("Should list entries");
    assert!(entries.is_empty());
}

#[tokio::test]
#[ignore]
async fn overdraft_rejection_rolls_back_everything() {
    let pool = common::connect().await;
    let poor = common::create_funded_account(&pool, 5).await;
    let rich = common::create_funded_account(&pool, 1000).await;

    let service = TransferService::new(TransferPolicy {
        reject_overdraft: true,
    });

    let result = service
        .execute(
            &pool,
            TransferParams {
                from_account_id: poor.id,
                to_account_id: rich.id,
                amount: 10,
            },
        )
        .await;

    match result {
        Err(TransferError::InsufficientBalance {
            account_id,
            balance,
            amount,
        }) => {
            assert_eq!(account_id, poor.id);
            assert_eq!(balance, 5);
            assert_eq!(amount, 10);
        }
        other => panic!("Expected InsufficientBalance, got {:?}", other.map(|_| ())),
    }

    // The whole unit rolled back: balances unchanged, no entries on either
    // account.
    for account in [&poor, &rich] {
        let current = AccountRepository::get(&pool, account.id)
            .await
            .expect("Should query account")
            .expect("Account should exist");
        assert_eq!(current.balance, account.balance);

        let entries = EntryRepository::list_by_account(&pool, account.id, 10, 0)
            .await
            .expect("Should list entries");
        assert!(entries.is_empty());
    }
}

#[tokio::test]
#[ignore]
async fn overdraft_allowed_by_default() {
    let pool = common::connect().await;
    let poor = common::create_funded_account(&pool, 5).await;
    let rich = common::create_funded_account(&pool, 1000).await;

    let result = TransferService::default()
        .execute(
            &pool,
            TransferParams {
                from_account_id: poor.id,
                to_account_id: rich.id,
                amount: 10,
            },
        )
        .await
        .expect("Default policy should allow overdraft");

    assert_eq!(result.from_account.balance, -5);
    assert_eq!(result.to_account.balance, 1010);
}
