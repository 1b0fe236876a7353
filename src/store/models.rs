//! Row types for the ledger store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============================================================================
// Currencies
// ============================================================================
pub mod currency {
    pub const USD: &str = "USD";
    pub const EUR: &str = "EUR";
    pub const CAD: &str = "CAD";

    pub const SUPPORTED: [&str; 3] = [USD, EUR, CAD];

    pub fn is_supported(code: &str) -> bool {
        SUPPORTED.contains(&code)
    }
}

/// A funds-holding account. `balance` is the sum of all committed entry
/// amounts for this account, in minor currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Account {
    pub id: i64,
    pub owner: String,
    pub balance: i64,
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

/// One ledger line. Negative amount = debit, positive = credit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Entry {
    pub id: i64,
    pub account_id: i64,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

/// A committed funds movement between two accounts. Always recorded together
/// with its two entries and both balance updates in one transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Transfer {
    pub id: i64,
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}
