//! Atomic transfer engine
//!
//! Moves funds between two accounts as one transaction: the transfer row,
//! both ledger entries, and both balance updates commit or roll back
//! together. Safe under arbitrary concurrent invocation, including calls
//! racing on the same pair of accounts in opposite directions.

pub mod error;
pub mod service;

pub use error::TransferError;
pub use service::{TransferParams, TransferPolicy, TransferResult, TransferService};
