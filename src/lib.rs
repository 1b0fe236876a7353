//! ledgerd - double-entry ledger service
//!
//! Stores accounts, records ledger entries, and moves funds between accounts
//! atomically over PostgreSQL.
//!
//! # Modules
//!
//! - [`store`] - PostgreSQL ledger store: row types, repositories, and the
//!   generic atomic-unit executor
//! - [`transfer`] - the atomic transfer engine (the concurrency core)
//! - [`gateway`] - axum HTTP service boundary
//! - [`config`] - YAML application configuration
//! - [`logging`] - tracing subscriber setup

pub mod config;
pub mod gateway;
pub mod logging;
pub mod store;
pub mod transfer;

// Convenient re-exports at crate root
pub use store::{
    Account, AccountRepository, Database, Entry, EntryRepository, Transfer, TransferRepository,
};
pub use transfer::{
    TransferError, TransferParams, TransferPolicy, TransferResult, TransferService,
};
