use crate::store::Database;
use crate::transfer::TransferService;

/// Shared gateway state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL ledger store
    pub db: Database,
    /// Transfer engine, carrying the configured policy
    pub transfers: TransferService,
}

impl AppState {
    pub fn new(db: Database, transfers: TransferService) -> Self {
        Self { db, transfers }
    }
}
