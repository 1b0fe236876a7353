//! ledgerd - double-entry ledger service
//!
//! Entry point: load config, bring up logging, connect to PostgreSQL, and
//! serve the HTTP gateway.

use std::sync::Arc;

use ledgerd::config::AppConfig;
use ledgerd::gateway::{self, state::AppState};
use ledgerd::store::Database;
use ledgerd::transfer::{TransferPolicy, TransferService};

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let mut config = AppConfig::load(&env);
    if let Some(port) = get_port_override() {
        config.gateway.port = port;
    }

    let _log_guard = ledgerd::logging::init_logging(&config);

    tracing::info!(
        "Starting ledgerd {} ({}) in {} mode",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env
    );

    let db = Database::connect(&config.postgres_url).await?;

    let transfers = TransferService::new(TransferPolicy {
        reject_overdraft: config.transfer.reject_overdraft,
    });
    if config.transfer.reject_overdraft {
        tracing::info!("Overdraft rejection enabled");
    }

    let state = Arc::new(AppState::new(db, transfers));
    gateway::run_server(&config.gateway, state).await
}
