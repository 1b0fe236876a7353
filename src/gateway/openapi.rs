//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::OpenApi;

use crate::gateway::handlers::HealthResponse;
use crate::gateway::types::{CreateAccountRequest, CreateTransferRequest, ListAccountsQuery};
use crate::store::{Account, Entry, Transfer};
use crate::transfer::TransferResult;

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ledgerd API",
        version = "1.0.0",
        description = "Double-entry ledger service: accounts, entries, and atomic account-to-account transfers.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health_check,
        crate::gateway::handlers::create_account,
        crate::gateway::handlers::get_account,
        crate::gateway::handlers::list_accounts,
        crate::gateway::handlers::create_transfer,
        crate::gateway::handlers::get_transfer,
    ),
    components(
        schemas(
            HealthResponse,
            Account,
            Entry,
            Transfer,
            TransferResult,
            CreateAccountRequest,
            CreateTransferRequest,
            ListAccountsQuery,
        )
    ),
    tags(
        (name = "Account", description = "Account creation and queries"),
        (name = "Transfer", description = "Atomic fund transfers between accounts"),
        (name = "System", description = "Health checks and system info")
    )
)]
pub struct ApiDoc;
