//! Account handlers (create, get, list)

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use validator::Validate;

use super::super::state::AppState;
use super::super::types::{ApiError, ApiResult, CreateAccountRequest, ListAccountsQuery, ok};
use crate::store::{Account, AccountRepository};

/// Create a new account
///
/// POST /accounts
///
/// New accounts start with a zero balance; funds only move through the
/// transfer engine.
#[utoipa::path(
    post,
    path = "/accounts",
    request_body = CreateAccountRequest,
    responses(
        (status = 200, description = "Account created", body = Account, content_type = "application/json"),
        (status = 400, description = "Invalid owner or currency"),
        (status = 406, description = "Store rejected the insert")
    ),
    tag = "Account"
)]
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateAccountRequest>,
) -> ApiResult<Account> {
    if let Err(e) = req.validate() {
        return ApiError::bad_request(e.to_string()).into_err();
    }

    match AccountRepository::create(state.db.pool(), &req.owner, 0, &req.currency).await {
        Ok(account) => ok(account),
        Err(e) => {
            tracing::error!("Account creation failed: {}", e);
            ApiError::not_acceptable(format!("account not created: {}", e)).into_err()
        }
    }
}

/// Get an account by id
///
/// GET /accounts/{id}
#[utoipa::path(
    get,
    path = "/accounts/{id}",
    params(
        ("id" = i64, Path, description = "Account id")
    ),
    responses(
        (status = 200, description = "Account found", body = Account, content_type = "application/json"),
        (status = 400, description = "Invalid account id"),
        (status = 404, description = "Account not found"),
        (status = 500, description = "Storage failure")
    ),
    tag = "Account"
)]
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Account> {
    if id < 1 {
        return ApiError::bad_request("account id must be >= 1").into_err();
    }

    match AccountRepository::get(state.db.pool(), id).await {
        Ok(Some(account)) => ok(account),
        Ok(None) => ApiError::not_found(format!("account {} not found", id)).into_err(),
        Err(e) => ApiError::db_error(format!("Query failed: {}", e)).into_err(),
    }
}

/// List accounts, paginated
///
/// GET /accounts?limit=5&offset=0
#[utoipa::path(
    get,
    path = "/accounts",
    params(
        ("limit" = i64, Query, description = "Page size (1..=100)"),
        ("offset" = i64, Query, description = "Rows to skip")
    ),
    responses(
        (status = 200, description = "Accounts page", body = [Account], content_type = "application/json"),
        (status = 400, description = "Invalid pagination parameters"),
        (status = 500, description = "Storage failure")
    ),
    tag = "Account"
)]
pub async fn list_accounts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListAccountsQuery>,
) -> ApiResult<Vec<Account>> {
    if let Err(e) = query.validate() {
        return ApiError::bad_request(e.to_string()).into_err();
    }

    match AccountRepository::list(state.db.pool(), query.limit, query.offset).await {
        Ok(accounts) => ok(accounts),
        Err(e) => ApiError::db_error(format!("Query failed: {}", e)).into_err(),
    }
}
