//! Transfer handlers

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use super::super::state::AppState;
use super::super::types::{ApiError, ApiResult, CreateTransferRequest, error_codes, ok};
use crate::store::{Transfer, TransferRepository};
use crate::transfer::{TransferError, TransferParams, TransferResult};

/// Execute a transfer between two accounts
///
/// POST /transfers
///
/// The transfer row, both ledger entries, and both balance updates commit
/// atomically; on any failure nothing persists.
#[utoipa::path(
    post,
    path = "/transfers",
    request_body = CreateTransferRequest,
    responses(
        (status = 200, description = "Transfer committed", body = TransferResult, content_type = "application/json"),
        (status = 400, description = "Invalid request (equal accounts, non-positive amount, insufficient balance)"),
        (status = 404, description = "Account not found"),
        (status = 500, description = "Storage failure")
    ),
    tag = "Transfer"
)]
pub async fn create_transfer(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateTransferRequest>,
) -> ApiResult<TransferResult> {
    if let Err(e) = req.validate() {
        return ApiError::bad_request(e.to_string()).into_err();
    }

    let params = TransferParams {
        from_account_id: req.from_account_id,
        to_account_id: req.to_account_id,
        amount: req.amount,
    };

    match state.transfers.execute(state.db.pool(), params).await {
        Ok(result) => ok(result),
        Err(err @ TransferError::AccountNotFound(_)) => {
            ApiError::not_found(err.to_string()).into_err()
        }
        Err(err @ TransferError::InsufficientBalance { .. }) => ApiError::new(
            StatusCode::BAD_REQUEST,
            error_codes::INSUFFICIENT_BALANCE,
            err.to_string(),
        )
        .into_err(),
        Err(err) if err.is_invalid_request() => ApiError::bad_request(err.to_string()).into_err(),
        Err(err @ TransferError::RollbackFailed { .. }) => {
            // Rollback failure is the one per-request alarm condition.
            tracing::error!("Transfer rollback failed: {}", err);
            ApiError::internal(err.to_string()).into_err()
        }
        Err(err) => {
            tracing::error!("Transfer failed: {}", err);
            ApiError::db_error(err.to_string()).into_err()
        }
    }
}

/// Get a transfer by id
///
/// GET /transfers/{id}
#[utoipa::path(
    get,
    path = "/transfers/{id}",
    params(
        ("id" = i64, Path, description = "Transfer id")
    ),
    responses(
        (status = 200, description = "Transfer found", body = Transfer, content_type = "application/json"),
        (status = 400, description = "Invalid transfer id"),
        (status = 404, description = "Transfer not found"),
        (status = 500, description = "Storage failure")
    ),
    tag = "Transfer"
)]
pub async fn get_transfer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Transfer> {
    if id < 1 {
        return ApiError::bad_request("transfer id must be >= 1").into_err();
    }

    match TransferRepository::get(state.db.pool(), id).await {
        Ok(Some(transfer)) => ok(transfer),
        Ok(None) => ApiError::not_found(format!("transfer {} not found", id)).into_err(),
        Err(e) => ApiError::db_error(format!("Query failed: {}", e)).into_err(),
    }
}
