//! API envelope, error type, and request DTOs
//!
//! All responses share one structure: `code` (0 = success), `msg`, and
//! `data` (present only on success). Request bodies are deserialized with
//! serde and business-validated with the `validator` derive before any
//! storage interaction.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::store::currency;

// ============================================================================
// Unified API Response Format
// ============================================================================

/// Unified API response wrapper
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response code: 0 for success, non-zero for errors
    #[schema(example = 0)]
    pub code: i32,
    /// Response message
    #[schema(example = "ok")]
    pub msg: String,
    /// Response data (only present when code == 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create success response
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }
}

/// Handler result: success envelope or an `ApiError` rendered into the same
/// envelope with a non-zero code.
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// Wrap data in the success envelope
pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(data)))
}

// ============================================================================
// API Error
// ============================================================================

/// An error response: HTTP status plus the envelope's code/msg pair
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: i32,
    pub msg: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: i32, msg: impl Into<String>) -> Self {
        Self {
            status,
            code,
            msg: msg.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            error_codes::INVALID_PARAMETER,
            msg,
        )
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, error_codes::RESOURCE_NOT_FOUND, msg)
    }

    /// The store refused a write (constraint violation and the like)
    pub fn not_acceptable(msg: impl Into<String>) -> Self {
        Self::new(
            StatusCode::NOT_ACCEPTABLE,
            error_codes::STORAGE_REJECTED,
            msg,
        )
    }

    pub fn db_error(msg: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            msg,
        )
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            msg,
        )
    }

    pub fn service_unavailable(msg: impl Into<String>) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            error_codes::SERVICE_UNAVAILABLE,
            msg,
        )
    }

    /// Convenience for handler match arms
    pub fn into_err<T>(self) -> ApiResult<T> {
        Err(self)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ApiResponse::<()> {
            code: self.code,
            msg: self.msg,
            data: None,
        });
        (self.status, body).into_response()
    }
}

/// Standard API error codes
pub mod error_codes {
    // Success
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;
    pub const INSUFFICIENT_BALANCE: i32 = 1002;

    // Resource errors (4xxx)
    pub const RESOURCE_NOT_FOUND: i32 = 4001;
    pub const STORAGE_REJECTED: i32 = 4060;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const SERVICE_UNAVAILABLE: i32 = 5001;
}

// ============================================================================
// Request DTOs
// ============================================================================

fn validate_currency(code: &str) -> Result<(), ValidationError> {
    if currency::is_supported(code) {
        Ok(())
    } else {
        Err(ValidationError::new("unsupported_currency"))
    }
}

/// Create account request. New accounts start with a zero balance.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAccountRequest {
    #[validate(length(min = 1, message = "owner cannot be empty"))]
    pub owner: String,
    /// One of USD, EUR, CAD
    #[validate(custom(function = validate_currency))]
    pub currency: String,
}

/// Pagination query for account listing
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ListAccountsQuery {
    #[validate(range(min = 1, max = 100))]
    pub limit: i64,
    #[validate(range(min = 0))]
    pub offset: i64,
}

/// Create transfer request. `amount` is in minor currency units.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTransferRequest {
    #[validate(range(min = 1))]
    pub from_account_id: i64,
    #[validate(range(min = 1))]
    pub to_account_id: i64,
    #[validate(range(min = 1, message = "amount must be positive"))]
    pub amount: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // CreateAccountRequest
    // =========================================================================

    #[test]
    fn test_create_account_request_valid() {
        let json = r#"{"owner":"alice","currency":"USD"}"#;
        let req: CreateAccountRequest = serde_json::from_str(json).unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_account_rejects_empty_owner() {
        let json = r#"{"owner":"","currency":"USD"}"#;
        let req: CreateAccountRequest = serde_json::from_str(json).unwrap();
        let err = req.validate().unwrap_err();
        assert!(err.to_string().contains("owner cannot be empty"));
    }

    #[test]
    fn test_create_account_rejects_unknown_currency() {
        let json = r#"{"owner":"alice","currency":"DOGE"}"#;
        let req: CreateAccountRequest = serde_json::from_str(json).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_account_missing_field_fails_deserialization() {
        let json = r#"{"owner":"alice"}"#;
        let result: Result<CreateAccountRequest, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    // =========================================================================
    // ListAccountsQuery
    // =========================================================================

    #[test]
    fn test_list_query_bounds() {
        let valid = ListAccountsQuery {
            limit: 5,
            offset: 0,
        };
        assert!(valid.validate().is_ok());

        let zero_limit = ListAccountsQuery {
            limit: 0,
            offset: 0,
        };
        assert!(zero_limit.validate().is_err());

        let oversized = ListAccountsQuery {
            limit: 1000,
            offset: 0,
        };
        assert!(oversized.validate().is_err());

        let negative_offset = ListAccountsQuery {
            limit: 5,
            offset: -1,
        };
        assert!(negative_offset.validate().is_err());
    }

    // =========================================================================
    // CreateTransferRequest
    // =========================================================================

    #[test]
    fn test_create_transfer_request_valid() {
        let json = r#"{"from_account_id":1,"to_account_id":2,"amount":10}"#;
        let req: CreateTransferRequest = serde_json::from_str(json).unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.from_account_id, 1);
        assert_eq!(req.to_account_id, 2);
        assert_eq!(req.amount, 10);
    }

    #[test]
    fn test_create_transfer_rejects_non_positive_amount() {
        let zero: CreateTransferRequest =
            serde_json::from_str(r#"{"from_account_id":1,"to_account_id":2,"amount":0}"#).unwrap();
        assert!(zero.validate().is_err());

        let negative: CreateTransferRequest =
            serde_json::from_str(r#"{"from_account_id":1,"to_account_id":2,"amount":-10}"#)
                .unwrap();
        let err = negative.validate().unwrap_err();
        assert!(err.to_string().contains("amount must be positive"));
    }

    #[test]
    fn test_create_transfer_rejects_zero_account_id() {
        let req: CreateTransferRequest =
            serde_json::from_str(r#"{"from_account_id":0,"to_account_id":2,"amount":10}"#).unwrap();
        assert!(req.validate().is_err());
    }

    // =========================================================================
    // Envelope
    // =========================================================================

    #[test]
    fn test_success_envelope_shape() {
        let resp = ApiResponse::success(42);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["code"], 0);
        assert_eq!(json["msg"], "ok");
        assert_eq!(json["data"], 42);
    }

    #[test]
    fn test_error_envelope_omits_data() {
        let resp = ApiResponse::<()> {
            code: error_codes::RESOURCE_NOT_FOUND,
            msg: "account 9 not found".to_string(),
            data: None,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["code"], error_codes::RESOURCE_NOT_FOUND);
        assert!(json.get("data").is_none());
    }
}
