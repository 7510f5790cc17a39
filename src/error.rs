//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::services::business_day::FeedError;

/// Application-wide error type.
///
/// Each variant maps to a specific HTTP status code and error message.
///
/// # Error Categories
///
/// - **Validation errors**: malformed input, rejected before any I/O
/// - **Business-rule refusals**: account not found, insufficient funds,
///   non-business day; expected outcomes, reported verbatim
/// - **Upstream unavailability**: the holiday feed cannot be consulted and
///   no cached set exists, so the business-day status is indeterminable
/// - **Storage faults**: database errors causing a full rollback
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed (e.g., connection error, query error).
    ///
    /// Wraps any sqlx::Error via `#[from]`. Details are hidden from the
    /// client response.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested account does not exist.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Account not found")]
    AccountNotFound,

    /// An account with the same CPF already exists.
    ///
    /// Returns HTTP 409 Conflict.
    #[error("CPF already registered")]
    CpfAlreadyRegistered,

    /// Source account balance does not cover the requested amount.
    ///
    /// Returns HTTP 422 Unprocessable Entity.
    #[error("Insufficient funds")]
    InsufficientFunds,

    /// Today is a weekend day or a listed public holiday.
    ///
    /// Returns HTTP 422 Unprocessable Entity.
    #[error("Transfers are allowed only on business days")]
    NotBusinessDay,

    /// The holiday feed could not be consulted and no cached holiday set
    /// exists, so the transfer is refused rather than guessed.
    ///
    /// Returns HTTP 503 Service Unavailable; the caller may retry later.
    #[error("Unable to determine whether today is a business day")]
    BusinessDayUnavailable(#[from] FeedError),

    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    /// The String contains details about what was invalid.
    #[error("Invalid request")]
    InvalidRequest(String),
}

/// Convert AppError into an HTTP response.
///
/// Allows handlers to return `Result<T, AppError>` and have errors
/// automatically converted into JSON responses of the shape:
///
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::AccountNotFound => {
                (StatusCode::NOT_FOUND, "account_not_found", self.to_string())
            }
            AppError::CpfAlreadyRegistered => (
                StatusCode::CONFLICT,
                "cpf_already_registered",
                self.to_string(),
            ),
            AppError::InsufficientFunds => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "insufficient_funds",
                self.to_string(),
            ),
            AppError::NotBusinessDay => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "not_business_day",
                self.to_string(),
            ),
            AppError::BusinessDayUnavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "business_day_unavailable",
                self.to_string(),
            ),
            AppError::InvalidRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg.clone())
            }
            AppError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "An internal error occurred".to_string(),
            ),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refusal_classes_map_to_distinct_statuses() {
        assert_eq!(
            AppError::AccountNotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::CpfAlreadyRegistered.into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::InsufficientFunds.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::NotBusinessDay.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::BusinessDayUnavailable(FeedError::Unavailable("feed down".to_string()))
                .into_response()
                .status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::InvalidRequest("bad".to_string())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn storage_faults_hide_details() {
        let response = AppError::Database(sqlx::Error::PoolClosed).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
