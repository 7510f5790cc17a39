//! Fund transfer HTTP handler.
//!
//! - POST /api/v1/transfers - Move money between two accounts

use crate::{
    AppState,
    error::AppError,
    models::transfer::{CreateTransferRequest, Transfer},
};
use axum::{Json, extract::State, http::StatusCode};

/// Transfer money between accounts.
///
/// The engine refuses the transfer outside business days, when either
/// account is missing, or when the source balance is insufficient; each
/// refusal carries its own error code. Both balance mutations and the
/// transfer record commit in a single database transaction.
///
/// # Request Body
///
/// ```json
/// {
///   "from_account_id": "550e8400-...",
///   "to_account_id": "660e8400-...",
///   "amount": "40.00"
/// }
/// ```
///
/// # Response (201)
///
/// ```json
/// {
///   "id": "770e8400-...",
///   "from_account_id": "550e8400-...",
///   "to_account_id": "660e8400-...",
///   "amount": "40.00",
///   "created_at": "2025-04-22T16:00:00Z"
/// }
/// ```
pub async fn create_transfer(
    State(state): State<AppState>,
    Json(request): Json<CreateTransferRequest>,
) -> Result<(StatusCode, Json<Transfer>), AppError> {
    let transfer = state
        .engine
        .create_transfer(
            request.from_account_id,
            request.to_account_id,
            request.amount,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(transfer)))
}
