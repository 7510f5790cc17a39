//! Account management HTTP handlers.
//!
//! - POST /api/v1/accounts - Create new account
//! - GET /api/v1/accounts/{id} - Get account by ID

use crate::{
    AppState,
    error::AppError,
    models::account::{Account, CreateAccountRequest},
    validation,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Create a new account.
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Maria Silva",
///   "cpf": "12345678901",
///   "initial_balance": "100.00"
/// }
/// ```
///
/// # Response
///
/// - **201 Created**: the new account
/// - **400 Bad Request**: malformed name, CPF, or initial balance
/// - **409 Conflict**: CPF already registered
pub async fn create_account(
    State(state): State<AppState>,
    Json(request): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<Account>), AppError> {
    if !validation::is_valid_name(&request.name) {
        return Err(AppError::InvalidRequest(
            "Name must contain only letters and spaces, with at least 2 characters".to_string(),
        ));
    }
    if !validation::is_valid_cpf(&request.cpf) {
        return Err(AppError::InvalidRequest(
            "CPF must be exactly 11 digits and not a repeated sequence".to_string(),
        ));
    }
    if request.initial_balance != Decimal::ZERO
        && !validation::is_valid_monetary_value(request.initial_balance)
    {
        return Err(AppError::InvalidRequest(
            "Initial balance must be between 0.01 and 999999999.99".to_string(),
        ));
    }

    let existing: Option<Uuid> = sqlx::query_scalar("SELECT id FROM accounts WHERE cpf = $1")
        .bind(&request.cpf)
        .fetch_optional(&state.pool)
        .await?;
    if existing.is_some() {
        return Err(AppError::CpfAlreadyRegistered);
    }

    let account = sqlx::query_as::<_, Account>(
        r#"
        INSERT INTO accounts (name, cpf, balance)
        VALUES ($1, $2, $3)
        RETURNING id, name, cpf, balance, created_at
        "#,
    )
    .bind(request.name.trim())
    .bind(&request.cpf)
    .bind(request.initial_balance)
    .fetch_one(&state.pool)
    .await?;

    Ok((StatusCode::CREATED, Json(account)))
}

/// Get a specific account by ID.
///
/// # Response
///
/// - **200 OK**: account details
/// - **404 Not Found**: no account with that id
pub async fn get_account(
    State(state): State<AppState>,
    Path(account_id): Path<Uuid>,
) -> Result<Json<Account>, AppError> {
    let account = state
        .ledger
        .account(account_id)
        .await?
        .ok_or(AppError::AccountNotFound)?;

    Ok(Json(account))
}
