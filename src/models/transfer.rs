//! Transfer data model and API request types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a committed transfer from the database.
///
/// Maps to the `transfers` table: an append-only ledger entry, written
/// exactly once per committed movement, atomically with the two balance
/// mutations it describes, and never updated afterwards.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Transfer {
    /// Unique identifier for this transfer
    pub id: Uuid,

    /// Account debited by `amount`
    pub from_account_id: Uuid,

    /// Account credited by `amount`
    pub to_account_id: Uuid,

    /// Amount moved; strictly positive
    /// (enforced by a database CHECK constraint)
    pub amount: Decimal,

    /// Commit timestamp, assigned by the server, never by the caller
    pub created_at: DateTime<Utc>,
}

/// Request body for creating a transfer.
///
/// # JSON Example
///
/// ```json
/// {
///   "from_account_id": "550e8400-e29b-41d4-a716-446655440000",
///   "to_account_id": "660e8400-e29b-41d4-a716-446655440001",
///   "amount": "40.00"
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct CreateTransferRequest {
    pub from_account_id: Uuid,

    pub to_account_id: Uuid,

    pub amount: Decimal,
}

/// Query parameters for the statement endpoint.
///
/// Both dates are inclusive calendar days (`YYYY-MM-DD`).
#[derive(Debug, Deserialize)]
pub struct StatementQuery {
    pub account_id: Uuid,

    pub start_date: NaiveDate,

    pub end_date: NaiveDate,
}
