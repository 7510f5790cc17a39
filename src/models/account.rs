//! Account data model and API request types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents an account record from the database.
///
/// Maps to the `accounts` table. Balances are stored as fixed-point
/// decimals (`NUMERIC` in PostgreSQL) so no rounding ever happens
/// implicitly. Outside of initial creation, a balance changes only when a
/// transfer commits.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Account {
    /// Unique identifier for this account
    pub id: Uuid,

    /// Account holder's display name
    pub name: String,

    /// National tax id, unique across all accounts
    /// (enforced by a UNIQUE constraint)
    pub cpf: String,

    /// Current balance; never negative
    /// (enforced by a database CHECK constraint)
    pub balance: Decimal,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,
}

/// Request body for creating a new account.
///
/// # JSON Example
///
/// ```json
/// {
///   "name": "Maria Silva",
///   "cpf": "12345678901",
///   "initial_balance": "100.00"
/// }
/// ```
///
/// # Validation
///
/// - `name`: letters and spaces, at least 2 characters
/// - `cpf`: exactly 11 digits, not all identical, unique
/// - `initial_balance`: optional, defaults to 0, must be a valid monetary
///   value when non-zero
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub name: String,

    pub cpf: String,

    #[serde(default)]
    pub initial_balance: Decimal,
}
