//! Transfer engine: orchestrates one fund transfer end to end.
//!
//! Order of checks, short-circuiting on the first failure:
//!
//! 1. Amount and account-pair validation (no I/O, no side effects)
//! 2. Business-day gate for "today" (server clock, UTC)
//! 3. Account existence and sufficient funds, enforced inside the ledger's
//!    unit of work together with the debit, credit, and transfer record
//!
//! The engine holds no state of its own beyond collaborator handles and is
//! safe to call from any number of concurrent requests; the ledger's
//! transaction boundary is the only serialization point.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::transfer::Transfer,
    services::{business_day::BusinessDayOracle, ledger::Ledger},
    validation,
};

pub struct TransferEngine {
    ledger: Arc<dyn Ledger>,
    oracle: Arc<BusinessDayOracle>,
    clock: fn() -> DateTime<Utc>,
}

impl TransferEngine {
    pub fn new(ledger: Arc<dyn Ledger>, oracle: Arc<BusinessDayOracle>) -> Self {
        Self {
            ledger,
            oracle,
            clock: Utc::now,
        }
    }

    #[cfg(test)]
    fn with_clock(
        ledger: Arc<dyn Ledger>,
        oracle: Arc<BusinessDayOracle>,
        clock: fn() -> DateTime<Utc>,
    ) -> Self {
        Self {
            ledger,
            oracle,
            clock,
        }
    }

    /// Execute one transfer.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest`: non-positive or out-of-range amount, or source
    ///   and destination are the same account; the store is never touched
    /// - `NotBusinessDay`: today is a weekend day or a public holiday
    /// - `BusinessDayUnavailable`: the holiday feed cannot be consulted and
    ///   nothing is cached, so the gate refuses rather than guesses
    /// - `AccountNotFound` / `InsufficientFunds`: business-rule refusals
    ///   from the ledger; no state was changed
    /// - `Database`: the unit of work failed and was rolled back in full
    pub async fn create_transfer(
        &self,
        from_account_id: Uuid,
        to_account_id: Uuid,
        amount: Decimal,
    ) -> Result<Transfer, AppError> {
        if !validation::is_valid_monetary_value(amount) {
            return Err(AppError::InvalidRequest(
                "Transfer amount must be between 0.01 and 999999999.99".to_string(),
            ));
        }
        if from_account_id == to_account_id {
            return Err(AppError::InvalidRequest(
                "Source and destination accounts must differ".to_string(),
            ));
        }

        // Transfers are dated by the server clock, never by the caller.
        let today = (self.clock)().date_naive();
        if !self.oracle.is_business_day(today).await? {
            tracing::info!(%from_account_id, %to_account_id, %today, "transfer refused: not a business day");
            return Err(AppError::NotBusinessDay);
        }

        let transfer = self
            .ledger
            .execute_transfer(from_account_id, to_account_id, amount)
            .await?;

        tracing::info!(
            transfer_id = %transfer.id,
            %from_account_id,
            %to_account_id,
            %amount,
            "transfer committed"
        );

        Ok(transfer)
    }
}
