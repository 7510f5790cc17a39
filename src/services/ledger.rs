//! Ledger store: durable accounts plus the append-only transfer history.
//!
//! The transfer engine talks to storage only through the [`Ledger`] trait.
//! Its `execute_transfer` method is a single unit of work: both balance
//! mutations and the transfer record commit together or not at all, and
//! row locks serialize concurrent transfers touching the same account so
//! no balance is ever computed from a stale read. The store may be shared
//! by several server instances; the database transaction is the only
//! serialization point.

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    models::{account::Account, transfer::Transfer},
};

/// Storage boundary used by the transfer engine.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Fetch one account by id.
    async fn account(&self, id: Uuid) -> Result<Option<Account>, AppError>;

    /// Atomically debit `from_account_id`, credit `to_account_id`, and
    /// append the transfer record.
    ///
    /// Account existence and sufficient funds are verified inside the unit
    /// of work, after the rows are locked.
    ///
    /// # Errors
    ///
    /// - `AccountNotFound`: either account is missing
    /// - `InsufficientFunds`: source balance below `amount`
    /// - `Database`: storage fault; nothing was applied
    async fn execute_transfer(
        &self,
        from_account_id: Uuid,
        to_account_id: Uuid,
        amount: Decimal,
    ) -> Result<Transfer, AppError>;
}

/// PostgreSQL-backed ledger.
pub struct PgLedger {
    pool: DbPool,
}

impl PgLedger {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Ledger for PgLedger {
    async fn account(&self, id: Uuid) -> Result<Option<Account>, AppError> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, name, cpf, balance, created_at FROM accounts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn execute_transfer(
        &self,
        from_account_id: Uuid,
        to_account_id: Uuid,
        amount: Decimal,
    ) -> Result<Transfer, AppError> {
        let mut tx = self.pool.begin().await?;

        // Lock the source row first. FOR UPDATE blocks concurrent transfers
        // touching this account until we commit or roll back, so two debits
        // can never both read the same starting balance.
        let from_balance: Decimal =
            sqlx::query_scalar("SELECT balance FROM accounts WHERE id = $1 FOR UPDATE")
                .bind(from_account_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(AppError::AccountNotFound)?;

        // Lock the destination row as well before any mutation.
        let to_locked: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM accounts WHERE id = $1 FOR UPDATE")
                .bind(to_account_id)
                .fetch_optional(&mut *tx)
                .await?;

        if to_locked.is_none() {
            tx.rollback().await?;
            return Err(AppError::AccountNotFound);
        }

        if from_balance < amount {
            tx.rollback().await?;
            return Err(AppError::InsufficientFunds);
        }

        sqlx::query("UPDATE accounts SET balance = balance - $1 WHERE id = $2")
            .bind(amount)
            .bind(from_account_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE accounts SET balance = balance + $1 WHERE id = $2")
            .bind(amount)
            .bind(to_account_id)
            .execute(&mut *tx)
            .await?;

        // The commit timestamp comes from the database, not the caller.
        let transfer = sqlx::query_as::<_, Transfer>(
            r#"
            INSERT INTO transfers (from_account_id, to_account_id, amount)
            VALUES ($1, $2, $3)
            RETURNING id, from_account_id, to_account_id, amount, created_at
            "#,
        )
        .bind(from_account_id)
        .bind(to_account_id)
        .bind(amount)
        .fetch_one(&mut *tx)
        .await?;

        // All three effects become visible together, or not at all.
        tx.commit().await?;

        Ok(transfer)
    }
}

#[cfg(test)]
pub mod mock {
    //! In-memory ledger for engine tests, with call counting and commit
    //! fault injection.

    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use chrono::Utc;

    use super::*;

    pub struct MemoryLedger {
        accounts: Mutex<HashMap<Uuid, Account>>,
        transfers: Mutex<Vec<Transfer>>,
        calls: AtomicUsize,
        fail_commit: AtomicBool,
    }

    impl MemoryLedger {
        pub fn new() -> Self {
            Self {
                accounts: Mutex::new(HashMap::new()),
                transfers: Mutex::new(Vec::new()),
                calls: AtomicUsize::new(0),
                fail_commit: AtomicBool::new(false),
            }
        }

        pub fn add_account(&self, balance: Decimal) -> Uuid {
            let id = Uuid::new_v4();
            let mut accounts = self.accounts.lock().unwrap();
            let cpf = format!("{:011}", accounts.len() + 1);
            accounts.insert(
                id,
                Account {
                    id,
                    name: "Test Holder".to_string(),
                    cpf,
                    balance,
                    created_at: Utc::now(),
                },
            );
            id
        }

        /// Make the next units of work fail before applying any effect.
        pub fn set_fail_commit(&self, fail: bool) {
            self.fail_commit.store(fail, Ordering::SeqCst);
        }

        /// Number of `execute_transfer` units of work attempted.
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn total_balance(&self) -> Decimal {
            self.accounts
                .lock()
                .unwrap()
                .values()
                .map(|account| account.balance)
                .sum()
        }

        pub fn transfers(&self) -> Vec<Transfer> {
            self.transfers.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Ledger for MemoryLedger {
        async fn account(&self, id: Uuid) -> Result<Option<Account>, AppError> {
            Ok(self.accounts.lock().unwrap().get(&id).cloned())
        }

        async fn execute_transfer(
            &self,
            from_account_id: Uuid,
            to_account_id: Uuid,
            amount: Decimal,
        ) -> Result<Transfer, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            let mut accounts = self.accounts.lock().unwrap();
            let from_balance = accounts
                .get(&from_account_id)
                .map(|account| account.balance)
                .ok_or(AppError::AccountNotFound)?;
            if !accounts.contains_key(&to_account_id) {
                return Err(AppError::AccountNotFound);
            }
            if from_balance < amount {
                return Err(AppError::InsufficientFunds);
            }

            // A failed unit of work leaves no partial effect behind.
            if self.fail_commit.load(Ordering::SeqCst) {
                return Err(AppError::Database(sqlx::Error::PoolClosed));
            }

            accounts.get_mut(&from_account_id).unwrap().balance -= amount;
            accounts.get_mut(&to_account_id).unwrap().balance += amount;

            let transfer = Transfer {
                id: Uuid::new_v4(),
                from_account_id,
                to_account_id,
                amount,
                created_at: Utc::now(),
            };
            self.transfers.lock().unwrap().push(transfer.clone());

            Ok(transfer)
        }
    }
}
