// ABOUTME: Transaction management with RAII guards for database operations.
// ABOUTME: Rolls back automatically when a guard is dropped without commit.

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Transaction management with RAII guards
//!
//! `TransactionGuard` ensures a transaction never outlives its operation:
//! - Automatic rollback on drop if not explicitly committed
//! - Type-safe commit that consumes the guard
//! - Works with both `SQLite` and `PostgreSQL` via `SQLx` generics
//!
//! A guard is also dropped when the future holding it is cancelled, so an
//! operation abandoned at its deadline rolls back the same way an operation
//! that returned an error does.
//!
//! ## Example Usage
//!
//! ```text
//! let mut guard = TransactionGuard::begin(&pool, "update_pack_sizes").await?;
//!
//! sqlx::query("UPDATE pack_configuration ...").execute(guard.executor()?).await?;
//! sqlx::query("INSERT INTO pack_configuration_history ...").execute(guard.executor()?).await?;
//!
//! // If this line isn't reached, the transaction rolls back
//! guard.commit().await?;
//! ```

use sqlx::{Database, Pool, Transaction};
use tracing::{debug, warn};

use crate::errors::DatabaseError;

/// RAII guard for database transactions ensuring automatic rollback on drop
///
/// # Type Parameters
///
/// * `DB` - The database type (e.g., `Sqlite`, `Postgres`)
pub struct TransactionGuard<'c, DB: Database> {
    transaction: Option<Transaction<'c, DB>>,
    operation: &'static str,
    committed: bool,
}

impl<DB: Database> TransactionGuard<'static, DB> {
    /// Begin a transaction on `pool` and guard it
    ///
    /// # Errors
    ///
    /// Returns a transaction error if no connection could be acquired or the
    /// `BEGIN` statement failed
    pub async fn begin(pool: &Pool<DB>, operation: &'static str) -> Result<Self, DatabaseError> {
        let transaction = pool
            .begin()
            .await
            .map_err(|e| DatabaseError::TransactionError {
                context: format!("{operation}: begin failed: {e}"),
            })?;
        Ok(Self::new(transaction, operation))
    }
}

impl<'c, DB: Database> TransactionGuard<'c, DB> {
    /// Guard an existing `SQLx` transaction
    #[must_use]
    pub fn new(transaction: Transaction<'c, DB>, operation: &'static str) -> Self {
        debug!(operation, "transaction started");
        Self {
            transaction: Some(transaction),
            operation,
            committed: false,
        }
    }

    /// Commit the transaction and consume the guard
    ///
    /// # Errors
    ///
    /// Returns a transaction error if the guard was already consumed or the
    /// database rejected the commit
    pub async fn commit(mut self) -> Result<(), DatabaseError> {
        let operation = self.operation;
        let tx = self
            .transaction
            .take()
            .ok_or_else(|| DatabaseError::TransactionError {
                context: format!("{operation}: transaction already consumed, cannot commit"),
            })?;
        tx.commit()
            .await
            .map_err(|e| DatabaseError::TransactionError {
                context: format!("{operation}: commit failed: {e}"),
            })?;
        self.committed = true;
        debug!(operation, "transaction committed");
        Ok(())
    }

    /// Explicitly roll back the transaction and consume the guard
    ///
    /// # Errors
    ///
    /// Returns a transaction error if the guard was already consumed or the
    /// rollback failed
    pub async fn rollback(mut self) -> Result<(), DatabaseError> {
        let operation = self.operation;
        let tx = self
            .transaction
            .take()
            .ok_or_else(|| DatabaseError::TransactionError {
                context: format!("{operation}: transaction already consumed, cannot roll back"),
            })?;
        tx.rollback()
            .await
            .map_err(|e| DatabaseError::TransactionError {
                context: format!("{operation}: rollback failed: {e}"),
            })?;
        debug!(operation, "transaction rolled back explicitly");
        Ok(())
    }

    /// Check if the transaction has been committed
    #[must_use]
    pub const fn is_committed(&self) -> bool {
        self.committed
    }

    /// Connection to execute statements on inside the transaction
    ///
    /// ```text
    /// sqlx::query("INSERT INTO ...").execute(guard.executor()?).await?;
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a transaction error if the guard is used after commit or rollback
    pub fn executor(&mut self) -> Result<&mut <DB as Database>::Connection, DatabaseError> {
        let operation = self.operation;
        self.transaction
            .as_deref_mut()
            .ok_or_else(|| DatabaseError::TransactionError {
                context: format!("{operation}: guard used after commit or rollback"),
            })
    }
}

impl<DB: Database> Drop for TransactionGuard<'_, DB> {
    fn drop(&mut self) {
        if self.transaction.is_some() && !self.committed {
            // SQLx rolls back when the Transaction is dropped
            warn!(
                operation = self.operation,
                "transaction dropped without commit, rolling back"
            );
        }
    }
}

/// Type alias for `SQLite` transaction guard
pub type SqliteTransactionGuard<'c> = TransactionGuard<'c, sqlx::Sqlite>;

/// Type alias for `PostgreSQL` transaction guard
#[cfg(feature = "postgresql")]
pub type PostgresTransactionGuard<'c> = TransactionGuard<'c, sqlx::Postgres>;
