// ABOUTME: Structured error types for pack configuration store operations
// ABOUTME: Separates missing rows and unusable configuration from query and transaction failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

/// Errors raised by storage backends
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The requested row does not exist
    #[error("{entity} not found")]
    NotFound {
        /// Entity that was looked up
        entity: &'static str,
    },

    /// A query failed to execute
    #[error("database query failed: {context}")]
    QueryError {
        /// What was being attempted
        context: String,
    },

    /// Begin, lock, commit or rollback failed
    #[error("transaction failed: {context}")]
    TransactionError {
        /// What was being attempted
        context: String,
    },

    /// A stored value could not be decoded
    #[error("stored data is invalid: {context}")]
    InvalidData {
        /// Which value was malformed
        context: String,
    },

    /// The configured backend cannot be used by this build
    #[error("invalid database configuration: {context}")]
    Configuration {
        /// What is wrong with the configuration
        context: String,
    },

    /// The operation exceeded its deadline and was abandoned
    #[error("database operation timed out after {timeout_ms}ms")]
    Timeout {
        /// Deadline that elapsed
        timeout_ms: u64,
    },

    /// Driver-level failure
    #[cfg(feature = "database-errors")]
    #[error("database driver error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Whether the error means the row is absent
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether the error comes from the database settings rather than the database
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}
