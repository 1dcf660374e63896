// ABOUTME: Configuration manager for the versioned pack-size configuration
// ABOUTME: Applies operation deadlines, deduplicates updates and maps store errors to AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Configuration Manager
//!
//! The only component that touches the shared configuration row. It holds no
//! in-process locks: mutual exclusion between concurrent updates is delegated
//! to the store's transaction, so several service instances can share one
//! database.
//!
//! Every store call runs under a deadline. When the deadline elapses the store
//! future is dropped, which drops its transaction guard and rolls back. No
//! operation is retried here; an `INTERNAL_ERROR` from an update is safe for the
//! caller to retry, producing a new version each time.

use crate::calculator::calculate_packs;
use crate::constants::configuration::ENTITY_NAME;
use crate::constants::limits::{DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT};
use crate::database_plugins::{PackConfigurationStore, StoreResult};
use crate::errors::{AppError, AppResult, DatabaseError};
use packman_core::models::{PackCalculation, PackConfiguration, PackSize};
use packman_core::sets::dedup_preserving_order;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Orchestrates reads and transactional writes of the pack configuration
#[derive(Clone)]
pub struct PackConfigurationManager {
    store: Arc<dyn PackConfigurationStore>,
    operation_timeout: Duration,
}

impl PackConfigurationManager {
    /// Create a manager over `store` with a per-operation deadline
    #[must_use]
    pub fn new(store: Arc<dyn PackConfigurationStore>, operation_timeout: Duration) -> Self {
        Self {
            store,
            operation_timeout,
        }
    }

    /// Pack sizes of the active configuration
    ///
    /// # Errors
    ///
    /// Returns `NOT_FOUND` if the configuration row is missing and
    /// `INTERNAL_ERROR` for store failures or an elapsed deadline
    pub async fn get_active_sizes(&self) -> AppResult<Vec<PackSize>> {
        self.run("get pack sizes", self.store.get_pack_sizes())
            .await
    }

    /// The active configuration
    ///
    /// # Errors
    ///
    /// Returns `NOT_FOUND` if the configuration row is missing and
    /// `INTERNAL_ERROR` for store failures or an elapsed deadline
    pub async fn get_active_configuration(&self) -> AppResult<PackConfiguration> {
        self.run(
            "get pack configuration",
            self.store.get_pack_configuration(),
        )
        .await
    }

    /// Replace the active pack sizes
    ///
    /// Sizes are deduplicated keeping first-occurrence order, and an empty actor
    /// label is stored as absent.
    ///
    /// # Errors
    ///
    /// Returns `VALIDATION_ERROR` for an empty list or a zero size, `NOT_FOUND`
    /// if the configuration row is missing, and `INTERNAL_ERROR` when the
    /// transaction fails or exceeds its deadline. A failed update leaves no
    /// history row and no version change behind.
    pub async fn update_sizes(
        &self,
        pack_sizes: &[PackSize],
        updated_by: Option<&str>,
    ) -> AppResult<PackConfiguration> {
        let pack_sizes = dedup_preserving_order(pack_sizes);
        if pack_sizes.is_empty() {
            return Err(AppError::invalid_input("pack_sizes cannot be empty"));
        }
        if pack_sizes.contains(&0) {
            return Err(AppError::invalid_input(
                "pack sizes must be greater than zero",
            ));
        }
        let updated_by = updated_by.filter(|actor| !actor.is_empty());

        let configuration = self
            .run(
                "update pack sizes",
                self.store.update_pack_sizes(&pack_sizes, updated_by),
            )
            .await?;

        info!(
            version = configuration.version,
            pack_sizes = ?configuration.pack_sizes,
            updated_by = configuration.updated_by.as_deref().unwrap_or_default(),
            "Pack sizes updated"
        );
        Ok(configuration)
    }

    /// Archived configurations, most recent first
    ///
    /// `limit` defaults to 10 when absent or not positive and is capped at 100.
    ///
    /// # Errors
    ///
    /// Returns `INTERNAL_ERROR` for store failures or an elapsed deadline
    pub async fn get_history(&self, limit: Option<i64>) -> AppResult<Vec<PackConfiguration>> {
        let limit = clamp_history_limit(limit);
        let history = self
            .run(
                "get pack configuration history",
                self.store.get_pack_configuration_history(limit),
            )
            .await?;
        Ok(history.into_iter().map(PackConfiguration::from).collect())
    }

    /// Fulfil `quantity` with the active pack sizes
    ///
    /// # Errors
    ///
    /// Returns `NOT_FOUND` if the configuration row is missing and
    /// `INTERNAL_ERROR` for store failures or an unusable configuration
    pub async fn calculate(&self, quantity: u64) -> AppResult<PackCalculation> {
        let pack_sizes = self.get_active_sizes().await?;
        calculate_packs(quantity, &pack_sizes)
    }

    async fn run<T, F>(&self, operation: &'static str, future: F) -> AppResult<T>
    where
        F: Future<Output = StoreResult<T>>,
    {
        match tokio::time::timeout(self.operation_timeout, future).await {
            Ok(result) => result.map_err(|e| map_store_error(operation, e)),
            Err(_) => {
                let timeout_ms = self.operation_timeout.as_millis() as u64;
                warn!(operation, timeout_ms, "store operation exceeded its deadline");
                Err(map_store_error(
                    operation,
                    DatabaseError::Timeout { timeout_ms },
                ))
            }
        }
    }
}

/// Normalize a requested history page size
#[must_use]
pub fn clamp_history_limit(limit: Option<i64>) -> u32 {
    match limit {
        Some(limit) if limit > 0 => {
            u32::try_from(limit.min(i64::from(MAX_HISTORY_LIMIT))).unwrap_or(MAX_HISTORY_LIMIT)
        }
        _ => DEFAULT_HISTORY_LIMIT,
    }
}

fn map_store_error(operation: &str, error: DatabaseError) -> AppError {
    if error.is_not_found() {
        AppError::not_found(ENTITY_NAME).with_source(error)
    } else {
        AppError::internal(format!("Failed to {operation}")).with_source(error)
    }
}
