// ABOUTME: Database abstraction layer for Packman
// ABOUTME: Plugin architecture for pack configuration storage with SQLite and PostgreSQL backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::DatabaseConfig;
use crate::errors::DatabaseError;
use async_trait::async_trait;
use packman_core::models::{PackConfiguration, PackConfigurationHistory, PackSize};
use serde::Serialize;

/// Runtime backend selection
pub mod factory;
/// Helpers shared between backends
pub mod shared;
/// `SQLite` backend
pub mod sqlite;

/// `PostgreSQL` backend
#[cfg(feature = "postgresql")]
pub mod postgres;

/// Result type for store operations
pub type StoreResult<T> = Result<T, DatabaseError>;

/// Connection pool occupancy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoolStats {
    /// Open connections
    pub size: u32,
    /// Idle connections
    pub idle: usize,
    /// Configured maximum
    pub max: u32,
}

/// Backend lifecycle
///
/// All database implementations provide connection setup, schema creation,
/// liveness checks and an orderly close.
#[async_trait]
pub trait DatabaseProvider: Send + Sync + Clone {
    /// Open a connection pool
    async fn new(config: &DatabaseConfig) -> StoreResult<Self>
    where
        Self: Sized;

    /// Create tables and seed the configuration row if absent
    async fn migrate(&self) -> StoreResult<()>;

    /// Round-trip a trivial query
    async fn ping(&self) -> StoreResult<()>;

    /// Current pool occupancy
    fn pool_stats(&self) -> PoolStats;

    /// Close every pooled connection
    async fn close(&self);
}

/// Pack configuration capabilities
///
/// The configuration manager and routes depend only on this trait so they can
/// run against in-memory fakes as well as real backends.
#[async_trait]
pub trait PackConfigurationStore: Send + Sync {
    /// Pack sizes of the active configuration
    async fn get_pack_sizes(&self) -> StoreResult<Vec<PackSize>>;

    /// The active configuration
    async fn get_pack_configuration(&self) -> StoreResult<PackConfiguration>;

    /// Replace the active pack sizes
    ///
    /// Runs as one serializable transaction: lock the configuration row, copy
    /// its current state into history, then write the new sizes with the
    /// version bumped by one. Any failure rolls the whole transaction back.
    async fn update_pack_sizes(
        &self,
        pack_sizes: &[PackSize],
        updated_by: Option<&str>,
    ) -> StoreResult<PackConfiguration>;

    /// Archived configurations, most recent first
    async fn get_pack_configuration_history(
        &self,
        limit: u32,
    ) -> StoreResult<Vec<PackConfigurationHistory>>;
}
