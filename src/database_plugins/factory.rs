// ABOUTME: Database factory and provider abstraction for multi-database support
// ABOUTME: Provides unified interface for SQLite and PostgreSQL with runtime database selection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Database factory for creating database providers
//!
//! The backend is chosen from the connection URL at startup; everything above
//! this module talks to the [`Database`] enum through the store traits.

use super::sqlite::SqliteDatabase;
use super::{DatabaseProvider, PackConfigurationStore, PoolStats, StoreResult};
use crate::config::{DatabaseConfig, DatabaseUrl};
#[cfg(not(feature = "postgresql"))]
use crate::errors::DatabaseError;
use async_trait::async_trait;
use packman_core::models::{PackConfiguration, PackConfigurationHistory, PackSize};
use tracing::{debug, info};

#[cfg(feature = "postgresql")]
use super::postgres::PostgresDatabase;

/// Supported database types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    /// Embedded `SQLite`
    SQLite,
    /// `PostgreSQL` server
    PostgreSQL,
}

/// Database instance wrapper that delegates to the appropriate implementation
#[derive(Clone)]
pub enum Database {
    /// `SQLite` backend
    SQLite(SqliteDatabase),
    /// `PostgreSQL` backend
    #[cfg(feature = "postgresql")]
    PostgreSQL(PostgresDatabase),
}

impl Database {
    /// Get a descriptive string for the current database backend
    #[must_use]
    pub const fn backend_info(&self) -> &'static str {
        match self {
            Self::SQLite(_) => "SQLite (Local Development)",
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(_) => "PostgreSQL (Cloud-Ready)",
        }
    }

    /// Get the database type enum
    #[must_use]
    pub const fn database_type(&self) -> DatabaseType {
        match self {
            Self::SQLite(_) => DatabaseType::SQLite,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(_) => DatabaseType::PostgreSQL,
        }
    }

    /// Connect to the database described by `config`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `PostgreSQL` URL is provided but the `postgresql` feature is disabled
    /// - The connection pool cannot be opened
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        let db_type = detect_database_type(&config.url)?;
        debug!(database = %config.url, "Detected database type: {db_type:?}");

        match db_type {
            DatabaseType::SQLite => {
                info!("Initializing SQLite database");
                let db = SqliteDatabase::new(config).await?;
                info!("SQLite database initialized successfully");
                Ok(Self::SQLite(db))
            }
            #[cfg(feature = "postgresql")]
            DatabaseType::PostgreSQL => {
                info!("Initializing PostgreSQL database");
                let db = PostgresDatabase::new(config).await?;
                info!("PostgreSQL database initialized successfully");
                Ok(Self::PostgreSQL(db))
            }
            #[cfg(not(feature = "postgresql"))]
            DatabaseType::PostgreSQL => Err(postgres_feature_disabled()),
        }
    }
}

/// Detect database type from a parsed URL
///
/// # Errors
///
/// Returns an error if a `PostgreSQL` URL is given without the `postgresql`
/// feature enabled
pub fn detect_database_type(url: &DatabaseUrl) -> StoreResult<DatabaseType> {
    if url.is_sqlite() {
        return Ok(DatabaseType::SQLite);
    }

    #[cfg(feature = "postgresql")]
    return Ok(DatabaseType::PostgreSQL);

    #[cfg(not(feature = "postgresql"))]
    Err(postgres_feature_disabled())
}

#[cfg(not(feature = "postgresql"))]
fn postgres_feature_disabled() -> DatabaseError {
    DatabaseError::Configuration {
        context: "PostgreSQL connection string detected, but PostgreSQL support is not \
                  enabled. Enable the 'postgresql' feature flag in Cargo.toml"
            .to_owned(),
    }
}

#[async_trait]
impl DatabaseProvider for Database {
    async fn new(config: &DatabaseConfig) -> StoreResult<Self> {
        Self::connect(config).await
    }

    async fn migrate(&self) -> StoreResult<()> {
        match self {
            Self::SQLite(db) => db.migrate().await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.migrate().await,
        }
    }

    async fn ping(&self) -> StoreResult<()> {
        match self {
            Self::SQLite(db) => db.ping().await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.ping().await,
        }
    }

    fn pool_stats(&self) -> PoolStats {
        match self {
            Self::SQLite(db) => db.pool_stats(),
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.pool_stats(),
        }
    }

    async fn close(&self) {
        match self {
            Self::SQLite(db) => db.close().await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.close().await,
        }
    }
}

#[async_trait]
impl PackConfigurationStore for Database {
    async fn get_pack_sizes(&self) -> StoreResult<Vec<PackSize>> {
        match self {
            Self::SQLite(db) => db.get_pack_sizes().await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.get_pack_sizes().await,
        }
    }

    async fn get_pack_configuration(&self) -> StoreResult<PackConfiguration> {
        match self {
            Self::SQLite(db) => db.get_pack_configuration().await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.get_pack_configuration().await,
        }
    }

    async fn update_pack_sizes(
        &self,
        pack_sizes: &[PackSize],
        updated_by: Option<&str>,
    ) -> StoreResult<PackConfiguration> {
        match self {
            Self::SQLite(db) => db.update_pack_sizes(pack_sizes, updated_by).await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.update_pack_sizes(pack_sizes, updated_by).await,
        }
    }

    async fn get_pack_configuration_history(
        &self,
        limit: u32,
    ) -> StoreResult<Vec<PackConfigurationHistory>> {
        match self {
            Self::SQLite(db) => db.get_pack_configuration_history(limit).await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.get_pack_configuration_history(limit).await,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_sqlite_urls() {
        assert_eq!(
            detect_database_type(&DatabaseUrl::Memory).ok(),
            Some(DatabaseType::SQLite)
        );
        assert_eq!(
            detect_database_type(&DatabaseUrl::default()).ok(),
            Some(DatabaseType::SQLite)
        );
    }

    #[cfg(not(feature = "postgresql"))]
    #[test]
    fn test_postgres_url_requires_feature() {
        let url = DatabaseUrl::PostgreSQL {
            connection_string: "postgres://localhost/packman".to_owned(),
        };
        let error = detect_database_type(&url).unwrap_err();
        assert!(error.is_configuration());
        assert!(error.to_string().contains("'postgresql' feature"));
    }

    #[cfg(not(feature = "postgresql"))]
    #[tokio::test]
    async fn test_connect_to_postgres_without_feature_is_configuration_error() {
        let config = DatabaseConfig::for_url(DatabaseUrl::PostgreSQL {
            connection_string: "postgres://localhost/packman".to_owned(),
        });
        let Err(error) = Database::connect(&config).await else {
            panic!("postgres URL must be rejected without the postgresql feature");
        };
        assert!(matches!(error, DatabaseError::Configuration { .. }));
    }
}
