// ABOUTME: SQLite implementation of the pack configuration store
// ABOUTME: WAL-mode pool, schema migration, and the locked archive-then-update transaction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! `SQLite` database implementation
//!
//! Pack sizes are stored as a JSON array in TEXT and timestamps as RFC 3339
//! TEXT. `SQLite` has no row locks; an update instead writes the configuration
//! row as the first statement of its transaction, which takes the database's
//! single writer lock until commit or rollback. Competing updates wait on the
//! busy timeout, so updates run strictly one after another.

use super::shared::mappers::{
    decode_pack_sizes_json, decode_timestamp, encode_pack_sizes_json, normalize_actor,
    query_failed,
};
use super::shared::transactions::SqliteTransactionGuard;
use super::{DatabaseProvider, PackConfigurationStore, PoolStats, StoreResult};
use crate::config::DatabaseConfig;
use crate::constants::configuration::{
    CONFIGURATION_ID, DEFAULT_PACK_SIZES, ENTITY_NAME, INITIAL_VERSION, SEED_ACTOR,
};
use crate::constants::database::SQLITE_BUSY_TIMEOUT_SECS;
use crate::errors::DatabaseError;
use crate::middleware::create_database_span;
use async_trait::async_trait;
use chrono::Utc;
use packman_core::models::{PackConfiguration, PackConfigurationHistory, PackSize};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, Instrument, Span};

/// `SQLite` database implementation
#[derive(Clone)]
pub struct SqliteDatabase {
    pool: SqlitePool,
    max_connections: u32,
}

impl SqliteDatabase {
    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn migrate_pack_configuration(&self) -> StoreResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS pack_configuration (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                version INTEGER NOT NULL CHECK (version >= 1),
                pack_sizes TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                updated_by TEXT
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(query_failed("create pack_configuration"))?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS pack_configuration_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                version INTEGER NOT NULL,
                pack_sizes TEXT NOT NULL,
                created_by TEXT,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(query_failed("create pack_configuration_history"))?;

        // Each version is archived exactly once
        sqlx::query(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_pack_configuration_history_version \
             ON pack_configuration_history(version)",
        )
        .execute(&self.pool)
        .await
        .map_err(query_failed("create history version index"))?;

        Ok(())
    }

    async fn seed_pack_configuration(&self) -> StoreResult<()> {
        let seeded = sqlx::query(
            r"
            INSERT OR IGNORE INTO pack_configuration (id, version, pack_sizes, updated_at, updated_by)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(CONFIGURATION_ID)
        .bind(INITIAL_VERSION)
        .bind(encode_pack_sizes_json(&DEFAULT_PACK_SIZES)?)
        .bind(Utc::now().to_rfc3339())
        .bind(SEED_ACTOR)
        .execute(&self.pool)
        .await
        .map_err(query_failed("seed pack_configuration"))?;

        if seeded.rows_affected() > 0 {
            info!(pack_sizes = ?DEFAULT_PACK_SIZES, "Seeded default pack configuration");
        }
        Ok(())
    }
}

fn configuration_from_row(row: &SqliteRow) -> StoreResult<PackConfiguration> {
    let pack_sizes: String = row.try_get("pack_sizes")?;
    let updated_at: String = row.try_get("updated_at")?;
    Ok(PackConfiguration {
        id: row.try_get("id")?,
        version: row.try_get("version")?,
        pack_sizes: decode_pack_sizes_json(&pack_sizes)?,
        updated_at: decode_timestamp("updated_at", &updated_at)?,
        updated_by: row.try_get("updated_by")?,
    })
}

fn history_from_row(row: &SqliteRow) -> StoreResult<PackConfigurationHistory> {
    let pack_sizes: String = row.try_get("pack_sizes")?;
    let created_at: String = row.try_get("created_at")?;
    Ok(PackConfigurationHistory {
        id: row.try_get("id")?,
        version: row.try_get("version")?,
        pack_sizes: decode_pack_sizes_json(&pack_sizes)?,
        created_by: row.try_get("created_by")?,
        created_at: decode_timestamp("created_at", &created_at)?,
    })
}

#[async_trait]
impl DatabaseProvider for SqliteDatabase {
    async fn new(config: &DatabaseConfig) -> StoreResult<Self> {
        let mut options = SqliteConnectOptions::from_str(&config.url.to_connection_string())?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(SQLITE_BUSY_TIMEOUT_SECS));

        let pool_options = if config.url.is_memory() {
            // Every connection to :memory: is a separate database
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            if let Some(parent) = options.get_filename().parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await.map_err(|e| {
                        DatabaseError::QueryError {
                            context: format!(
                                "create database directory {}: {e}",
                                parent.display()
                            ),
                        }
                    })?;
                }
            }
            options = options.journal_mode(SqliteJournalMode::Wal);
            SqlitePoolOptions::new()
                .max_connections(config.max_connections)
                .min_connections(config.min_connections)
        };

        let pool = pool_options
            .acquire_timeout(config.acquire_timeout())
            .connect_with(options)
            .await?;

        let max_connections = if config.url.is_memory() {
            1
        } else {
            config.max_connections
        };
        debug!(database = %config.url, max_connections, "SQLite pool connected");

        Ok(Self {
            pool,
            max_connections,
        })
    }

    async fn migrate(&self) -> StoreResult<()> {
        self.migrate_pack_configuration().await?;
        self.seed_pack_configuration().await
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(query_failed("ping"))?;
        Ok(())
    }

    fn pool_stats(&self) -> PoolStats {
        PoolStats {
            size: self.pool.size(),
            idle: self.pool.num_idle(),
            max: self.max_connections,
        }
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl PackConfigurationStore for SqliteDatabase {
    async fn get_pack_sizes(&self) -> StoreResult<Vec<PackSize>> {
        let row = sqlx::query("SELECT pack_sizes FROM pack_configuration WHERE id = ?1")
            .bind(CONFIGURATION_ID)
            .fetch_optional(&self.pool)
            .instrument(create_database_span("get_pack_sizes", "pack_configuration"))
            .await
            .map_err(query_failed("select pack_sizes"))?
            .ok_or(DatabaseError::NotFound {
                entity: ENTITY_NAME,
            })?;

        let pack_sizes: String = row.try_get("pack_sizes")?;
        decode_pack_sizes_json(&pack_sizes)
    }

    async fn get_pack_configuration(&self) -> StoreResult<PackConfiguration> {
        let row = sqlx::query(
            r"
            SELECT id, version, pack_sizes, updated_at, updated_by
            FROM pack_configuration
            WHERE id = ?1
            ",
        )
        .bind(CONFIGURATION_ID)
        .fetch_optional(&self.pool)
        .instrument(create_database_span(
            "get_pack_configuration",
            "pack_configuration",
        ))
        .await
        .map_err(query_failed("select pack_configuration"))?
        .ok_or(DatabaseError::NotFound {
            entity: ENTITY_NAME,
        })?;

        configuration_from_row(&row)
    }

    async fn update_pack_sizes(
        &self,
        pack_sizes: &[PackSize],
        updated_by: Option<&str>,
    ) -> StoreResult<PackConfiguration> {
        let span = create_database_span("update_pack_sizes", "pack_configuration");
        async {
            let encoded = encode_pack_sizes_json(pack_sizes)?;
            let actor = normalize_actor(updated_by);

            let mut guard = SqliteTransactionGuard::begin(&self.pool, "update_pack_sizes").await?;

            // Writing first takes the writer lock for the rest of the transaction
            let locked = sqlx::query("UPDATE pack_configuration SET version = version WHERE id = ?1")
                .bind(CONFIGURATION_ID)
                .execute(guard.executor()?)
                .await
                .map_err(query_failed("lock pack_configuration"))?;
            Span::current().record("rows_affected", locked.rows_affected());
            if locked.rows_affected() == 0 {
                return Err(DatabaseError::NotFound {
                    entity: ENTITY_NAME,
                });
            }

            let archived_at = Utc::now().to_rfc3339();
            sqlx::query(
                r"
                INSERT INTO pack_configuration_history (version, pack_sizes, created_by, created_at)
                SELECT version, pack_sizes, updated_by, ?2
                FROM pack_configuration
                WHERE id = ?1
                ",
            )
            .bind(CONFIGURATION_ID)
            .bind(&archived_at)
            .execute(guard.executor()?)
            .await
            .map_err(query_failed("archive pack_configuration"))?;
            debug!("archived current pack configuration");

            let row = sqlx::query(
                r"
                UPDATE pack_configuration
                SET pack_sizes = ?2, version = version + 1, updated_at = ?3, updated_by = ?4
                WHERE id = ?1
                RETURNING id, version, pack_sizes, updated_at, updated_by
                ",
            )
            .bind(CONFIGURATION_ID)
            .bind(&encoded)
            .bind(Utc::now().to_rfc3339())
            .bind(actor)
            .fetch_one(guard.executor()?)
            .await
            .map_err(query_failed("update pack_configuration"))?;
            let configuration = configuration_from_row(&row)?;

            guard.commit().await?;
            Ok(configuration)
        }
        .instrument(span)
        .await
    }

    async fn get_pack_configuration_history(
        &self,
        limit: u32,
    ) -> StoreResult<Vec<PackConfigurationHistory>> {
        let rows = sqlx::query(
            r"
            SELECT id, version, pack_sizes, created_by, created_at
            FROM pack_configuration_history
            ORDER BY version DESC
            LIMIT ?1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .instrument(create_database_span(
            "get_pack_configuration_history",
            "pack_configuration_history",
        ))
        .await
        .map_err(query_failed("select pack_configuration_history"))?;

        rows.iter().map(history_from_row).collect()
    }
}
