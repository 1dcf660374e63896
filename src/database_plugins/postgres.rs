// ABOUTME: PostgreSQL implementation of the pack configuration store
// ABOUTME: Serializable transactions with SELECT ... FOR UPDATE on the configuration row
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! `PostgreSQL` database implementation
//!
//! Provides the same interface as the `SQLite` backend for shared deployments
//! where several service instances write to one database. Pack sizes are
//! stored as `INTEGER[]` and timestamps as `TIMESTAMPTZ`.

use super::shared::mappers::{normalize_actor, pack_sizes_from_i32, pack_sizes_to_i32, query_failed};
use super::shared::transactions::PostgresTransactionGuard;
use super::{DatabaseProvider, PackConfigurationStore, PoolStats, StoreResult};
use crate::config::DatabaseConfig;
use crate::constants::configuration::{
    CONFIGURATION_ID, DEFAULT_PACK_SIZES, ENTITY_NAME, INITIAL_VERSION, SEED_ACTOR,
};
use crate::errors::DatabaseError;
use crate::middleware::create_database_span;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use packman_core::models::{PackConfiguration, PackConfigurationHistory, PackSize};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use tracing::{debug, info, Instrument};

/// `PostgreSQL` database implementation
#[derive(Clone)]
pub struct PostgresDatabase {
    pool: PgPool,
    max_connections: u32,
}

impl PostgresDatabase {
    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn configuration_from_row(row: &PgRow) -> StoreResult<PackConfiguration> {
    let pack_sizes: Vec<i32> = row.try_get("pack_sizes")?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at")?;
    Ok(PackConfiguration {
        id: row.try_get("id")?,
        version: row.try_get("version")?,
        pack_sizes: pack_sizes_from_i32(pack_sizes)?,
        updated_at,
        updated_by: row.try_get("updated_by")?,
    })
}

fn history_from_row(row: &PgRow) -> StoreResult<PackConfigurationHistory> {
    let pack_sizes: Vec<i32> = row.try_get("pack_sizes")?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;
    Ok(PackConfigurationHistory {
        id: row.try_get("id")?,
        version: row.try_get("version")?,
        pack_sizes: pack_sizes_from_i32(pack_sizes)?,
        created_by: row.try_get("created_by")?,
        created_at,
    })
}

#[async_trait]
impl DatabaseProvider for PostgresDatabase {
    async fn new(config: &DatabaseConfig) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect(&config.url.to_connection_string())
            .await?;

        debug!(
            max_connections = config.max_connections,
            "PostgreSQL pool connected"
        );
        Ok(Self {
            pool,
            max_connections: config.max_connections,
        })
    }

    async fn migrate(&self) -> StoreResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS pack_configuration (
                id BIGINT PRIMARY KEY CHECK (id = 1),
                version BIGINT NOT NULL CHECK (version >= 1),
                pack_sizes INTEGER[] NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
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
                id BIGSERIAL PRIMARY KEY,
                version BIGINT NOT NULL,
                pack_sizes INTEGER[] NOT NULL,
                created_by TEXT,
                created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(query_failed("create pack_configuration_history"))?;

        sqlx::query(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_pack_configuration_history_version \
             ON pack_configuration_history(version)",
        )
        .execute(&self.pool)
        .await
        .map_err(query_failed("create history version index"))?;

        let seeded = sqlx::query(
            r"
            INSERT INTO pack_configuration (id, version, pack_sizes, updated_at, updated_by)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO NOTHING
            ",
        )
        .bind(CONFIGURATION_ID)
        .bind(INITIAL_VERSION)
        .bind(pack_sizes_to_i32(&DEFAULT_PACK_SIZES)?)
        .bind(Utc::now())
        .bind(SEED_ACTOR)
        .execute(&self.pool)
        .await
        .map_err(query_failed("seed pack_configuration"))?;

        if seeded.rows_affected() > 0 {
            info!(pack_sizes = ?DEFAULT_PACK_SIZES, "Seeded default pack configuration");
        }
        Ok(())
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
impl PackConfigurationStore for PostgresDatabase {
    async fn get_pack_sizes(&self) -> StoreResult<Vec<PackSize>> {
        let row = sqlx::query("SELECT pack_sizes FROM pack_configuration WHERE id = $1")
            .bind(CONFIGURATION_ID)
            .fetch_optional(&self.pool)
            .instrument(create_database_span("get_pack_sizes", "pack_configuration"))
            .await
            .map_err(query_failed("select pack_sizes"))?
            .ok_or(DatabaseError::NotFound {
                entity: ENTITY_NAME,
            })?;

        pack_sizes_from_i32(row.try_get("pack_sizes")?)
    }

    async fn get_pack_configuration(&self) -> StoreResult<PackConfiguration> {
        let row = sqlx::query(
            r"
            SELECT id, version, pack_sizes, updated_at, updated_by
            FROM pack_configuration
            WHERE id = $1
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
            let values = pack_sizes_to_i32(pack_sizes)?;
            let actor = normalize_actor(updated_by);

            let mut guard =
                PostgresTransactionGuard::begin(&self.pool, "update_pack_sizes").await?;

            sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
                .execute(guard.executor()?)
                .await
                .map_err(query_failed("set isolation level"))?;

            // Blocks until any other update holding the row commits or rolls back
            let locked =
                sqlx::query("SELECT version FROM pack_configuration WHERE id = $1 FOR UPDATE")
                    .bind(CONFIGURATION_ID)
                    .fetch_optional(guard.executor()?)
                    .await
                    .map_err(query_failed("lock pack_configuration"))?;
            let Some(locked) = locked else {
                return Err(DatabaseError::NotFound {
                    entity: ENTITY_NAME,
                });
            };
            let current_version: i64 = locked.try_get("version")?;
            debug!(current_version, "locked pack configuration");

            sqlx::query(
                r"
                INSERT INTO pack_configuration_history (version, pack_sizes, created_by, created_at)
                SELECT version, pack_sizes, updated_by, $2
                FROM pack_configuration
                WHERE id = $1
                ",
            )
            .bind(CONFIGURATION_ID)
            .bind(Utc::now())
            .execute(guard.executor()?)
            .await
            .map_err(query_failed("archive pack_configuration"))?;

            let row = sqlx::query(
                r"
                UPDATE pack_configuration
                SET pack_sizes = $2, version = version + 1, updated_at = $3, updated_by = $4
                WHERE id = $1
                RETURNING id, version, pack_sizes, updated_at, updated_by
                ",
            )
            .bind(CONFIGURATION_ID)
            .bind(&values)
            .bind(Utc::now())
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
            LIMIT $1
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
