// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging and in-memory or file-backed SQLite databases
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::wildcard_in_or_patterns,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `packman`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use anyhow::Result;
use packman::config::{DatabaseConfig, DatabaseUrl, Environment, ServerConfig};
use packman::database_plugins::{factory::Database, DatabaseProvider};
use packman::resources::ServerResources;
use std::sync::{Arc, Once};
use tempfile::TempDir;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Migrated in-memory `SQLite` database (single connection)
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    let config = DatabaseConfig::for_url(DatabaseUrl::Memory);
    let database = Database::connect(&config).await?;
    database.migrate().await?;
    Ok(database)
}

/// File-backed `SQLite` database in a temporary directory
///
/// Use this when a test needs several pooled connections, since every
/// connection to an in-memory database sees its own empty database. The
/// returned directory must outlive the database.
pub async fn create_file_database(max_connections: u32) -> Result<(TempDir, Database)> {
    init_test_logging();
    let dir = tempfile::tempdir()?;
    let config = file_database_config(&dir, max_connections);
    let database = Database::connect(&config).await?;
    database.migrate().await?;
    Ok((dir, database))
}

/// Pool configuration for a database file inside `dir`
pub fn file_database_config(dir: &TempDir, max_connections: u32) -> DatabaseConfig {
    DatabaseConfig {
        max_connections,
        min_connections: 1,
        ..DatabaseConfig::for_url(DatabaseUrl::SQLite {
            path: dir.path().join("packman.db"),
        })
    }
}

/// Server configuration suitable for tests
pub fn test_server_config(database: DatabaseConfig) -> ServerConfig {
    ServerConfig {
        environment: Environment::Testing,
        database,
        ..ServerConfig::default()
    }
}

/// Server resources over a fresh in-memory database
pub async fn create_test_resources() -> Result<ServerResources> {
    let database = create_test_database().await?;
    let config = test_server_config(DatabaseConfig::for_url(DatabaseUrl::Memory));
    Ok(ServerResources::new(database, Arc::new(config)))
}
