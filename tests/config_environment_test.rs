// ABOUTME: Tests for environment-driven server configuration
// ABOUTME: Defaults, overrides, database URL parsing and rejection of invalid values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use packman::config::{DatabaseUrl, Environment, ServerConfig};
use packman::errors::ErrorCode;
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const VARIABLES: &[&str] = &[
    "ENVIRONMENT",
    "HOST",
    "HTTP_PORT",
    "REQUEST_TIMEOUT_SECS",
    "REQUEST_BODY_LIMIT_BYTES",
    "SHUTDOWN_TIMEOUT_SECS",
    "DATABASE_URL",
    "AUTO_MIGRATE",
    "DATABASE_MAX_CONNECTIONS",
    "DATABASE_MIN_CONNECTIONS",
    "DATABASE_ACQUIRE_TIMEOUT_SECS",
    "DATABASE_OPERATION_TIMEOUT_MS",
];

/// Run `test` with `vars` set and every other known variable unset
fn with_env<F: FnOnce()>(vars: &[(&str, &str)], test: F) {
    for key in VARIABLES {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }
    test();
    for key in VARIABLES {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    with_env(&[], || {
        let config = ServerConfig::from_env().unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.http.bind_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.http.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.http.body_limit_bytes, 64 * 1024);
        assert_eq!(
            config.database.url,
            DatabaseUrl::SQLite {
                path: PathBuf::from("./data/packman.db")
            }
        );
        assert!(config.database.auto_migrate);
        assert_eq!(config.database.operation_timeout(), Duration::from_secs(5));
    });
}

#[test]
#[serial]
fn test_environment_overrides() {
    with_env(
        &[
            ("ENVIRONMENT", "production"),
            ("HOST", "127.0.0.1"),
            ("HTTP_PORT", "9090"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("AUTO_MIGRATE", "false"),
            ("DATABASE_MAX_CONNECTIONS", "20"),
            ("DATABASE_OPERATION_TIMEOUT_MS", "250"),
        ],
        || {
            let config = ServerConfig::from_env().unwrap();
            assert!(config.environment.is_production());
            assert_eq!(config.http.bind_addr().to_string(), "127.0.0.1:9090");
            assert_eq!(config.database.url, DatabaseUrl::Memory);
            assert!(!config.database.auto_migrate);
            assert_eq!(config.database.max_connections, 20);
            assert_eq!(
                config.database.operation_timeout(),
                Duration::from_millis(250)
            );
        },
    );
}

#[test]
#[serial]
fn test_postgres_url_is_redacted_in_display() {
    with_env(
        &[("DATABASE_URL", "postgresql://packman:secret@db:5432/packman")],
        || {
            let config = ServerConfig::from_env().unwrap();
            assert!(config.database.url.is_postgresql());
            assert!(!config.database.url.to_string().contains("secret"));
        },
    );
}

#[test]
#[serial]
fn test_invalid_values_are_configuration_errors() {
    let cases: &[(&str, &str)] = &[
        ("HTTP_PORT", "not-a-port"),
        ("HTTP_PORT", "70000"),
        ("HOST", "localhost:80"),
        ("REQUEST_TIMEOUT_SECS", "0"),
        ("REQUEST_BODY_LIMIT_BYTES", "0"),
        ("DATABASE_URL", "mysql://db/packman"),
        ("DATABASE_URL", "sqlite:"),
        ("AUTO_MIGRATE", "sometimes"),
        ("DATABASE_MAX_CONNECTIONS", "0"),
        ("DATABASE_OPERATION_TIMEOUT_MS", "0"),
    ];

    for &(key, value) in cases {
        with_env(&[(key, value)], || {
            let error = ServerConfig::from_env().unwrap_err();
            assert_eq!(error.code, ErrorCode::Config, "{key}={value}");
            assert_eq!(error.http_status(), 500);
        });
    }
}

#[test]
#[serial]
fn test_min_connections_cannot_exceed_max() {
    with_env(
        &[
            ("DATABASE_MAX_CONNECTIONS", "2"),
            ("DATABASE_MIN_CONNECTIONS", "5"),
        ],
        || {
            let error = ServerConfig::from_env().unwrap_err();
            assert_eq!(error.code, ErrorCode::Config);
        },
    );
}
