// ABOUTME: Server health monitoring for load balancer and operator probes
// ABOUTME: Pings the database with a deadline and reports latency and pool occupancy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health check endpoints and monitoring utilities

use crate::config::Environment;
use crate::constants::database::HEALTH_CHECK_TIMEOUT_MS;
use crate::constants::service_names;
use crate::database_plugins::{factory::Database, DatabaseProvider, PoolStats};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::error;

/// Message reported to callers when the ping fails; the cause is only logged
pub const DATABASE_UNREACHABLE: &str = "database unreachable";

/// Overall health status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// All dependencies reachable
    Healthy,
    /// A dependency failed its check
    Unhealthy,
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Overall service status
    pub status: HealthStatus,
    /// Service information
    pub service: ServiceInfo,
    /// Database check result
    pub database: DatabaseHealth,
    /// Connection pool occupancy
    pub connection_pool: PoolStats,
    /// Response timestamp (RFC 3339)
    pub timestamp: String,
}

/// Service information
#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    /// Service name
    pub name: String,
    /// Service version
    pub version: String,
    /// Deployment environment
    pub environment: String,
    /// Service uptime in seconds
    pub uptime_seconds: u64,
}

/// Database check result
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseHealth {
    /// Check status
    pub status: HealthStatus,
    /// Round-trip time of the ping
    pub response_time_ms: u64,
    /// Fixed failure message, absent when healthy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Health checker for the Packman server
pub struct HealthChecker {
    start_time: Instant,
    database: Database,
    environment: Environment,
    ping_timeout: Duration,
}

impl HealthChecker {
    /// Create a new health checker
    #[must_use]
    pub fn new(database: Database, environment: Environment) -> Self {
        Self {
            start_time: Instant::now(),
            database,
            environment,
            ping_timeout: Duration::from_millis(HEALTH_CHECK_TIMEOUT_MS),
        }
    }

    /// Ping the database and report overall health
    pub async fn check(&self) -> HealthResponse {
        let database = self.check_database().await;

        HealthResponse {
            status: database.status,
            service: ServiceInfo {
                name: service_names::PACKMAN_SERVER.into(),
                version: env!("CARGO_PKG_VERSION").to_owned(),
                environment: self.environment.to_string(),
                uptime_seconds: self.start_time.elapsed().as_secs(),
            },
            database,
            connection_pool: self.database.pool_stats(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    async fn check_database(&self) -> DatabaseHealth {
        let start = Instant::now();
        let outcome = tokio::time::timeout(self.ping_timeout, self.database.ping()).await;
        let response_time_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        let cause = match outcome {
            Ok(Ok(())) => None,
            Ok(Err(e)) => Some(e.to_string()),
            Err(_) => Some(format!(
                "database ping timed out after {}ms",
                self.ping_timeout.as_millis()
            )),
        };

        let Some(cause) = cause else {
            return DatabaseHealth {
                status: HealthStatus::Healthy,
                response_time_ms,
                error: None,
            };
        };

        error!(error = %cause, response_time_ms, "Database health check failed");
        DatabaseHealth {
            status: HealthStatus::Unhealthy,
            response_time_ms,
            error: Some(DATABASE_UNREACHABLE.to_owned()),
        }
    }
}
