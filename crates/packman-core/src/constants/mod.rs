// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Request limits, configuration identity, seed data, and service names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single large file.

/// Request validation limits
pub mod limits {
    /// Largest quantity accepted by the calculate endpoint
    pub const MAX_QUANTITY: i64 = 10_000_000;
    /// Largest single pack size accepted on update
    pub const MAX_PACK_SIZE: i64 = 1_000_000;
    /// Longest accepted `updated_by` label, in characters
    pub const MAX_UPDATED_BY_LENGTH: usize = 100;
    /// History page size when none (or a non-positive one) is requested
    pub const DEFAULT_HISTORY_LIMIT: u32 = 10;
    /// Upper bound on a single history page
    pub const MAX_HISTORY_LIMIT: u32 = 100;
}

/// Pack configuration identity and seed data
pub mod configuration {
    /// Fixed id of the singleton configuration row
    pub const CONFIGURATION_ID: i64 = 1;
    /// Version assigned to the seed row
    pub const INITIAL_VERSION: i64 = 1;
    /// Pack sizes written when the store is provisioned
    pub const DEFAULT_PACK_SIZES: [u32; 5] = [250, 500, 1000, 2000, 5000];
    /// Actor recorded on the seed row
    pub const SEED_ACTOR: &str = "system";
    /// Entity name used in not-found errors
    pub const ENTITY_NAME: &str = "Pack configuration";
}

/// API endpoints
pub mod endpoints {
    /// Versioned API prefix
    pub const API_V1: &str = "/api/v1";
    /// Pack calculation
    pub const CALCULATE: &str = "/api/v1/calculate";
    /// Active pack sizes
    pub const PACK_SIZES: &str = "/api/v1/pack-sizes";
    /// Configuration history
    pub const PACK_SIZES_HISTORY: &str = "/api/v1/pack-sizes/history";
    /// Health check endpoint
    pub const HEALTH: &str = "/health";
    /// Readiness endpoint
    pub const READY: &str = "/ready";
}

/// Network defaults
pub mod network {
    /// Default bind address
    pub const DEFAULT_HOST: &str = "0.0.0.0";
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8080;
    /// Default per-request timeout
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
    /// Default request body cap
    pub const DEFAULT_BODY_LIMIT_BYTES: usize = 64 * 1024;
    /// Default graceful-shutdown grace period
    pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;
    /// Header carrying the request correlation id
    pub const REQUEST_ID_HEADER: &str = "x-request-id";
}

/// Database defaults
pub mod database {
    /// Default database URL
    pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/packman.db";
    /// Default pool size
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    /// Default pool minimum
    pub const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    /// Default pool acquire deadline
    pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    /// Default deadline for a single store operation
    pub const DEFAULT_OPERATION_TIMEOUT_MS: u64 = 5_000;
    /// How long `SQLite` waits on a held write lock before failing
    pub const SQLITE_BUSY_TIMEOUT_SECS: u64 = 5;
    /// Deadline for the health-check ping
    pub const HEALTH_CHECK_TIMEOUT_MS: u64 = 2_000;
}

/// Service names for structured logging
pub mod service_names {
    /// Server binary / log service name
    pub const PACKMAN_SERVER: &str = "packman-server";
}
