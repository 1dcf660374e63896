// ABOUTME: Main library entry point for the Packman pack fulfilment service
// ABOUTME: Pack calculation, versioned pack-size configuration, and the HTTP API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Packman
//!
//! An HTTP service that works out how a requested quantity is fulfilled from a
//! set of discrete pack sizes, and manages the versioned configuration of those
//! sizes.
//!
//! ## Architecture
//!
//! - **Calculator**: pure greedy allocation of a quantity onto pack sizes
//! - **Database plugins**: `SQLite` and `PostgreSQL` stores for the singleton
//!   configuration row and its append-only history
//! - **Services**: the configuration manager, which owns the transactional
//!   update protocol and operation deadlines
//! - **Routes**: axum handlers for calculate, pack-size read/update, history
//!   and health probes
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use packman::config::environment::ServerConfig;
//! use packman::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Packman configured with port: HTTP={}", config.http.port);
//!     Ok(())
//! }
//! ```

/// Pack calculation engine
pub mod calculator;

/// Environment-driven server configuration
pub mod config;

/// Application constants
pub mod constants;

/// Pack configuration storage backends
pub mod database_plugins;

/// Unified error handling
pub mod errors;

/// Database health checks
pub mod health;

/// Structured logging setup
pub mod logging;

/// HTTP middleware (request ids, tracing spans)
pub mod middleware;

/// Shared server resources
pub mod resources;

/// HTTP routes
pub mod routes;

/// HTTP server lifecycle
pub mod server;

/// Business services
pub mod services;
