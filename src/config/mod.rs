// ABOUTME: Configuration management module for server and database settings
// ABOUTME: Loads typed configuration from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//! Configuration module for Packman
//!
//! - **Environment**: HTTP listener, timeouts and deployment environment
//! - **Database**: connection URL, pool sizing and operation deadline

/// Database connection configuration
pub mod database;
/// Environment and server configuration
pub mod environment;

pub use database::{DatabaseConfig, DatabaseUrl};
pub use environment::{Environment, HttpConfig, ServerConfig};

use crate::errors::{AppError, AppResult};
use std::env;
use std::str::FromStr;

/// Read an environment variable, falling back to `default` when unset
pub(crate) fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Read and parse an environment variable
///
/// Unset variables take `default`. Set but unparsable values are a
/// configuration error rather than being silently replaced.
pub(crate) fn parse_env<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::config(format!("Invalid {key} value '{raw}': {e}"))),
        Err(_) => Ok(default),
    }
}
