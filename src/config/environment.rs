// ABOUTME: Environment-based server configuration for the HTTP listener
// ABOUTME: Bind address, request limits, shutdown grace period and environment kind
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{env_var_or, parse_env, DatabaseConfig};
use crate::constants::network;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tracing::info;

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if this is a testing environment
    #[must_use]
    pub const fn is_testing(self) -> bool {
        matches!(self, Self::Testing)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Bind address
    pub host: IpAddr,
    /// Listen port
    pub port: u16,
    /// Per-request deadline
    pub request_timeout_secs: u64,
    /// Maximum accepted request body
    pub body_limit_bytes: usize,
    /// Grace period for in-flight requests on shutdown
    pub shutdown_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: network::DEFAULT_HTTP_PORT,
            request_timeout_secs: network::DEFAULT_REQUEST_TIMEOUT_SECS,
            body_limit_bytes: network::DEFAULT_BODY_LIMIT_BYTES,
            shutdown_timeout_secs: network::DEFAULT_SHUTDOWN_TIMEOUT_SECS,
        }
    }
}

impl HttpConfig {
    /// Load listener configuration from environment
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any variable is set to an invalid value
    pub fn from_env() -> AppResult<Self> {
        let host_raw = env_var_or("HOST", network::DEFAULT_HOST);
        let host = host_raw
            .trim()
            .parse()
            .map_err(|e| AppError::config(format!("Invalid HOST value '{host_raw}': {e}")))?;

        let config = Self {
            host,
            port: parse_env("HTTP_PORT", network::DEFAULT_HTTP_PORT)?,
            request_timeout_secs: parse_env(
                "REQUEST_TIMEOUT_SECS",
                network::DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
            body_limit_bytes: parse_env(
                "REQUEST_BODY_LIMIT_BYTES",
                network::DEFAULT_BODY_LIMIT_BYTES,
            )?,
            shutdown_timeout_secs: parse_env(
                "SHUTDOWN_TIMEOUT_SECS",
                network::DEFAULT_SHUTDOWN_TIMEOUT_SECS,
            )?,
        };

        if config.request_timeout_secs == 0 {
            return Err(AppError::config(
                "REQUEST_TIMEOUT_SECS must be greater than zero",
            ));
        }
        if config.body_limit_bytes == 0 {
            return Err(AppError::config(
                "REQUEST_BODY_LIMIT_BYTES must be greater than zero",
            ));
        }

        Ok(config)
    }

    /// Socket address to bind
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Per-request deadline
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Shutdown grace period
    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

/// Complete server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Deployment environment
    pub environment: Environment,
    /// HTTP listener
    pub http: HttpConfig,
    /// Database connection
    pub database: DatabaseConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any variable is set to an invalid value
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            environment: Environment::from_str_or_default(&env_var_or("ENVIRONMENT", "development")),
            http: HttpConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
        };

        info!(
            environment = %config.environment,
            bind_addr = %config.http.bind_addr(),
            database = %config.database.url,
            "Configuration loaded"
        );

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parsing_falls_back_to_development() {
        assert_eq!(Environment::from_str_or_default("PROD"), Environment::Production);
        assert_eq!(Environment::from_str_or_default("test"), Environment::Testing);
        assert_eq!(Environment::from_str_or_default("staging"), Environment::Development);
    }

    #[test]
    fn test_default_bind_addr() {
        assert_eq!(HttpConfig::default().bind_addr().to_string(), "0.0.0.0:8080");
    }
}
