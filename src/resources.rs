// ABOUTME: Centralized resource container shared by every route
// ABOUTME: Owns the database handle, configuration manager, health checker and config
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::ServerConfig;
use crate::database_plugins::factory::Database;
use crate::health::HealthChecker;
use crate::services::PackConfigurationManager;
use std::sync::Arc;

/// Centralized resource container for dependency injection
///
/// Built once at startup and cloned cheaply into each router.
#[derive(Clone)]
pub struct ServerResources {
    /// Database backend
    pub database: Database,
    /// Pack configuration manager over `database`
    pub pack_configuration: PackConfigurationManager,
    /// Database health probe
    pub health_checker: Arc<HealthChecker>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Create server resources with proper Arc sharing
    #[must_use]
    pub fn new(database: Database, config: Arc<ServerConfig>) -> Self {
        let pack_configuration = PackConfigurationManager::new(
            Arc::new(database.clone()),
            config.database.operation_timeout(),
        );
        let health_checker = Arc::new(HealthChecker::new(database.clone(), config.environment));

        Self {
            database,
            pack_configuration,
            health_checker,
            config,
        }
    }
}
