// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Configuration manager and request validation for pack operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Business rules live here so route handlers stay thin: handlers parse,
//! call a validator, call the manager, and shape the response.

/// Pack configuration reads, transactional updates and history
pub mod pack_configuration;

/// Range and length checks for pack requests
pub mod pack_validation;

pub use pack_configuration::PackConfigurationManager;
