// ABOUTME: Core types and constants for the Packman pack fulfilment service
// ABOUTME: Foundation crate with error handling, pack models, set helpers, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Packman Core
//!
//! Foundation crate providing shared types and constants for the Packman
//! service. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `DatabaseError`
//! - **constants**: Limits, the singleton configuration id, and seed pack sizes
//! - **models**: Pack configuration, history, and calculation result types
//! - **sets**: Order-preserving deduplication used for pack-size lists

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (pack configuration, history, calculation results)
pub mod models;

/// Set helpers for pack-size lists
pub mod sets;
