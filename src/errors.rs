// ABOUTME: Re-exports the unified error system from packman-core
// ABOUTME: Keeps crate::errors paths stable for the service crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! The error types live in `packman-core` so storage and HTTP layers share one
//! taxonomy. This module re-exports them under `crate::errors`.

pub use packman_core::errors::{
    AppError, AppResult, DatabaseError, ErrorCode, ErrorResponse, ErrorResponseDetails,
};
