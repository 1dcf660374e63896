// ABOUTME: HTTP middleware for request correlation and tracing
// ABOUTME: Request-id propagation and span factories for requests and store operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Request id extraction, generation and echo
pub mod request_id;
/// Span factories for HTTP requests and database operations
pub mod tracing;

pub use request_id::{request_id_middleware, RequestId};
pub use self::tracing::{create_database_span, HttpMakeSpan, HttpOnResponse};
