// ABOUTME: Request tracing span factories for correlation and structured logging
// ABOUTME: Creates spans for HTTP requests and pack configuration store operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::network::REQUEST_ID_HEADER;
use axum::http::{Request, Response};
use std::time::Duration;
use tower_http::trace::{MakeSpan, OnResponse};
use tracing::Span;

/// Create a tracing span for HTTP requests
pub fn create_request_span(method: &str, path: &str, request_id: &str) -> Span {
    tracing::info_span!(
        "http_request",
        method = %method,
        path = %path,
        request_id = %request_id,
        status_code = tracing::field::Empty,
        duration_ms = tracing::field::Empty,
    )
}

/// Span factory for `tower_http::trace::TraceLayer::make_span_with`
///
/// Runs after the request-id middleware, so the id header is always present.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpMakeSpan;

impl<B> MakeSpan<B> for HttpMakeSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        create_request_span(request.method().as_str(), request.uri().path(), request_id)
    }
}

/// Response callback for `tower_http::trace::TraceLayer::on_response`
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpOnResponse;

impl<B> OnResponse<B> for HttpOnResponse {
    fn on_response(self, response: &Response<B>, latency: Duration, span: &Span) {
        let status_code = response.status().as_u16();
        let duration_ms = latency.as_millis() as u64;
        span.record("status_code", status_code);
        span.record("duration_ms", duration_ms);
        tracing::info!(parent: span, status_code, duration_ms, "request completed");
    }
}

/// Create a tracing span for database operations
pub fn create_database_span(operation: &str, table: &str) -> Span {
    tracing::debug_span!(
        "database_operation",
        operation = %operation,
        table = %table,
        rows_affected = tracing::field::Empty,
    )
}
