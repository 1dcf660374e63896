// ABOUTME: Route module organization for Packman HTTP endpoints
// ABOUTME: Assembles pack and health routes behind request-id, tracing, timeout and body-limit layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for Packman
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the service layer.

/// Health check and readiness routes
pub mod health;
/// Pack calculation and pack-size configuration routes
pub mod packs;

pub use health::HealthRoutes;
pub use packs::PackRoutes;

use crate::config::HttpConfig;
use crate::middleware::{request_id_middleware, HttpMakeSpan, HttpOnResponse};
use crate::resources::ServerResources;
use axum::{middleware, Router};
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Build the complete application router
#[must_use]
pub fn router(resources: &ServerResources) -> Router {
    let routes = Router::new()
        .merge(PackRoutes::routes(resources.pack_configuration.clone()))
        .merge(HealthRoutes::routes(resources.health_checker.clone()));

    with_http_layers(routes, &resources.config.http)
}

/// Wrap `routes` in the standard middleware stack
///
/// Outermost first: request id, tracing span, body limit, request timeout.
#[must_use]
pub fn with_http_layers(routes: Router, http: &HttpConfig) -> Router {
    routes.layer(
        ServiceBuilder::new()
            .layer(middleware::from_fn(request_id_middleware))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(HttpMakeSpan)
                    .on_response(HttpOnResponse),
            )
            .layer(RequestBodyLimitLayer::new(http.body_limit_bytes))
            .layer(TimeoutLayer::new(http.request_timeout())),
    )
}
