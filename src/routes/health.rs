// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Database-backed health probe and static readiness probe
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health check routes for service monitoring
//!
//! `/health` pings the database and answers 503 when it is unreachable.
//! `/ready` answers as soon as the listener is up.

use crate::constants::endpoints;
use crate::health::{HealthChecker, HealthStatus};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(health_checker: Arc<HealthChecker>) -> Router {
        Router::new()
            .route(endpoints::HEALTH, get(Self::handle_health))
            .route(endpoints::READY, get(Self::handle_ready))
            .with_state(health_checker)
    }

    async fn handle_health(State(health_checker): State<Arc<HealthChecker>>) -> Response {
        let health = health_checker.check().await;
        let status = match health.status {
            HealthStatus::Healthy => StatusCode::OK,
            HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        };
        (status, Json(health)).into_response()
    }

    async fn handle_ready() -> Json<serde_json::Value> {
        Json(serde_json::json!({
            "status": "ready",
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }
}
