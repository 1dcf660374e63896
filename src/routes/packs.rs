// ABOUTME: Pack calculation and pack-size configuration route handlers
// ABOUTME: Validates requests, delegates to the configuration manager and shapes JSON responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Pack routes
//!
//! - `POST /api/v1/calculate` fulfils a quantity with the active pack sizes
//! - `GET /api/v1/pack-sizes` returns the active configuration
//! - `PUT /api/v1/pack-sizes` replaces the pack sizes and echoes the new configuration
//! - `GET /api/v1/pack-sizes/history` lists archived configurations, newest first

use crate::constants::endpoints;
use crate::errors::{AppError, AppResult};
use crate::middleware::RequestId;
use crate::services::pack_validation::{validate_pack_sizes, validate_quantity, validate_updated_by};
use crate::services::PackConfigurationManager;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{DateTime, Utc};
use packman_core::models::{PackCalculation, PackConfiguration, PackSize};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Request body for `POST /api/v1/calculate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateRequest {
    /// Units to fulfil
    pub quantity: i64,
}

/// Response body for `POST /api/v1/calculate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateResponse {
    /// Units requested
    pub quantity: u64,
    /// Pack size to number of packs
    pub packs: BTreeMap<PackSize, u64>,
}

impl From<PackCalculation> for CalculateResponse {
    fn from(calculation: PackCalculation) -> Self {
        Self {
            quantity: calculation.quantity,
            packs: calculation.packs,
        }
    }
}

/// A pack-size configuration as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackSizesResponse {
    /// Allowed pack sizes
    pub pack_sizes: Vec<PackSize>,
    /// Configuration version
    pub version: i64,
    /// When this version was written
    pub updated_at: DateTime<Utc>,
    /// Actor that wrote this version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}

impl From<PackConfiguration> for PackSizesResponse {
    fn from(configuration: PackConfiguration) -> Self {
        Self {
            pack_sizes: configuration.pack_sizes,
            version: configuration.version,
            updated_at: configuration.updated_at,
            updated_by: configuration.updated_by,
        }
    }
}

/// Request body for `PUT /api/v1/pack-sizes`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePackSizesRequest {
    /// Replacement pack sizes, duplicates allowed
    pub pack_sizes: Vec<i64>,
    /// Actor label
    #[serde(default)]
    pub updated_by: Option<String>,
}

/// Query string for `GET /api/v1/pack-sizes/history`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    /// Page size
    pub limit: Option<i64>,
}

/// Response body for `GET /api/v1/pack-sizes/history`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    /// Archived configurations, newest first
    pub history: Vec<PackSizesResponse>,
}

/// Pack calculation and configuration routes
pub struct PackRoutes;

impl PackRoutes {
    /// Create all pack routes
    pub fn routes(manager: PackConfigurationManager) -> Router {
        Router::new()
            .route(endpoints::CALCULATE, post(Self::handle_calculate))
            .route(
                endpoints::PACK_SIZES,
                get(Self::handle_get_pack_sizes).put(Self::handle_update_pack_sizes),
            )
            .route(endpoints::PACK_SIZES_HISTORY, get(Self::handle_get_history))
            .with_state(manager)
    }

    /// Handle pack calculation
    async fn handle_calculate(
        State(manager): State<PackConfigurationManager>,
        request_id: Option<Extension<RequestId>>,
        payload: Result<Json<CalculateRequest>, JsonRejection>,
    ) -> Result<Json<CalculateResponse>, AppError> {
        Self::calculate(&manager, payload)
            .await
            .map(Json)
            .map_err(|e| attach_request_id(e, request_id.as_deref()))
    }

    async fn calculate(
        manager: &PackConfigurationManager,
        payload: Result<Json<CalculateRequest>, JsonRejection>,
    ) -> AppResult<CalculateResponse> {
        let Json(request) = payload.map_err(invalid_body)?;
        let quantity = validate_quantity(request.quantity)?;

        let calculation = manager.calculate(quantity).await?;
        info!(
            quantity,
            pack_count = calculation.pack_count(),
            overshoot = calculation.overshoot(),
            "Calculated packs"
        );
        Ok(calculation.into())
    }

    /// Handle get active pack sizes
    async fn handle_get_pack_sizes(
        State(manager): State<PackConfigurationManager>,
        request_id: Option<Extension<RequestId>>,
    ) -> Result<Json<PackSizesResponse>, AppError> {
        manager
            .get_active_configuration()
            .await
            .map(|configuration| Json(configuration.into()))
            .map_err(|e| attach_request_id(e, request_id.as_deref()))
    }

    /// Handle pack-size replacement
    async fn handle_update_pack_sizes(
        State(manager): State<PackConfigurationManager>,
        request_id: Option<Extension<RequestId>>,
        payload: Result<Json<UpdatePackSizesRequest>, JsonRejection>,
    ) -> Result<Json<PackSizesResponse>, AppError> {
        Self::update_pack_sizes(&manager, payload)
            .await
            .map(Json)
            .map_err(|e| attach_request_id(e, request_id.as_deref()))
    }

    async fn update_pack_sizes(
        manager: &PackConfigurationManager,
        payload: Result<Json<UpdatePackSizesRequest>, JsonRejection>,
    ) -> AppResult<PackSizesResponse> {
        let Json(request) = payload.map_err(invalid_body)?;
        let pack_sizes = validate_pack_sizes(&request.pack_sizes)?;
        validate_updated_by(request.updated_by.as_deref())?;

        let configuration = manager
            .update_sizes(&pack_sizes, request.updated_by.as_deref())
            .await?;
        Ok(configuration.into())
    }

    /// Handle configuration history listing
    async fn handle_get_history(
        State(manager): State<PackConfigurationManager>,
        request_id: Option<Extension<RequestId>>,
        query: Result<Query<HistoryQuery>, QueryRejection>,
    ) -> Result<Json<HistoryResponse>, AppError> {
        let result = match query {
            Ok(Query(query)) => manager.get_history(query.limit).await.map(|history| {
                Json(HistoryResponse {
                    history: history.into_iter().map(PackSizesResponse::from).collect(),
                })
            }),
            Err(rejection) => {
                warn!(error = %rejection, "Rejected history query");
                Err(AppError::bad_request("Invalid query parameters"))
            }
        };
        result.map_err(|e| attach_request_id(e, request_id.as_deref()))
    }
}

fn invalid_body(rejection: JsonRejection) -> AppError {
    warn!(error = %rejection, "Rejected request body");
    AppError::bad_request("Invalid request format")
}

fn attach_request_id(error: AppError, request_id: Option<&RequestId>) -> AppError {
    match request_id {
        Some(id) => error.with_request_id(id.as_str()),
        None => error,
    }
}
