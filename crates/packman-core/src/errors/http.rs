// ABOUTME: Axum response rendering for AppError
// ABOUTME: Logs the internal cause server-side and returns a sanitized JSON body
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{AppError, ErrorResponse};
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use tracing::{error, warn};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let request_id = self.request_id.as_deref().unwrap_or_default();

        if self.code.is_server_error() {
            let internal = self.source_chain().unwrap_or_default();
            error!(
                code = %self.code,
                message = %self.message,
                request_id,
                internal = %internal,
                "server error"
            );
        } else {
            warn!(
                code = %self.code,
                message = %self.message,
                request_id,
                "client error"
            );
        }

        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}
