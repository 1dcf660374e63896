// ABOUTME: Column encoding and decoding helpers for pack configuration rows.
// ABOUTME: Converts pack-size lists and timestamps between storage and model types.

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Model ↔ column conversion helpers
//!
//! `SQLite` stores pack sizes as a JSON array in TEXT and timestamps as
//! RFC 3339 TEXT. `PostgreSQL` stores `INTEGER[]` and `TIMESTAMPTZ`. Decoding a
//! malformed stored value is an `InvalidData` error, never a silent default.

use crate::errors::DatabaseError;
use chrono::{DateTime, Utc};
use packman_core::models::PackSize;

/// Map a driver error to a query error tagged with what was being attempted
pub fn query_failed(context: &'static str) -> impl FnOnce(sqlx::Error) -> DatabaseError {
    move |e| DatabaseError::QueryError {
        context: format!("{context}: {e}"),
    }
}

/// Encode pack sizes as a JSON array
///
/// # Errors
///
/// Returns `InvalidData` if serialization fails
pub fn encode_pack_sizes_json(pack_sizes: &[PackSize]) -> Result<String, DatabaseError> {
    serde_json::to_string(pack_sizes).map_err(|e| DatabaseError::InvalidData {
        context: format!("pack_sizes could not be encoded: {e}"),
    })
}

/// Decode a JSON array of pack sizes
///
/// # Errors
///
/// Returns `InvalidData` if the text is not a JSON array of unsigned integers
pub fn decode_pack_sizes_json(raw: &str) -> Result<Vec<PackSize>, DatabaseError> {
    serde_json::from_str(raw).map_err(|e| DatabaseError::InvalidData {
        context: format!("pack_sizes '{raw}' is not a JSON integer array: {e}"),
    })
}

/// Decode an RFC 3339 timestamp
///
/// # Errors
///
/// Returns `InvalidData` if the text is not RFC 3339
pub fn decode_timestamp(column: &str, raw: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DatabaseError::InvalidData {
            context: format!("{column} '{raw}' is not an RFC 3339 timestamp: {e}"),
        })
}

/// Convert pack sizes to `INTEGER[]` elements
///
/// # Errors
///
/// Returns `InvalidData` if a size does not fit a 32-bit signed integer
pub fn pack_sizes_to_i32(pack_sizes: &[PackSize]) -> Result<Vec<i32>, DatabaseError> {
    pack_sizes
        .iter()
        .map(|size| {
            i32::try_from(*size).map_err(|_| DatabaseError::InvalidData {
                context: format!("pack size {size} exceeds INTEGER range"),
            })
        })
        .collect()
}

/// Convert `INTEGER[]` elements to pack sizes
///
/// # Errors
///
/// Returns `InvalidData` if a stored size is negative
pub fn pack_sizes_from_i32(values: Vec<i32>) -> Result<Vec<PackSize>, DatabaseError> {
    values
        .into_iter()
        .map(|value| {
            PackSize::try_from(value).map_err(|_| DatabaseError::InvalidData {
                context: format!("stored pack size {value} is negative"),
            })
        })
        .collect()
}

/// Treat empty actor labels as absent
#[must_use]
pub fn normalize_actor(updated_by: Option<&str>) -> Option<&str> {
    updated_by.filter(|actor| !actor.is_empty())
}
