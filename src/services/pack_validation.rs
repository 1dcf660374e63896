// ABOUTME: Input validation for pack calculation and pack-size update requests
// ABOUTME: Enforces quantity, pack size and actor label limits before any store access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::limits::{MAX_PACK_SIZE, MAX_QUANTITY, MAX_UPDATED_BY_LENGTH};
use crate::errors::{AppError, AppResult};
use packman_core::models::PackSize;
use packman_core::sets::dedup_preserving_order;

/// Validate a requested quantity
///
/// Accepted range is `1..=10_000_000`.
///
/// # Errors
///
/// Returns a validation error naming the violated bound
pub fn validate_quantity(quantity: i64) -> AppResult<u64> {
    if quantity <= 0 {
        return Err(AppError::invalid_input(
            "quantity must be greater than zero",
        ));
    }
    if quantity > MAX_QUANTITY {
        return Err(AppError::invalid_input(format!(
            "quantity must be less than or equal to {MAX_QUANTITY}"
        )));
    }
    u64::try_from(quantity).map_err(|_| AppError::invalid_input("quantity is out of range"))
}

/// Validate and deduplicate a pack-size list
///
/// Every size must be in `1..=1_000_000`. Duplicates are dropped keeping the
/// order of first occurrence.
///
/// # Errors
///
/// Returns a validation error for an empty list or an out-of-range size
pub fn validate_pack_sizes(pack_sizes: &[i64]) -> AppResult<Vec<PackSize>> {
    if pack_sizes.is_empty() {
        return Err(AppError::invalid_input("pack_sizes cannot be empty"));
    }

    let mut sizes = Vec::with_capacity(pack_sizes.len());
    for &size in pack_sizes {
        if size <= 0 {
            return Err(AppError::invalid_input(
                "pack sizes must be greater than zero",
            ));
        }
        if size > MAX_PACK_SIZE {
            return Err(AppError::invalid_input(format!(
                "pack sizes must be less than or equal to {MAX_PACK_SIZE}"
            )));
        }
        let size = PackSize::try_from(size)
            .map_err(|_| AppError::invalid_input("pack size is out of range"))?;
        sizes.push(size);
    }

    Ok(dedup_preserving_order(&sizes))
}

/// Validate the optional actor label
///
/// Length is counted in characters, not bytes.
///
/// # Errors
///
/// Returns a validation error if the label is longer than 100 characters
pub fn validate_updated_by(updated_by: Option<&str>) -> AppResult<()> {
    if updated_by.is_some_and(|actor| actor.chars().count() > MAX_UPDATED_BY_LENGTH) {
        return Err(AppError::invalid_input(format!(
            "updated_by must be less than or equal to {MAX_UPDATED_BY_LENGTH} characters"
        )));
    }
    Ok(())
}
