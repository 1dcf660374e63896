// ABOUTME: Pack calculation engine using largest-first greedy allocation
// ABOUTME: Covers any shortfall with one extra pack of the smallest configured size
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Pack Calculation Engine
//!
//! Maps a requested quantity onto the configured pack sizes. Sizes are visited
//! largest first, each taking as many whole packs as fit into what remains. A
//! non-zero remainder smaller than every size is covered by one additional pack
//! of the smallest size, so the result never under-fulfils.
//!
//! The procedure is deterministic but not pack-count minimal: with sizes
//! `{23, 31, 53}` and a quantity of `500_000` it yields
//! `{53: 9433, 31: 1, 23: 1}`. Callers rely on this exact output.
//!
//! The engine is a pure function with no shared state and is safe to call
//! from any number of request tasks concurrently.

use crate::errors::{AppError, AppResult};
use packman_core::models::{PackCalculation, PackSize};
use std::collections::BTreeMap;

/// Compute the packs needed to fulfil `quantity`
///
/// `pack_sizes` may be in any order and may contain repeats.
///
/// # Errors
///
/// Returns an internal error if `pack_sizes` is empty or contains a zero size.
/// Both indicate a broken configuration since callers validate sizes before
/// they are stored.
pub fn calculate_packs(quantity: u64, pack_sizes: &[PackSize]) -> AppResult<PackCalculation> {
    let smallest = pack_sizes
        .iter()
        .copied()
        .min()
        .ok_or_else(|| AppError::internal("Pack configuration is empty"))?;
    if smallest == 0 {
        return Err(AppError::internal(
            "Pack configuration contains a zero pack size",
        ));
    }

    let mut descending = pack_sizes.to_vec();
    descending.sort_unstable_by(|a, b| b.cmp(a));
    descending.dedup();

    let mut packs = BTreeMap::new();
    let mut remaining = quantity;
    for size in descending {
        if remaining == 0 {
            break;
        }
        let units = u64::from(size);
        if remaining >= units {
            packs.insert(size, remaining / units);
            remaining %= units;
        }
    }

    if remaining > 0 {
        *packs.entry(smallest).or_insert(0) += 1;
    }

    Ok(PackCalculation { quantity, packs })
}
