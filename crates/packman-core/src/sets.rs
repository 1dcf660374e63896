// ABOUTME: Order-preserving deduplication for pack-size lists
// ABOUTME: Keeps the first occurrence of each value and drops later repeats
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashSet;
use std::hash::Hash;

/// Remove duplicates while keeping the order of first occurrence
#[must_use]
pub fn dedup_preserving_order<T>(items: &[T]) -> Vec<T>
where
    T: Copy + Eq + Hash,
{
    let mut seen = HashSet::with_capacity(items.len());
    items.iter().copied().filter(|item| seen.insert(*item)).collect()
}
