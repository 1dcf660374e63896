// ABOUTME: Pack configuration, configuration history, and calculation result models
// ABOUTME: Versioned singleton configuration plus immutable pre-update snapshots
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::configuration::CONFIGURATION_ID;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Units contained in one pack
pub type PackSize = u32;

/// The active pack-size configuration
///
/// There is exactly one of these per deployment (id is fixed). Each successful
/// update bumps `version` by one and archives the previous state as a
/// [`PackConfigurationHistory`] row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackConfiguration {
    /// Fixed singleton id
    pub id: i64,
    /// Monotonic version, starts at 1
    pub version: i64,
    /// Allowed pack sizes, in first-occurrence order
    pub pack_sizes: Vec<PackSize>,
    /// When this version was written
    pub updated_at: DateTime<Utc>,
    /// Free-text actor label
    pub updated_by: Option<String>,
}

/// Immutable snapshot of a configuration taken just before it was replaced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackConfigurationHistory {
    /// History row id
    pub id: i64,
    /// Version the configuration had when archived
    pub version: i64,
    /// Pack sizes of the archived version
    pub pack_sizes: Vec<PackSize>,
    /// Actor that wrote the archived version
    pub created_by: Option<String>,
    /// When the snapshot was archived
    pub created_at: DateTime<Utc>,
}

impl From<PackConfigurationHistory> for PackConfiguration {
    fn from(history: PackConfigurationHistory) -> Self {
        Self {
            id: CONFIGURATION_ID,
            version: history.version,
            pack_sizes: history.pack_sizes,
            updated_at: history.created_at,
            updated_by: history.created_by,
        }
    }
}

/// Packs chosen to fulfil a requested quantity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackCalculation {
    /// Requested quantity
    pub quantity: u64,
    /// Pack size to number of packs, every count at least 1
    pub packs: BTreeMap<PackSize, u64>,
}

impl PackCalculation {
    /// Units shipped across all packs
    #[must_use]
    pub fn total_units(&self) -> u64 {
        self.packs
            .iter()
            .map(|(size, count)| u64::from(*size) * count)
            .sum()
    }

    /// Units shipped beyond the requested quantity
    #[must_use]
    pub fn overshoot(&self) -> u64 {
        self.total_units().saturating_sub(self.quantity)
    }

    /// Number of packs shipped
    #[must_use]
    pub fn pack_count(&self) -> u64 {
        self.packs.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculation_totals() {
        let calculation = PackCalculation {
            quantity: 7500,
            packs: BTreeMap::from([(5000, 1), (2000, 1), (500, 1)]),
        };
        assert_eq!(calculation.total_units(), 7500);
        assert_eq!(calculation.overshoot(), 0);
        assert_eq!(calculation.pack_count(), 3);
    }

    #[test]
    fn test_history_converts_to_configuration_snapshot() {
        let created_at = Utc::now();
        let history = PackConfigurationHistory {
            id: 7,
            version: 3,
            pack_sizes: vec![23, 31, 53],
            created_by: Some("ops".to_owned()),
            created_at,
        };

        let configuration = PackConfiguration::from(history);
        assert_eq!(configuration.id, CONFIGURATION_ID);
        assert_eq!(configuration.version, 3);
        assert_eq!(configuration.pack_sizes, vec![23, 31, 53]);
        assert_eq!(configuration.updated_at, created_at);
        assert_eq!(configuration.updated_by.as_deref(), Some("ops"));
    }
}
