// ABOUTME: Application constants re-exported from packman-core
// ABOUTME: Limits, endpoints, network and database defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use packman_core::constants::{
    configuration, database, endpoints, limits, network, service_names,
};
