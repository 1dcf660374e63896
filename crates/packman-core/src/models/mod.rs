// ABOUTME: Core data models for pack configuration and calculation
// ABOUTME: Re-exports pack configuration, history snapshot, and calculation result types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Core data models

/// Pack configuration, history, and calculation result types
pub mod pack;

pub use pack::{PackCalculation, PackConfiguration, PackConfigurationHistory, PackSize};
