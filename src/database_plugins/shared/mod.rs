// ABOUTME: Shared database utilities for SQLite and PostgreSQL implementations
// ABOUTME: Transaction guards and row decoding used by both backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Shared database utilities
//!
//! Code that both backends need, kept in one place so the update protocol and
//! row decoding cannot drift between them.

/// Row and column decoding
pub mod mappers;
/// RAII transaction guard
pub mod transactions;
