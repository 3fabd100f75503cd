// ABOUTME: Unified error handling re-exported from reptrack-core
// ABOUTME: Keeps `reptrack::errors::*` paths stable for the runtime modules and binaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling
//!
//! `AppError`, `ErrorCode` and `AppResult` are defined in `reptrack-core` so the
//! analysis crate and the runtime share one taxonomy.

pub use reptrack_core::errors::{AppError, AppResult, ErrorCode};
