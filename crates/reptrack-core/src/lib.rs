// ABOUTME: Core types and constants for the reptrack exercise analysis workspace
// ABOUTME: Foundation crate with error handling, domain models, and landmark constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Reptrack Core
//!
//! Foundation crate providing shared types and constants for repetition counting
//! and form analysis. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Landmark numbering and default thresholds
//! - **models**: Joints, exercises, feedback, samples, ratings, and workouts

/// Unified error handling system with standard error codes
pub mod errors;

/// Landmark indices and default analysis constants
pub mod constants;

/// Core data models
pub mod models;
