// ABOUTME: Configuration module for reptrack-intelligence crate
// ABOUTME: Re-exports intelligence configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Intelligence module configuration (exercises, difficulty, recommendation)
pub mod intelligence;

pub use intelligence::{ConfigError, IntelligenceConfig};
