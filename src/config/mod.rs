// ABOUTME: Configuration management module for runtime settings and analysis parameters
// ABOUTME: Re-exports the environment loader and the intelligence configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//! Configuration module for reptrack
//!
//! - **Environment**: runtime configuration from environment variables
//! - **Intelligence**: thresholds, tempo windows, difficulty loop and recommender
//!   settings (defined in `reptrack-intelligence`)

/// Environment and runtime configuration
pub mod environment;

pub use environment::RuntimeConfig;
pub use reptrack_intelligence::config::intelligence::{
    DifficultyConfig, ExerciseConfig, ExerciseSettings, ExerciseThresholds, RecommendationConfig,
    TempoWindow,
};
pub use reptrack_intelligence::config::{ConfigError, IntelligenceConfig};
