// ABOUTME: Intelligence configuration root combining exercise, difficulty, and recommendation settings
// ABOUTME: Loads every numeric knob from the environment with validated defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Intelligence Configuration Module
//!
//! All analysis thresholds are external configuration rather than hard-coded
//! dependencies of the algorithms.
//!
//! # Configuration Methods
//!
//! 1. Environment variables (highest priority):
//!    ```bash
//!    export REPTRACK_SQUAT_MIN_ANGLE=80
//!    export REPTRACK_DIFFICULTY_BATCH_SIZE=8
//!    export REPTRACK_RECOMMENDATION_TOP_K=5
//!    ```
//!
//! 2. Default values (if env vars not set)

/// Difficulty loop settings
pub mod difficulty;
/// Configuration error types
pub mod error;
/// Per-exercise bands and tempo windows
pub mod exercise;
/// Recommender settings
pub mod recommendation;

pub use difficulty::DifficultyConfig;
pub use error::ConfigError;
pub use exercise::{ExerciseConfig, ExerciseSettings, ExerciseThresholds, TempoWindow};
pub use recommendation::RecommendationConfig;

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::Display;
use std::str::FromStr;

/// Complete intelligence configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntelligenceConfig {
    /// Per-exercise settings
    pub exercises: ExerciseConfig,
    /// Difficulty loop settings
    pub difficulty: DifficultyConfig,
    /// Recommender settings
    pub recommendation: RecommendationConfig,
}

impl IntelligenceConfig {
    /// Load from environment variables and validate
    ///
    /// # Errors
    ///
    /// Returns an error when any variable is malformed or a value fails validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            exercises: ExerciseConfig::from_env()?,
            difficulty: DifficultyConfig::from_env()?,
            recommendation: RecommendationConfig::from_env()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first validation failure
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.exercises.validate()?;
        self.difficulty.validate()?;
        self.recommendation.validate()
    }
}

/// Parse an environment variable, using `default` when it is unset
pub(crate) fn env_parse<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::Parse(format!("{key}='{raw}': {e}"))),
        Err(_) => Ok(default),
    }
}
