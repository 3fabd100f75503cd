// ABOUTME: Recommendation engine configuration for next-workout suggestions
// ABOUTME: Controls how many similar workouts are returned per query
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::env_parse;
use super::error::ConfigError;
use reptrack_core::constants::recommendation;
use serde::{Deserialize, Serialize};

/// Recommendation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// Maximum suggestions per query
    pub top_k: usize,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            top_k: recommendation::TOP_K,
        }
    }
}

impl RecommendationConfig {
    /// Load from `REPTRACK_RECOMMENDATION_TOP_K`
    ///
    /// # Errors
    ///
    /// Returns `Parse` when the variable is set but not an integer
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            top_k: env_parse("REPTRACK_RECOMMENDATION_TOP_K", recommendation::TOP_K)?,
        })
    }

    /// Validate ranges
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` when `top_k` is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_k == 0 {
            return Err(ConfigError::ValueOutOfRange("top_k must be at least 1"));
        }
        Ok(())
    }
}
