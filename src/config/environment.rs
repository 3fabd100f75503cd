// ABOUTME: Environment configuration for the reptrack runtime: storage, queueing, and analysis settings
// ABOUTME: Reads REPTRACK_* variables with validated defaults and renders a startup summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based runtime configuration

use crate::constants::{defaults, env_config};
use reptrack_core::errors::{AppError, AppResult};
use reptrack_core::models::ExerciseKind;
use reptrack_intelligence::config::IntelligenceConfig;
use serde::{Deserialize, Serialize};
use std::env;
use tracing::info;

/// Complete runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// `SQLite` connection URL
    pub database_url: String,
    /// Bounded capacity of the frame analysis queue
    pub frame_queue_capacity: usize,
    /// Analysis thresholds and loop settings
    pub intelligence: IntelligenceConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            database_url: defaults::DATABASE_URL.to_owned(),
            frame_queue_capacity: defaults::FRAME_QUEUE_CAPACITY,
            intelligence: IntelligenceConfig::default(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` when a variable is malformed or a value fails validation
    pub fn from_env() -> AppResult<Self> {
        let frame_queue_capacity = match env::var(env_config::FRAME_QUEUE) {
            Ok(raw) => raw.trim().parse::<usize>().map_err(|e| {
                AppError::config(format!("{}='{raw}': {e}", env_config::FRAME_QUEUE))
            })?,
            Err(_) => defaults::FRAME_QUEUE_CAPACITY,
        };
        if frame_queue_capacity == 0 {
            return Err(AppError::config(format!(
                "{} must be at least 1",
                env_config::FRAME_QUEUE
            )));
        }

        let config = Self {
            database_url: env_var_or(env_config::DATABASE_URL, defaults::DATABASE_URL),
            frame_queue_capacity,
            intelligence: IntelligenceConfig::from_env()?,
        };
        info!("{}", config.summary());
        Ok(config)
    }

    /// Configuration summary for startup logging
    #[must_use]
    pub fn summary(&self) -> String {
        let bands = ExerciseKind::ALL
            .iter()
            .map(|kind| {
                let settings = self.intelligence.exercises.settings(*kind);
                format!(
                    "\n   {}: {}-{} deg, {}-{} ms",
                    kind.display_name(),
                    settings.thresholds.min_angle,
                    settings.thresholds.max_angle,
                    settings.tempo.min_ms,
                    settings.tempo.max_ms
                )
            })
            .collect::<String>();
        let difficulty = &self.intelligence.difficulty;
        format!(
            "reptrack configuration:\n\
             - Database: {}\n\
             - Frame Queue: {}\n\
             - Difficulty: batch {}, target {} deg, tolerance {}, start {}\n\
             - Recommendations: top {}\n\
             - Exercises:{}",
            self.database_url,
            self.frame_queue_capacity,
            difficulty.batch_size,
            difficulty.target_angle,
            difficulty.reward_tolerance,
            difficulty.initial_difficulty,
            self.intelligence.recommendation.top_k,
            bands
        )
    }
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}
