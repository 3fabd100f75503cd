// ABOUTME: Difficulty controller configuration: batch size, target, reward band, learning rates
// ABOUTME: Defaults reproduce the observed control loop (batch 5, target 45 degrees, strict 5 degree band)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::env_parse;
use super::error::ConfigError;
use reptrack_core::constants::difficulty;
use serde::{Deserialize, Serialize};
use std::env;

/// Difficulty control loop configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyConfig {
    /// Samples required before the controller acts
    pub batch_size: usize,
    /// Target mean angle in degrees
    pub target_angle: i64,
    /// A batch is on target when `|avg - target| < reward_tolerance`
    pub reward_tolerance: f64,
    /// Difficulty at process start
    pub initial_difficulty: u32,
    /// Probability of a random action
    pub exploration_rate: f64,
    /// Step size of value updates
    pub learning_rate: f64,
    /// Weight of the next state's value
    pub discount_factor: f64,
    /// Seed for the exploration RNG; entropy when unset
    pub seed: Option<u64>,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            batch_size: difficulty::BATCH_SIZE,
            target_angle: difficulty::TARGET_ANGLE,
            reward_tolerance: difficulty::REWARD_TOLERANCE,
            initial_difficulty: difficulty::MIN_DIFFICULTY,
            exploration_rate: 0.1,
            learning_rate: 0.1,
            discount_factor: 0.9,
            seed: None,
        }
    }
}

impl DifficultyConfig {
    /// Load from `REPTRACK_DIFFICULTY_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns `Parse` when a variable is set but malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let seed = match env::var("REPTRACK_DIFFICULTY_SEED") {
            Ok(raw) => Some(raw.trim().parse::<u64>().map_err(|e| {
                ConfigError::Parse(format!("REPTRACK_DIFFICULTY_SEED='{raw}': {e}"))
            })?),
            Err(_) => None,
        };
        Ok(Self {
            batch_size: env_parse("REPTRACK_DIFFICULTY_BATCH_SIZE", defaults.batch_size)?,
            target_angle: env_parse("REPTRACK_DIFFICULTY_TARGET_ANGLE", defaults.target_angle)?,
            reward_tolerance: env_parse(
                "REPTRACK_DIFFICULTY_REWARD_TOLERANCE",
                defaults.reward_tolerance,
            )?,
            initial_difficulty: env_parse(
                "REPTRACK_DIFFICULTY_INITIAL",
                defaults.initial_difficulty,
            )?,
            exploration_rate: env_parse(
                "REPTRACK_DIFFICULTY_EXPLORATION_RATE",
                defaults.exploration_rate,
            )?,
            learning_rate: env_parse("REPTRACK_DIFFICULTY_LEARNING_RATE", defaults.learning_rate)?,
            discount_factor: env_parse(
                "REPTRACK_DIFFICULTY_DISCOUNT_FACTOR",
                defaults.discount_factor,
            )?,
            seed,
        })
    }

    /// Validate ranges
    ///
    /// # Errors
    ///
    /// Returns an error for a zero batch, a non-positive tolerance, or rates outside `[0,1]`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::ValueOutOfRange("batch size must be at least 1"));
        }
        if self.initial_difficulty < difficulty::MIN_DIFFICULTY {
            return Err(ConfigError::ValueOutOfRange("initial difficulty must be at least 1"));
        }
        if !(self.reward_tolerance.is_finite() && self.reward_tolerance > 0.0) {
            return Err(ConfigError::ValueOutOfRange("reward tolerance must be positive"));
        }
        for (name, rate) in [
            ("exploration rate", self.exploration_rate),
            ("learning rate", self.learning_rate),
            ("discount factor", self.discount_factor),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(ConfigError::InvalidRange(format!(
                    "{name} must be within [0,1], got {rate}"
                )));
            }
        }
        Ok(())
    }
}
