// ABOUTME: Samples, ratings, and the discretized controller state
// ABOUTME: Coarse records feeding the difficulty loop and the workout recommender
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::recommendation::{MAX_RATING, MIN_RATING};
use crate::errors::{AppError, AppResult};

/// Coarse per-repetition record used only by the difficulty controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// When the repetition completed
    pub timestamp: DateTime<Utc>,
    /// Controlling angle at completion
    pub angle: f64,
    /// Raw anomaly tags seen during the repetition
    pub error_tags: Vec<String>,
}

impl Sample {
    /// Build a sample stamped with the current time
    #[must_use]
    pub fn now(angle: f64, error_tags: Vec<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            angle,
            error_tags,
        }
    }
}

/// Append-only rating of a saved workout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    /// Rated workout
    pub workout_id: String,
    /// Rating value in `[1,5]`
    pub value: u8,
}

impl Rating {
    /// Validated rating
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` when `value` is outside `[1,5]`
    pub fn new(workout_id: impl Into<String>, value: u8) -> AppResult<Self> {
        if !(MIN_RATING..=MAX_RATING).contains(&value) {
            return Err(AppError::value_out_of_range(format!(
                "rating must be between {MIN_RATING} and {MAX_RATING}, got {value}"
            )));
        }
        Ok(Self {
            workout_id: workout_id.into(),
            value,
        })
    }
}

/// Discretized key of the controller's value table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DifficultyState {
    /// Rounded mean angle over the batch
    pub avg_angle: i64,
    /// Total anomaly tags over the batch
    pub error_count: usize,
}
