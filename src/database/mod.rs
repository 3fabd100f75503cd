// ABOUTME: Persistence contract for samples, ratings, and workout history
// ABOUTME: Async Store trait injected into the runtime plus its SQLite implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Persistence
//!
//! The runtime never reaches for a global database handle. Everything that
//! persists receives an `Arc<dyn Store>` at construction.

/// Rating storage operations
pub mod ratings;
/// Sample storage operations
pub mod samples;
/// `SQLite` store and schema
pub mod sqlite;
/// Workout history operations
pub mod workouts;

pub use ratings::RatingManager;
pub use samples::SampleManager;
pub use sqlite::SqliteStore;
pub use workouts::WorkoutManager;

use crate::errors::AppResult;
use async_trait::async_trait;
use reptrack_core::models::{
    Rating, RepFeedback, Sample, WorkoutDetails, WorkoutRecord, WorkoutStats, WorkoutSummary,
};

/// Storage collaborator for the analysis runtime
#[async_trait]
pub trait Store: Send + Sync {
    /// Append a difficulty sample
    async fn insert_sample(&self, sample: &Sample) -> AppResult<()>;

    /// Up to `limit` most recent samples, newest first
    async fn recent_samples(&self, limit: usize) -> AppResult<Vec<Sample>>;

    /// Append a workout rating
    async fn insert_rating(&self, rating: &Rating) -> AppResult<()>;

    /// Every rating in insertion order; the last one is the most recent
    async fn all_ratings(&self) -> AppResult<Vec<Rating>>;

    /// Persist a finished workout and its repetitions, returning the new id
    async fn save_workout(
        &self,
        summary: &WorkoutSummary,
        feedbacks: &[RepFeedback],
    ) -> AppResult<String>;

    /// Saved workouts, newest first
    async fn list_workouts(&self, limit: Option<u32>) -> AppResult<Vec<WorkoutRecord>>;

    /// One workout with its repetitions
    async fn workout_with_details(&self, workout_id: &str) -> AppResult<Option<WorkoutDetails>>;

    /// Aggregate history statistics
    async fn workout_stats(&self) -> AppResult<WorkoutStats>;

    /// Delete a workout and its repetitions; `false` when it did not exist
    async fn delete_workout(&self, workout_id: &str) -> AppResult<bool>;
}
