// ABOUTME: SQLite-backed Store implementation composed from the per-table managers
// ABOUTME: Opens the pool, runs schema creation, and delegates each Store call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{RatingManager, SampleManager, Store, WorkoutManager};
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use reptrack_core::models::{
    Rating, RepFeedback, Sample, WorkoutDetails, WorkoutRecord, WorkoutStats, WorkoutSummary,
};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::info;

/// `SQLite` store for samples, ratings, and workout history
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connect and create the schema
    ///
    /// File URLs are opened with `mode=rwc` so the database file is created on
    /// first use. In-memory URLs get a single connection so every query sees
    /// the same database.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or schema creation fails
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        let pool = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .connect(database_url)
                .await
        } else {
            let connection_options =
                if database_url.starts_with("sqlite:") && !database_url.contains('?') {
                    format!("{database_url}?mode=rwc")
                } else {
                    database_url.to_owned()
                };
            SqlitePool::connect(&connection_options).await
        }
        .map_err(|e| AppError::database(format!("Failed to connect to {database_url}: {e}")))?;

        let store = Self { pool };
        store.migrate().await?;
        info!(database_url, "workout store ready");
        Ok(store)
    }

    /// Create every table used by the store
    ///
    /// # Errors
    ///
    /// Returns an error if any table creation fails
    pub async fn migrate(&self) -> AppResult<()> {
        SampleManager::new(self.pool.clone()).migrate().await?;
        RatingManager::new(self.pool.clone()).migrate().await?;
        WorkoutManager::new(self.pool.clone()).migrate().await
    }

    /// Underlying connection pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn samples(&self) -> SampleManager {
        SampleManager::new(self.pool.clone())
    }

    fn ratings(&self) -> RatingManager {
        RatingManager::new(self.pool.clone())
    }

    fn workouts(&self) -> WorkoutManager {
        WorkoutManager::new(self.pool.clone())
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn insert_sample(&self, sample: &Sample) -> AppResult<()> {
        self.samples().insert(sample).await
    }

    async fn recent_samples(&self, limit: usize) -> AppResult<Vec<Sample>> {
        self.samples().recent(limit).await
    }

    async fn insert_rating(&self, rating: &Rating) -> AppResult<()> {
        self.ratings().insert(rating).await
    }

    async fn all_ratings(&self) -> AppResult<Vec<Rating>> {
        self.ratings().all().await
    }

    async fn save_workout(
        &self,
        summary: &WorkoutSummary,
        feedbacks: &[RepFeedback],
    ) -> AppResult<String> {
        self.workouts().save(summary, feedbacks).await
    }

    async fn list_workouts(&self, limit: Option<u32>) -> AppResult<Vec<WorkoutRecord>> {
        self.workouts().list(limit).await
    }

    async fn workout_with_details(&self, workout_id: &str) -> AppResult<Option<WorkoutDetails>> {
        self.workouts().get_with_details(workout_id).await
    }

    async fn workout_stats(&self) -> AppResult<WorkoutStats> {
        self.workouts().stats().await
    }

    async fn delete_workout(&self, workout_id: &str) -> AppResult<bool> {
        self.workouts().delete(workout_id).await
    }
}
