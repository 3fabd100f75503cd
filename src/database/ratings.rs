// ABOUTME: Database operations for append-only workout ratings
// ABOUTME: Ratings are read back in insertion order so the last one is the most recent
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use chrono::Utc;
use reptrack_core::models::Rating;
use sqlx::{Row, SqlitePool};

/// Rating persistence
#[derive(Clone)]
pub struct RatingManager {
    pool: SqlitePool,
}

impl RatingManager {
    /// Create a new rating manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the ratings table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS ratings (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                workout_id TEXT NOT NULL,
                rating INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create ratings table: {e}")))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_ratings_workout ON ratings(workout_id)")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to create ratings index: {e}")))?;

        Ok(())
    }

    /// Append a rating
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn insert(&self, rating: &Rating) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO ratings (workout_id, rating, created_at)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(&rating.workout_id)
        .bind(i64::from(rating.value))
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert rating: {e}")))?;

        Ok(())
    }

    /// Every rating in insertion order
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored value is out of range
    pub async fn all(&self) -> AppResult<Vec<Rating>> {
        let rows = sqlx::query("SELECT workout_id, rating FROM ratings ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to read ratings: {e}")))?;

        rows.iter()
            .map(|row| {
                let value: i64 = row.get("rating");
                let value = u8::try_from(value).map_err(|_| {
                    AppError::value_out_of_range(format!("stored rating {value} is not a u8"))
                })?;
                Rating::new(row.get::<String, _>("workout_id"), value)
            })
            .collect()
    }
}
