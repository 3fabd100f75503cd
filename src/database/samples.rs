// ABOUTME: Database operations for difficulty samples
// ABOUTME: Appends per-rep samples and reads the most recent batch for the controller
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use reptrack_core::models::Sample;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

/// Sample persistence
#[derive(Clone)]
pub struct SampleManager {
    pool: SqlitePool,
}

impl SampleManager {
    /// Create a new sample manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the samples table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS samples (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                recorded_at TEXT NOT NULL,
                angle REAL NOT NULL,
                error_tags TEXT NOT NULL DEFAULT '[]'
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create samples table: {e}")))?;

        Ok(())
    }

    /// Append a sample
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the insert fails
    pub async fn insert(&self, sample: &Sample) -> AppResult<()> {
        let tags = serde_json::to_string(&sample.error_tags)?;
        sqlx::query(
            r"
            INSERT INTO samples (recorded_at, angle, error_tags)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(sample.timestamp.to_rfc3339())
        .bind(sample.angle)
        .bind(tags)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert sample: {e}")))?;

        Ok(())
    }

    /// Most recent samples, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query or row decoding fails
    pub async fn recent(&self, limit: usize) -> AppResult<Vec<Sample>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = sqlx::query(
            r"
            SELECT recorded_at, angle, error_tags
            FROM samples
            ORDER BY id DESC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to read recent samples: {e}")))?;

        rows.iter().map(row_to_sample).collect()
    }
}

fn row_to_sample(row: &SqliteRow) -> AppResult<Sample> {
    let recorded_at: String = row.get("recorded_at");
    let tags_json: String = row.get("error_tags");

    Ok(Sample {
        timestamp: DateTime::parse_from_rfc3339(&recorded_at)
            .map_err(|e| AppError::internal(format!("Invalid datetime: {e}")))?
            .with_timezone(&Utc),
        angle: row.get("angle"),
        error_tags: serde_json::from_str(&tags_json)?,
    })
}
