// ABOUTME: Database operations for the workout history: workouts and their repetition details
// ABOUTME: Handles transactional save and delete, newest-first listing, and aggregate statistics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use reptrack_core::models::{
    ExerciseKind, FormRating, RepDetail, RepFeedback, SpeedRating, WorkoutDetails, WorkoutRecord,
    WorkoutStats, WorkoutSummary,
};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Workout history persistence
#[derive(Clone)]
pub struct WorkoutManager {
    pool: SqlitePool,
}

impl WorkoutManager {
    /// Create a new workout manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create workouts and `rep_details` tables
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workouts (
                id TEXT PRIMARY KEY,
                exercise_kind TEXT NOT NULL,
                start_time TEXT NOT NULL,
                duration_ms INTEGER NOT NULL,
                total_reps INTEGER NOT NULL,
                perfect_reps INTEGER NOT NULL,
                avg_angle REAL NOT NULL,
                score INTEGER NOT NULL CHECK (score BETWEEN 0 AND 100),
                difficulty_at_end INTEGER NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create workouts table: {e}")))?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS rep_details (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                workout_id TEXT NOT NULL REFERENCES workouts(id),
                rep_number INTEGER NOT NULL,
                angle REAL NOT NULL,
                form_rating TEXT NOT NULL,
                speed_rating TEXT NOT NULL,
                issues TEXT NOT NULL DEFAULT '[]',
                recorded_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create rep_details table: {e}")))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_rep_details_workout ON rep_details(workout_id)")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to create rep_details index: {e}")))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_workouts_start ON workouts(start_time)")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to create workouts index: {e}")))?;

        Ok(())
    }

    /// Save a workout and one detail row per repetition in one transaction
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any insert fails; nothing is written then
    pub async fn save(
        &self,
        summary: &WorkoutSummary,
        feedbacks: &[RepFeedback],
    ) -> AppResult<String> {
        let workout_id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        sqlx::query(
            r"
            INSERT INTO workouts (
                id, exercise_kind, start_time, duration_ms, total_reps,
                perfect_reps, avg_angle, score, difficulty_at_end, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(&workout_id)
        .bind(summary.exercise_kind.as_str())
        .bind(summary.start_time.to_rfc3339())
        .bind(i64::try_from(summary.duration_ms).unwrap_or(i64::MAX))
        .bind(i64::from(summary.total_reps))
        .bind(i64::from(summary.perfect_reps))
        .bind(summary.avg_angle)
        .bind(i64::from(summary.score))
        .bind(i64::from(summary.difficulty_at_end))
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert workout: {e}")))?;

        for (index, feedback) in feedbacks.iter().enumerate() {
            let issues = serde_json::to_string(&feedback.issues)?;
            sqlx::query(
                r"
                INSERT INTO rep_details (
                    workout_id, rep_number, angle, form_rating, speed_rating, issues, recorded_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                ",
            )
            .bind(&workout_id)
            .bind(i64::try_from(index + 1).unwrap_or(i64::MAX))
            .bind(feedback.angle)
            .bind(feedback.form_rating.as_str())
            .bind(feedback.speed_rating.as_str())
            .bind(issues)
            .bind(&now)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to insert rep detail: {e}")))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit workout: {e}")))?;

        Ok(workout_id)
    }

    /// Saved workouts, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query or row decoding fails
    pub async fn list(&self, limit: Option<u32>) -> AppResult<Vec<WorkoutRecord>> {
        let limit = limit.map_or(-1, i64::from);
        let rows = sqlx::query(
            r"
            SELECT id, exercise_kind, start_time, duration_ms, total_reps,
                   perfect_reps, avg_angle, score, difficulty_at_end
            FROM workouts
            ORDER BY start_time DESC, created_at DESC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list workouts: {e}")))?;

        rows.iter().map(row_to_workout).collect()
    }

    /// One workout with its repetitions ordered by rep number
    ///
    /// # Errors
    ///
    /// Returns an error if a query or row decoding fails
    pub async fn get_with_details(&self, workout_id: &str) -> AppResult<Option<WorkoutDetails>> {
        let row = sqlx::query(
            r"
            SELECT id, exercise_kind, start_time, duration_ms, total_reps,
                   perfect_reps, avg_angle, score, difficulty_at_end
            FROM workouts
            WHERE id = $1
            ",
        )
        .bind(workout_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get workout: {e}")))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let workout = row_to_workout(&row)?;

        let rows = sqlx::query(
            r"
            SELECT workout_id, rep_number, angle, form_rating, speed_rating, issues, recorded_at
            FROM rep_details
            WHERE workout_id = $1
            ORDER BY rep_number ASC
            ",
        )
        .bind(workout_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get rep details: {e}")))?;

        let reps = rows.iter().map(row_to_rep_detail).collect::<AppResult<Vec<_>>>()?;
        Ok(Some(WorkoutDetails { workout, reps }))
    }

    /// Count, total reps, perfect reps, and mean score across all workouts
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn stats(&self) -> AppResult<WorkoutStats> {
        let row = sqlx::query(
            r"
            SELECT COUNT(*) AS total_workouts,
                   COALESCE(SUM(total_reps), 0) AS total_reps,
                   COALESCE(SUM(perfect_reps), 0) AS perfect_reps,
                   COALESCE(AVG(score), 0.0) AS average_score
            FROM workouts
            ",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to compute workout stats: {e}")))?;

        let total_workouts: i64 = row.get("total_workouts");
        let total_reps: i64 = row.get("total_reps");
        let perfect_reps: i64 = row.get("perfect_reps");

        Ok(WorkoutStats {
            total_workouts: total_workouts as u32,
            total_reps: total_reps as u32,
            perfect_form_reps: perfect_reps as u32,
            average_score: row.get("average_score"),
        })
    }

    /// Delete rep details first, then the workout
    ///
    /// # Errors
    ///
    /// Returns an error if either delete fails
    pub async fn delete(&self, workout_id: &str) -> AppResult<bool> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        sqlx::query("DELETE FROM rep_details WHERE workout_id = $1")
            .bind(workout_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete rep details: {e}")))?;

        let result = sqlx::query("DELETE FROM workouts WHERE id = $1")
            .bind(workout_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete workout: {e}")))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit delete: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}

fn parse_timestamp(raw: &str) -> AppResult<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)
        .map_err(|e| AppError::internal(format!("Invalid datetime: {e}")))?
        .with_timezone(&Utc))
}

fn row_to_workout(row: &SqliteRow) -> AppResult<WorkoutRecord> {
    let kind_str: String = row.get("exercise_kind");
    let start_time: String = row.get("start_time");
    let duration_ms: i64 = row.get("duration_ms");
    let total_reps: i64 = row.get("total_reps");
    let perfect_reps: i64 = row.get("perfect_reps");
    let score: i64 = row.get("score");
    let difficulty_at_end: i64 = row.get("difficulty_at_end");

    Ok(WorkoutRecord {
        id: row.get("id"),
        summary: WorkoutSummary {
            exercise_kind: kind_str.parse::<ExerciseKind>()?,
            start_time: parse_timestamp(&start_time)?,
            duration_ms: duration_ms as u64,
            total_reps: total_reps as u32,
            perfect_reps: perfect_reps as u32,
            avg_angle: row.get("avg_angle"),
            score: score.clamp(0, 100) as u8,
            difficulty_at_end: difficulty_at_end as u32,
        },
    })
}

fn row_to_rep_detail(row: &SqliteRow) -> AppResult<RepDetail> {
    let rep_number: i64 = row.get("rep_number");
    let form_rating: String = row.get("form_rating");
    let speed_rating: String = row.get("speed_rating");
    let issues_json: String = row.get("issues");
    let recorded_at: String = row.get("recorded_at");
    let issues: BTreeSet<_> = serde_json::from_str(&issues_json)?;

    Ok(RepDetail {
        workout_id: row.get("workout_id"),
        rep_number: rep_number as u32,
        angle: row.get("angle"),
        form_rating: FormRating::parse(&form_rating),
        speed_rating: SpeedRating::parse(&speed_rating),
        issues,
        recorded_at: parse_timestamp(&recorded_at)?,
    })
}
