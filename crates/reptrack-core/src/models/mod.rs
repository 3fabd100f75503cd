// ABOUTME: Domain models for pose frames, exercises, feedback, and workouts
// ABOUTME: Re-exports every model type at the module root
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Exercise kinds and body sides
pub mod exercise;
/// Form issues, ratings, and repetition feedback
pub mod feedback;
/// Joints and frame landmarks
pub mod pose;
/// Samples, ratings, and controller state
pub mod training;
/// Workout summaries and history records
pub mod workout;

pub use exercise::{ExerciseKind, Side};
pub use feedback::{
    FormIssue, FormRating, IssueEntry, RepFeedback, Severity, SpeedRating, ISSUE_CATALOG,
};
pub use pose::{FrameLandmarks, Joint};
pub use training::{DifficultyState, Rating, Sample};
pub use workout::{
    Grade, RepDetail, WorkoutDetails, WorkoutRecord, WorkoutStats, WorkoutSummary,
};
