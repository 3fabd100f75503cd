// ABOUTME: Workout session lifecycle: start, record completed reps while active, finish into a summary
// ABOUTME: Optional target reps stop the session automatically once reached
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Workout Sessions
//!
//! A [`WorkoutSession`] exists between starting and stopping a workout. Reps
//! completed while it is active are appended to its feedback list; at finish
//! it is summarized into a [`WorkoutSummary`] plus a [`WorkoutAnalysis`].

use chrono::{DateTime, Utc};
use reptrack_core::models::{ExerciseKind, RepFeedback, WorkoutSummary};
use reptrack_intelligence::analyzer::{CompletedRep, FrameReport};
use reptrack_intelligence::scoring::workout_score;
use reptrack_intelligence::workout_analysis::WorkoutAnalysis;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// What happened to a rep handed to [`WorkoutSession::record`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordOutcome {
    /// Session not active; the rep was not counted
    Ignored,
    /// Counted; carries the running total
    Counted(u32),
    /// Counted and the target was reached; the session is now stopped
    TargetReached(u32),
}

impl RecordOutcome {
    /// Whether the rep became part of the workout
    #[must_use]
    pub const fn is_counted(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// A finished workout ready to persist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinishedWorkout {
    /// Summary as persisted
    pub summary: WorkoutSummary,
    /// Per-rep judgments in completion order
    pub feedbacks: Vec<RepFeedback>,
    /// Post-workout breakdown
    pub analysis: WorkoutAnalysis,
}

/// One workout between start and stop
#[derive(Debug, Clone)]
pub struct WorkoutSession {
    exercise: ExerciseKind,
    start_time: DateTime<Utc>,
    target_reps: Option<u32>,
    feedbacks: Vec<RepFeedback>,
    active: bool,
    first_frame_ms: Option<u64>,
    last_frame_ms: Option<u64>,
}

impl WorkoutSession {
    /// Start a session now
    #[must_use]
    pub fn start(exercise: ExerciseKind, target_reps: Option<u32>) -> Self {
        Self::start_at(exercise, target_reps, Utc::now())
    }

    /// Start a session at a given wall-clock time
    #[must_use]
    pub fn start_at(
        exercise: ExerciseKind,
        target_reps: Option<u32>,
        start_time: DateTime<Utc>,
    ) -> Self {
        info!(exercise = %exercise, ?target_reps, "workout started");
        Self {
            exercise,
            start_time,
            target_reps: target_reps.filter(|target| *target > 0),
            feedbacks: Vec::new(),
            active: true,
            first_frame_ms: None,
            last_frame_ms: None,
        }
    }

    /// Exercise performed
    #[must_use]
    pub const fn exercise(&self) -> ExerciseKind {
        self.exercise
    }

    /// Whether reps are still being counted
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Reps counted so far
    #[must_use]
    pub fn total_reps(&self) -> u32 {
        self.feedbacks.len() as u32
    }

    /// Target that stops the session, if any
    #[must_use]
    pub const fn target_reps(&self) -> Option<u32> {
        self.target_reps
    }

    /// Feedback recorded so far
    #[must_use]
    pub fn feedbacks(&self) -> &[RepFeedback] {
        &self.feedbacks
    }

    /// Note a frame timestamp; the session duration spans the first and last frames seen while active
    pub fn observe_frame(&mut self, timestamp_ms: u64) {
        if !self.active {
            return;
        }
        self.first_frame_ms.get_or_insert(timestamp_ms);
        self.last_frame_ms = Some(timestamp_ms);
    }

    /// Count a completed rep if the session is active
    pub fn record(&mut self, rep: &CompletedRep) -> RecordOutcome {
        if !self.active {
            return RecordOutcome::Ignored;
        }
        self.feedbacks.push(rep.feedback.clone());
        let total = self.total_reps();
        debug!(
            total,
            side = %rep.event.side,
            rating = rep.feedback.form_rating.as_str(),
            "rep recorded"
        );

        if self.target_reps.is_some_and(|target| total >= target) {
            self.active = false;
            info!(total, "target reps reached");
            return RecordOutcome::TargetReached(total);
        }
        RecordOutcome::Counted(total)
    }

    /// Apply one analyzed frame, flagging each completed rep the session counted
    ///
    /// Returns `true` when the frame brought the session to its target.
    pub fn record_report(&mut self, report: &mut FrameReport) -> bool {
        self.observe_frame(report.timestamp_ms);
        let mut target_reached = false;
        for rep in &mut report.completed {
            let outcome = self.record(rep);
            rep.counted = outcome.is_counted();
            target_reached |= matches!(outcome, RecordOutcome::TargetReached(_));
        }
        target_reached
    }

    /// Summarize the session
    #[must_use]
    pub fn finish(self, difficulty_at_end: u32) -> FinishedWorkout {
        self.finish_at(difficulty_at_end, Utc::now())
    }

    /// Summarize the session with an explicit end time
    ///
    /// Duration comes from frame timestamps when frames were seen, otherwise
    /// from wall-clock time.
    #[must_use]
    pub fn finish_at(self, difficulty_at_end: u32, ended_at: DateTime<Utc>) -> FinishedWorkout {
        let duration_ms = match (self.first_frame_ms, self.last_frame_ms) {
            (Some(first), Some(last)) => last.saturating_sub(first),
            _ => u64::try_from((ended_at - self.start_time).num_milliseconds()).unwrap_or(0),
        };

        let total_reps = self.total_reps();
        let perfect_reps = self.feedbacks.iter().filter(|f| f.is_perfect()).count() as u32;
        let avg_angle = if self.feedbacks.is_empty() {
            0.0
        } else {
            self.feedbacks.iter().map(|f| f.angle).sum::<f64>() / self.feedbacks.len() as f64
        };

        let summary = WorkoutSummary {
            exercise_kind: self.exercise,
            start_time: self.start_time,
            duration_ms,
            total_reps,
            perfect_reps,
            avg_angle,
            score: workout_score(&self.feedbacks),
            difficulty_at_end,
        };
        let analysis = WorkoutAnalysis::from_feedback(self.exercise, &self.feedbacks);

        info!(
            exercise = %summary.exercise_kind,
            total_reps,
            perfect_reps,
            score = summary.score,
            duration = %summary.formatted_duration(),
            "workout finished"
        );

        FinishedWorkout {
            summary,
            feedbacks: self.feedbacks,
            analysis,
        }
    }
}
